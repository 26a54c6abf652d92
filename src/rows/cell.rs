use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

// Exactly one decimal point with digits around it.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+\.[0-9]*|\.[0-9]+)$").expect("valid regex"));

/// Literal that keeps the running line number going instead of resetting it.
pub const CONTINUE_TOKEN: &str = "continue";

/// A row file cell, coerced once at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Decimal(f64),
    Continue,
    Text(String),
}

impl Cell {
    /// Coerce raw text: all digits become an integer, digits with a single
    /// decimal point become a decimal, everything else stays text.
    pub fn coerce(raw: &str) -> Self {
        let s = raw.trim();
        if INTEGER_RE.is_match(s) {
            if let Ok(v) = s.parse::<i64>() {
                return Cell::Integer(v);
            }
        }
        if INTEGER_RE.is_match(s) || DECIMAL_RE.is_match(s) {
            if let Ok(v) = s.parse::<f64>() {
                return Cell::Decimal(v);
            }
        }
        if s == CONTINUE_TOKEN {
            return Cell::Continue;
        }
        Cell::Text(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Decimal(v) => Some(*v),
            Cell::Text(s) => s.parse().ok(),
            Cell::Continue => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(v) => Some(*v),
            Cell::Text(s) => s.parse().ok(),
            Cell::Decimal(_) | Cell::Continue => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(v) => write!(f, "{}", v),
            // Keeps the point: `8.0` stays `8.0`.
            Cell::Decimal(v) => write!(f, "{:?}", v),
            Cell::Continue => f.write_str(CONTINUE_TOKEN),
            Cell::Text(s) => f.write_str(s),
        }
    }
}
