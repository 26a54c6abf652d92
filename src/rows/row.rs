use crate::error::EngineError;
use crate::rows::cell::Cell;
use std::collections::BTreeMap;

/// Field names every row file must carry (any order).
pub const FIELDS: [&str; 8] = [
    "page",
    "x_pos",
    "start_y_pos",
    "end_y_pos",
    "space_pattern",
    "num_count",
    "start_num",
    "font_size",
];

/// One coerced data line, keyed by header name.
pub type Record = BTreeMap<String, Cell>;

/// Raw spacing value. Only text can encode a non-uniform pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum SpacePattern {
    Numeric(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartNum {
    Continue,
    Reset(i64),
}

/// One configuration row: a labelled vertical span on one page.
///
/// Semantic invariants (span ordering, count >= 1, page in range) are not
/// checked here; see `placement::validate_rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    pub page: usize,
    pub x_pos: f64,
    pub start_y_pos: f64,
    pub end_y_pos: f64,
    pub space_pattern: SpacePattern,
    pub num_count: i64,
    pub start_num: StartNum,
    pub font_size: f64,
    /// `font_size` as written in the row file, e.g. `8` or `8.0`.
    pub font_size_text: String,
}

impl RowSpec {
    pub fn from_record(record: &Record) -> Result<Self, EngineError> {
        let page = cell(record, "page")?;
        let page = page
            .as_i64()
            .and_then(|p| usize::try_from(p).ok())
            .ok_or_else(|| bad_cell("page", page, "a non-negative integer"))?;

        let space_pattern = match cell(record, "space_pattern")? {
            Cell::Integer(v) => SpacePattern::Numeric(*v as f64),
            Cell::Decimal(v) => SpacePattern::Numeric(*v),
            other => SpacePattern::Text(other.to_string()),
        };

        let num_count = cell(record, "num_count")?;
        let num_count = num_count
            .as_i64()
            .ok_or_else(|| bad_cell("num_count", num_count, "an integer"))?;

        let start_num = match cell(record, "start_num")? {
            Cell::Continue => StartNum::Continue,
            Cell::Decimal(v) => StartNum::Reset(v.trunc() as i64),
            other => StartNum::Reset(
                other
                    .as_i64()
                    .ok_or_else(|| bad_cell("start_num", other, "an integer or `continue`"))?,
            ),
        };

        Ok(RowSpec {
            page,
            x_pos: number(record, "x_pos")?,
            start_y_pos: number(record, "start_y_pos")?,
            end_y_pos: number(record, "end_y_pos")?,
            space_pattern,
            num_count,
            start_num,
            font_size: number(record, "font_size")?,
            font_size_text: cell(record, "font_size")?.to_string(),
        })
    }

    /// Font size as handed to the annotation layer, e.g. `8pt`.
    pub fn font_size_label(&self) -> String {
        format!("{}pt", self.font_size_text)
    }
}

fn cell<'a>(record: &'a Record, field: &'static str) -> Result<&'a Cell, EngineError> {
    record
        .get(field)
        .ok_or_else(|| EngineError::MissingFields(vec![field.to_string()]))
}

fn number(record: &Record, field: &'static str) -> Result<f64, EngineError> {
    let c = cell(record, field)?;
    c.as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| bad_cell(field, c, "a finite number"))
}

fn bad_cell(field: &'static str, value: &Cell, expected: &'static str) -> EngineError {
    EngineError::BadCell {
        field,
        value: value.to_string(),
        expected,
    }
}
