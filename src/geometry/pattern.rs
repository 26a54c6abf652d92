//! Spacing patterns: `"1|1|2"` means two tight gaps then a loose one, repeated.

use crate::rows::SpacePattern;

/// Non-empty cyclic sequence of relative gap weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPattern(Vec<f64>);

impl ResolvedPattern {
    pub fn uniform() -> Self {
        Self(vec![1.0])
    }

    pub fn weights(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Weight of gap `i`, wrapping around the pattern.
    pub fn weight(&self, i: usize) -> f64 {
        self.0[i % self.0.len()]
    }

    pub fn cycle_sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Resolve a raw spacing value. Anything that is not a `|`-separated list of
/// decimal numbers degrades to uniform spacing rather than failing.
pub fn resolve(raw: &SpacePattern) -> ResolvedPattern {
    let text = match raw {
        SpacePattern::Numeric(_) => return ResolvedPattern::uniform(),
        SpacePattern::Text(t) => t,
    };

    let stripped: String = text.chars().filter(|c| *c != '|' && *c != '.').collect();
    if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_digit()) {
        tracing::warn!(pattern = %text, "not a spacing pattern; using uniform spacing");
        return ResolvedPattern::uniform();
    }

    let mut weights = Vec::new();
    for token in text.split('|') {
        // Empty and bare "." tokens count as zero and are dropped.
        if token.is_empty() || token == "." {
            continue;
        }
        match token.parse::<f64>() {
            Ok(w) => weights.push(w),
            Err(_) => {
                tracing::warn!(
                    pattern = %text,
                    token,
                    "spacing token is not a number; using uniform spacing"
                );
                return ResolvedPattern::uniform();
            }
        }
    }

    if weights.is_empty() {
        return ResolvedPattern::uniform();
    }
    ResolvedPattern(weights)
}
