//! Running line numbers across rows.
//!
//! The counter is a plain value folded through the rows: each row takes the
//! counter, applies its start rule, consumes one number per label and hands
//! the advanced counter to the next row.

use crate::error::EngineError;
use crate::rows::{RowSpec, StartNum};
use std::ops::Range;

/// Next line number to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter(i64);

impl Default for Counter {
    fn default() -> Self {
        Self(1)
    }
}

impl Counter {
    pub fn next_number(self) -> i64 {
        self.0
    }

    /// Numbers for one row of `count` labels, plus the counter after it.
    /// `None` when the counter would leave the `i64` range.
    pub fn take_row(self, start: StartNum, count: usize) -> Option<(Range<i64>, Counter)> {
        let first = match start {
            StartNum::Continue => self.0,
            StartNum::Reset(n) => n,
        };
        let end = first.checked_add(i64::try_from(count).ok()?)?;
        Some((first..end, Counter(end)))
    }
}

/// Zero-padded label text, as wide as the largest total line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormat {
    width: usize,
}

impl LabelFormat {
    /// Width is the digit count of the sum of every row's `num_count`.
    pub fn for_rows(rows: &[RowSpec]) -> Result<Self, EngineError> {
        let total = rows.iter().enumerate().try_fold(0i64, |acc, (i, r)| {
            acc.checked_add(r.num_count)
                .ok_or(EngineError::NumberOverflow { row: i + 1 })
        })?;
        Ok(Self {
            width: total.to_string().len(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn label(&self, number: i64) -> String {
        // Plain left fill, so `-2` at width 3 reads `0-2`.
        format!("{:0>width$}", number, width = self.width)
    }
}
