//! Placement: rows + page geometry -> one label per computed position.
//!
//! Rows are processed strictly in file order because the line-number counter
//! threads through them. Nothing here touches the document; the caller hands
//! the finished list to the PDF layer in one go.

use crate::error::EngineError;
use crate::geometry;
use crate::numbering::{Counter, LabelFormat};
use crate::rows::RowSpec;
use serde::Serialize;

/// Side length of the square annotation box anchored at each label.
pub const LABEL_BOX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

/// What each label says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Zero-padded running line numbers.
    #[default]
    Numbers,
    /// The computed document y-coordinate, for calibrating a row file.
    MarkPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub page: usize,
    pub x: f64,
    /// Already flipped against the page height.
    pub y: f64,
    pub text: String,
    pub font_size: String,
}

impl LabelPlacement {
    /// `[x, y, x + w, y + h]`
    pub fn rect(&self) -> [f64; 4] {
        [self.x, self.y, self.x + LABEL_BOX, self.y + LABEL_BOX]
    }
}

/// Reject rows that reference missing pages or ask for no labels.
pub fn validate_rows(rows: &[RowSpec], pages: &[PageGeometry]) -> Result<(), EngineError> {
    for (i, row) in rows.iter().enumerate() {
        if row.num_count < 1 {
            return Err(EngineError::NonPositiveCount {
                row: i + 1,
                count: row.num_count,
            });
        }
        if row.page >= pages.len() {
            return Err(EngineError::PageOutOfRange {
                row: i + 1,
                page: row.page,
                page_count: pages.len(),
            });
        }
    }
    Ok(())
}

/// Labels for a single row, and the counter to hand to the next row.
/// `None` when the row's numbers leave the `i64` range.
pub fn place_row(
    row: &RowSpec,
    page: PageGeometry,
    counter: Counter,
    format: LabelFormat,
    mode: LabelMode,
) -> Option<(Vec<LabelPlacement>, Counter)> {
    let pattern = geometry::resolve(&row.space_pattern);
    let count = usize::try_from(row.num_count).unwrap_or(0);
    let ys = geometry::y_positions(row.start_y_pos, row.end_y_pos, &pattern, count);
    let (numbers, next) = counter.take_row(row.start_num, count)?;

    tracing::debug!(
        page = row.page,
        pattern = ?pattern.weights(),
        first = numbers.start,
        count,
        "placing row"
    );

    let font_size = row.font_size_label();
    let labels = ys
        .into_iter()
        .zip(numbers)
        .map(|(y, number)| LabelPlacement {
            page: row.page,
            x: row.x_pos,
            y: page.height - y,
            text: match mode {
                LabelMode::MarkPosition => format!("{:.1}", y),
                LabelMode::Numbers => format.label(number),
            },
            font_size: font_size.clone(),
        })
        .collect();

    Some((labels, next))
}

/// Validate every row, then fold the counter through them in file order.
pub fn plan_placements(
    rows: &[RowSpec],
    pages: &[PageGeometry],
    mode: LabelMode,
) -> Result<Vec<LabelPlacement>, EngineError> {
    validate_rows(rows, pages)?;
    let format = LabelFormat::for_rows(rows)?;

    let (placements, counter) = rows.iter().enumerate().try_fold(
        (Vec::new(), Counter::default()),
        |(mut acc, counter), (i, row)| {
            let (labels, next) = place_row(row, pages[row.page], counter, format, mode)
                .ok_or(EngineError::NumberOverflow { row: i + 1 })?;
            acc.extend(labels);
            Ok::<_, EngineError>((acc, next))
        },
    )?;
    tracing::debug!(
        labels = placements.len(),
        width = format.width(),
        next = counter.next_number(),
        "placed all rows"
    );
    Ok(placements)
}
