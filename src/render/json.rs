use crate::placement::{LabelPlacement, PageGeometry};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlacementReport<'a> {
    pub pages: &'a [PageGeometry],
    pub label_count: usize,
    pub placements: &'a [LabelPlacement],
}

/// Render computed placements as pretty JSON, without touching the PDF.
pub fn render_placements(
    pages: &[PageGeometry],
    placements: &[LabelPlacement],
) -> anyhow::Result<String> {
    let report = PlacementReport {
        pages,
        label_count: placements.len(),
        placements,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
