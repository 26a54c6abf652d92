use crate::config::DefaultLayout;
use crate::placement::PageGeometry;
use crate::rows::row::FIELDS;
use anyhow::Context;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// One evenly spaced row per page, inset from the page edges.
pub fn default_rows(pages: &[PageGeometry], layout: &DefaultLayout) -> String {
    let mut out = FIELDS.join(",");
    out.push('\n');
    for (index, page) in pages.iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{:.2},{:.2},{:.2},1,{},continue,{}",
            index,
            page.width * layout.x_inset_fraction,
            page.height * layout.y_inset_fraction,
            page.height * (1.0 - layout.y_inset_fraction),
            layout.default_count,
            layout.default_font_size,
        );
    }
    out
}

/// Write the default row file unless one already exists.
///
/// Returns whether a file was written; an existing file is never touched.
pub fn generate_rows_file(
    pages: &[PageGeometry],
    path: &Path,
    layout: &DefaultLayout,
) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, default_rows(pages, layout))
        .with_context(|| format!("write row file {}", path.display()))?;
    Ok(true)
}
