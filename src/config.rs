//! Tunable defaults and file naming conventions.

use crate::error::EngineError;
use clap::Args;
use std::path::{Path, PathBuf};

/// Prefix for every file derived from the input PDF.
pub const OUTPUT_PREFIX: &str = "linenums_";

/// Layout used when a row file has to be generated from the PDF alone:
/// one row per page, inset from the page edges, evenly spaced.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct DefaultLayout {
    /// Horizontal inset, as a fraction of page width.
    #[arg(long = "x-inset", default_value_t = 0.05)]
    pub x_inset_fraction: f64,

    /// Vertical inset, as a fraction of page height (applied top and bottom).
    #[arg(long = "y-inset", default_value_t = 0.05)]
    pub y_inset_fraction: f64,

    /// Labels per page.
    #[arg(long = "count", default_value_t = 60)]
    pub default_count: u32,

    #[arg(long = "font-size", default_value_t = 8.0)]
    pub default_font_size: f64,
}

impl Default for DefaultLayout {
    fn default() -> Self {
        Self {
            x_inset_fraction: 0.05,
            y_inset_fraction: 0.05,
            default_count: 60,
            default_font_size: 8.0,
        }
    }
}

/// `dir/paper.pdf` -> `dir/linenums_paper.csv`
pub fn default_rows_path(pdf: &Path) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
    pdf.with_file_name(format!("{OUTPUT_PREFIX}{stem}.csv"))
}

/// `dir/paper.pdf` -> `dir/linenums_paper.pdf`
pub fn default_output_path(pdf: &Path) -> PathBuf {
    let name = pdf.file_name().unwrap_or_default().to_string_lossy();
    pdf.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}

/// Require an existing file with the given extension (case-insensitive).
pub fn check_input(path: &Path, extension: &str, role: &str) -> Result<(), EngineError> {
    let matches = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false);
    if !matches {
        return Err(EngineError::BadArgument(format!(
            "the {} argument must be a .{} file: {}",
            role,
            extension,
            path.display()
        )));
    }
    if !path.exists() {
        return Err(EngineError::BadArgument(format!(
            "file {} does not exist",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_paths_sit_beside_the_pdf() {
        let pdf = Path::new("docs/brief.pdf");
        assert_eq!(default_rows_path(pdf), PathBuf::from("docs/linenums_brief.csv"));
        assert_eq!(default_output_path(pdf), PathBuf::from("docs/linenums_brief.pdf"));
    }

    #[test]
    fn input_checks() {
        let file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
        assert_eq!(check_input(file.path(), "pdf", "first"), Ok(()));

        let err = check_input(file.path(), "csv", "second").unwrap_err();
        assert!(err.to_string().contains("must be a .csv file"), "{err}");

        let err = check_input(Path::new("/nonexistent/brief.pdf"), "pdf", "first").unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }
}
