//! Output side: the annotated PDF, or a JSON dump of the computed labels.

pub mod json;
pub mod pdf;

pub use json::render_placements;
pub use pdf::{add_annotations, load_pdf, page_geometry, save_pdf};
