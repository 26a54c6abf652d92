//! Vertical geometry: spacing patterns and the y-positions they produce.

pub mod pattern;
pub mod positions;

pub use pattern::resolve;
pub use positions::y_positions;
