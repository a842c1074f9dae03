//! # Spacing
//!
//! Stretching laws per segment and the 1D distributions built from them.

pub mod distribution;
pub mod law;

pub use distribution::{distribute, stretching_layers, Distribution};
pub use law::{resolve_spacing, CellType, SegmentSpacing, SpacingLaw, SpacingOverride};
