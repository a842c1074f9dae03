//! # Config Crate
//!
//! Centralized configuration constants for the rotational interface mesher.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{compute_group_count, DEFAULT_MAX_EDGE_LENGTH, POLE_TOLERANCE};
//!
//! // A profile starting on the axis gets a pole ring
//! let start_radius: f64 = 0.0;
//! let on_axis = start_radius.abs() < POLE_TOLERANCE;
//! assert!(on_axis);
//!
//! // Angular groups per half ring for a pole start
//! let groups = compute_group_count(0.0, None, DEFAULT_MAX_EDGE_LENGTH);
//! assert_eq!(groups, 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants and validation
//! - **Generator Compatible**: Defaults match the JSON configuration defaults

pub mod constants;
