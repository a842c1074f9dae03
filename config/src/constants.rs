//! # Configuration Constants
//!
//! Centralized constants for the rotational interface mesher. Tolerances,
//! ring-density heuristics and configuration defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Revolution**: Half-revolution layout and angular group heuristics
//! - **Spacing**: Stretching and distribution limits
//! - **Defaults**: Values used when the JSON configuration omits a field

use std::f64::consts::PI;
use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance of the spacing distribution.
///
/// Edge-length ratios within this of an integer count as that integer, so a
/// segment an exact multiple of the max edge is not given an extra interval.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let ratio = 1.0 / (0.1 / 1.0);
/// assert_eq!((ratio - EPSILON).ceil(), 10.0);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance of the colinearity test used to classify a segment as a line.
///
/// Compared against the cross product of each point with the first two
/// points of the segment.
pub const COLINEARITY_TOLERANCE: f64 = 1e-10;

/// Radial distance below which a profile end point lies on the rotation axis.
///
/// An end on the axis is meshed as a single-point pole ring.
///
/// # Example
///
/// ```rust
/// use config::constants::POLE_TOLERANCE;
///
/// let start_radius: f64 = 0.0;
/// assert!(start_radius.abs() < POLE_TOLERANCE);
/// ```
pub const POLE_TOLERANCE: f64 = 1e-9;

/// Relative tolerance of the consecutive-distance check on a ring.
///
/// Chords on one ring must match the first chord within
/// `CONSECUTIVE_DISTANCE_TOLERANCE * max(1, first_chord)`.
pub const CONSECUTIVE_DISTANCE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// REVOLUTION CONSTANTS
// =============================================================================

/// Angle covered by one half of the revolution, in degrees.
///
/// The surface is generated as a top half (0° to 180°) and its mirrored
/// bottom half (0° to -180°).
pub const HALF_REVOLUTION_DEGREES: f64 = 180.0;

/// Number of slices the full revolution is split into (`360 / 180`).
///
/// # Example
///
/// ```rust
/// use config::constants::{HALF_REVOLUTION_DEGREES, REVOLUTION_SLICES};
///
/// assert_eq!(REVOLUTION_SLICES, 360.0 / HALF_REVOLUTION_DEGREES);
/// ```
pub const REVOLUTION_SLICES: f64 = 360.0 / HALF_REVOLUTION_DEGREES;

/// Weight of the refinement factor in the angular group count.
pub const MAX_GROUPS_ADDED: f64 = 14.0;

/// Lower bound on the base group count before slicing.
pub const MIN_GROUPS_ADDED: f64 = 4.0;

// =============================================================================
// SPACING CONSTANTS
// =============================================================================

/// Upper bound on stretched layers grown from one end of a segment.
pub const MAX_STRETCHING_LAYERS: usize = 100_000;

/// Exponent applied to `1 / growth_ratio` when the stretched regions of a
/// segment overlap and a reduced target edge length is derived.
pub const TARGET_EDGE_DECAY_POWER: i32 = 3;

/// Fraction of the profile's radial extent above which a segment is `side`.
pub const SIDE_ZONE_RADIAL_FRACTION: f64 = 0.75;

/// Fraction of the profile's axial extent a segment must not exceed to be
/// classified as `front`.
pub const FRONT_ZONE_AXIAL_FRACTION: f64 = 0.5;

// =============================================================================
// DEFAULT CONSTANTS
// =============================================================================

/// Default maximum edge length when `properties.maxEdgeLength` is omitted.
pub const DEFAULT_MAX_EDGE_LENGTH: f64 = 0.1;

/// Default refinement factor.
pub const DEFAULT_REFINEMENT_FACTOR: f64 = 0.0;

/// Default number of rings with a fixed circumferential distribution next to
/// the front and back poles.
pub const DEFAULT_FIXED_LAYERS: usize = 1;

/// Default rotation axis of the interface.
pub const DEFAULT_AXIS: [f64; 3] = [1.0, 0.0, 0.0];

/// Default interface center.
pub const DEFAULT_CENTER: [f64; 3] = [0.0, 0.0, 0.0];

/// Extension of the neutral text format used when the requested output
/// extension has no registered writer.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "dat";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of angular groups per half ring.
///
/// Every density change on a ring adds or removes one edge per group, so the
/// group count fixes the granularity of the whole interface.
///
/// - profile starting on the axis: `floor((14ρ + 4) / slices)`
/// - profile starting at radius `r`:
///   `m = max(floor(2πr / slices / max_edge) - 7, 4)`,
///   `floor((14ρ + m) / slices)`
///
/// The result is at least 1.
///
/// # Example
///
/// ```rust
/// use config::constants::compute_group_count;
///
/// // Pole start, no refinement
/// assert_eq!(compute_group_count(0.0, None, 0.1), 2);
///
/// // Off-axis start at r = 1 with max edge 0.1
/// assert_eq!(compute_group_count(0.0, Some(1.0), 0.1), 12);
/// ```
pub fn compute_group_count(refinement_factor: f64, start_radius: Option<f64>, max_edge: f64) -> usize {
    let base = match start_radius {
        None => MIN_GROUPS_ADDED,
        Some(radius) => {
            let arc = 2.0 * PI * radius / REVOLUTION_SLICES;
            let standard_edges = (arc / max_edge).floor();
            (standard_edges - 0.5 * MAX_GROUPS_ADDED).max(MIN_GROUPS_ADDED)
        }
    };

    let groups = ((refinement_factor * MAX_GROUPS_ADDED + base) / REVOLUTION_SLICES).floor();
    if groups.is_finite() && groups >= 1.0 {
        groups as usize
    } else {
        1
    }
}

/// Circumferential edge length of a ring of `dim` points at `radius`.
///
/// # Example
///
/// ```rust
/// use config::constants::ring_edge_length;
///
/// let edge = ring_edge_length(1.0, 3);
/// assert!((edge - std::f64::consts::PI / 3.0).abs() < 1e-12);
/// ```
#[inline]
pub fn ring_edge_length(radius: f64, dim: usize) -> f64 {
    (2.0 * PI * radius / REVOLUTION_SLICES) / dim as f64
}

// =============================================================================
// SETTINGS SNAPSHOT
// =============================================================================

/// Validated snapshot of the revolution parameters shared between the
/// settings loader and the revolver.
///
/// # Examples
/// ```
/// use config::constants::RevolveSettings;
/// let settings = RevolveSettings::default();
/// assert!(settings.max_edge_length > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveSettings {
    /// Bound on circumferential and meridional edge length.
    pub max_edge_length: f64,
    /// Refinement factor feeding [`compute_group_count`].
    pub refinement_factor: f64,
    /// Rings with a fixed distribution after the front start.
    pub front_fixed_layers: usize,
    /// Rings with a fixed distribution before the back end.
    pub back_fixed_layers: usize,
}

impl RevolveSettings {
    /// Builds settings, rejecting a non-positive edge length or a negative
    /// refinement factor.
    ///
    /// # Examples
    /// ```
    /// use config::constants::RevolveSettings;
    /// let settings = RevolveSettings::new(0.05, 1.0, 1, 2).expect("valid settings");
    /// assert_eq!(settings.back_fixed_layers, 2);
    /// ```
    pub fn new(
        max_edge_length: f64,
        refinement_factor: f64,
        front_fixed_layers: usize,
        back_fixed_layers: usize,
    ) -> Result<Self, ConfigError> {
        if !(max_edge_length.is_finite() && max_edge_length > 0.0) {
            return Err(ConfigError::InvalidMaxEdgeLength(max_edge_length));
        }
        if !(refinement_factor.is_finite() && refinement_factor >= 0.0) {
            return Err(ConfigError::InvalidRefinementFactor(refinement_factor));
        }
        Ok(Self {
            max_edge_length,
            refinement_factor,
            front_fixed_layers,
            back_fixed_layers,
        })
    }
}

impl Default for RevolveSettings {
    fn default() -> Self {
        Self {
            max_edge_length: DEFAULT_MAX_EDGE_LENGTH,
            refinement_factor: DEFAULT_REFINEMENT_FACTOR,
            front_fixed_layers: DEFAULT_FIXED_LAYERS,
            back_fixed_layers: DEFAULT_FIXED_LAYERS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the max edge length is zero, negative or not finite.
    InvalidMaxEdgeLength(f64),
    /// Raised when the refinement factor is negative or not finite.
    InvalidRefinementFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxEdgeLength(value) => {
                write!(f, "maxEdgeLength must be positive: {value}")
            }
            ConfigError::InvalidRefinementFactor(value) => {
                write!(f, "refinementFactor must be >= 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
