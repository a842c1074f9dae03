//! # Rings
//!
//! One ring per profile station: a half circle of points in the plane
//! `x = station.x`, from `θ = 0` (`+y`) to `θ = π` (`-y`) through `+z`.

use glam::{DVec2, DVec3};
use std::f64::consts::PI;

/// A ring of the top half-revolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Profile station the ring was built from.
    pub station: usize,
    /// Axial coordinate.
    pub axial: f64,
    /// Distance from the rotation axis.
    pub radius: f64,
    /// Ring points from `θ = 0` to `θ = π`.
    pub points: Vec<DVec3>,
    /// Indices of `points` in the zone's local index space.
    pub indices: Vec<u32>,
}

impl Ring {
    /// Builds a ring of `dim` points for a profile station.
    ///
    /// `dim == 1` is a pole on the axis.
    pub fn new(station: usize, position: DVec2, dim: usize, first_index: u32) -> Self {
        let radius = position.y.abs();
        let points = ring_points(position.x, radius, dim);
        let indices = (first_index..first_index + points.len() as u32).collect();
        Self {
            station,
            axial: position.x,
            radius,
            points,
            indices,
        }
    }

    /// Number of points on the ring.
    #[inline]
    pub fn dim(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_pole(&self) -> bool {
        self.points.len() == 1
    }

    /// Indices of the two seam points (0° and 180°); a pole has one.
    pub fn seam(&self) -> (u32, u32) {
        (self.indices[0], self.indices[self.indices.len() - 1])
    }
}

/// Points of a half ring at axial `x` and `radius`.
///
/// The seam points are exactly `(x, ±radius, 0)`.
///
/// # Example
///
/// ```rust
/// use interface_mesh::revolve::ring_points;
/// use glam::DVec3;
///
/// let points = ring_points(2.0, 1.0, 3);
/// assert_eq!(points[0], DVec3::new(2.0, 1.0, 0.0));
/// assert!((points[1] - DVec3::new(2.0, 0.0, 1.0)).length() < 1e-12);
/// assert_eq!(points[2], DVec3::new(2.0, -1.0, 0.0));
/// ```
pub fn ring_points(x: f64, radius: f64, dim: usize) -> Vec<DVec3> {
    if dim <= 1 {
        return vec![DVec3::new(x, 0.0, 0.0)];
    }

    let step = PI / (dim - 1) as f64;
    let mut points: Vec<DVec3> = (0..dim)
        .map(|k| {
            let theta = step * k as f64;
            DVec3::new(x, radius * theta.cos(), radius * theta.sin())
        })
        .collect();

    points[0] = DVec3::new(x, radius, 0.0);
    points[dim - 1] = DVec3::new(x, -radius, 0.0);
    points
}
