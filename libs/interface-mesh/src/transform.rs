//! # Placement Transform
//!
//! Moves a mesh generated about the canonical `+x` axis into the requested
//! frame: rotate about the canonical center so `+x` maps onto the requested
//! axis, then move the canonical center onto the requested center.

use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use glam::{DMat4, DVec3};

/// Rigid placement of an interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Unit rotation axis.
    pub axis: DVec3,
    /// Requested interface center.
    pub center: DVec3,
    /// Rotation about Y, radians.
    pub psi: f64,
    /// Rotation about Z, radians.
    pub phi: f64,
}

impl Placement {
    /// Derives the rotation angles from `axis`.
    ///
    /// `ψ = -asin(a_z)` and `φ = atan2(a_y, a_x)` give
    /// `Rz(φ)·Ry(ψ)·x̂ = â`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the axis has zero length or is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use interface_mesh::transform::Placement;
    ///
    /// let placement = Placement::new(DVec3::new(0.0, 0.0, 2.0), DVec3::ZERO).unwrap();
    /// let mapped = placement.rotation().transform_vector3(DVec3::X);
    /// assert!((mapped - DVec3::Z).length() < 1e-12);
    /// ```
    pub fn new(axis: DVec3, center: DVec3) -> Result<Self> {
        let length = axis.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(InterfaceError::invalid_config(format!(
                "rotation axis must be non-zero, got [{}, {}, {}]",
                axis.x, axis.y, axis.z
            )));
        }
        if !center.is_finite() {
            return Err(InterfaceError::invalid_config("interface center must be finite"));
        }

        let axis = axis / length;
        let psi = -axis.z.clamp(-1.0, 1.0).asin();
        let phi = axis.y.atan2(axis.x);
        Ok(Self {
            axis,
            center,
            psi,
            phi,
        })
    }

    /// Rotation `Rz(φ)·Ry(ψ)`.
    pub fn rotation(&self) -> DMat4 {
        DMat4::from_rotation_z(self.phi) * DMat4::from_rotation_y(self.psi)
    }

    /// Full placement matrix for a mesh built about `canonical_center`.
    pub fn matrix(&self, canonical_center: DVec3) -> DMat4 {
        DMat4::from_translation(self.center) * self.rotation() * DMat4::from_translation(-canonical_center)
    }

    /// Applies the placement in place.
    pub fn apply(&self, mesh: &mut InterfaceMesh, canonical_center: DVec3) {
        mesh.transform(&self.matrix(canonical_center));
        tracing::debug!(
            psi = self.psi.to_degrees(),
            phi = self.phi.to_degrees(),
            "placement applied"
        );
    }
}
