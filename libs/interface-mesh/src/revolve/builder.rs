//! # Zone Mesh Builder
//!
//! Accumulates the rings and cells of one zone. Points live in a zone-local
//! index space: a zone seeded from the previous zone's last ring reserves
//! `0..shared` for those points and owns everything after them.

use super::ring::Ring;
use super::stitch::{consecutive_distance_deviation, stitch_rings};
use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::error::{InterfaceError, Result};
use crate::profile::Zone;
use crate::spacing::CellType;
use glam::{DVec2, DVec3};

/// Finished mesh of one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMesh {
    pub zone: Zone,
    /// Leading local indices that belong to the previous zone.
    pub shared: usize,
    /// Points created by this zone, local index `shared + i`.
    pub points: Vec<DVec3>,
    /// Rings in axial order; the first one is the seed.
    pub rings: Vec<Ring>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
}

impl ZoneMesh {
    /// Points on each ring, seed included.
    pub fn ring_dims(&self) -> Vec<usize> {
        self.rings.iter().map(Ring::dim).collect()
    }

    /// The last ring of the zone.
    pub fn last_ring(&self) -> Option<&Ring> {
        self.rings.last()
    }
}

/// Builds a [`ZoneMesh`] ring by ring.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use interface_mesh::diagnostic::Diagnostics;
/// use interface_mesh::profile::Zone;
/// use interface_mesh::revolve::ZoneMeshBuilder;
/// use interface_mesh::spacing::CellType;
///
/// let mut diagnostics = Diagnostics::new();
/// let mut builder = ZoneMeshBuilder::from_pole(Zone::Front, 2, 0, DVec2::ZERO);
/// builder
///     .push_ring(1, DVec2::new(0.0, 0.5), 3, CellType::Tri, &mut diagnostics)
///     .unwrap();
/// let zone = builder.finish();
/// assert_eq!(zone.points.len(), 4);
/// assert_eq!(zone.triangles.len(), 2);
/// ```
#[derive(Debug)]
pub struct ZoneMeshBuilder {
    zone: Zone,
    delta: usize,
    shared: usize,
    points: Vec<DVec3>,
    rings: Vec<Ring>,
    triangles: Vec<[u32; 3]>,
    quads: Vec<[u32; 4]>,
}

impl ZoneMeshBuilder {
    fn with_seed(zone: Zone, delta: usize, shared: usize, seed: Ring) -> Self {
        let points = if shared == 0 { seed.points.clone() } else { Vec::new() };
        Self {
            zone,
            delta,
            shared,
            points,
            rings: vec![seed],
            triangles: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Seeds the zone with a pole it owns.
    pub fn from_pole(zone: Zone, delta: usize, station: usize, position: DVec2) -> Self {
        Self::with_seed(zone, delta, 0, Ring::new(station, position, 1, 0))
    }

    /// Seeds the zone with an arc of `dim` points it owns.
    pub fn from_arc(zone: Zone, delta: usize, station: usize, position: DVec2, dim: usize) -> Self {
        Self::with_seed(zone, delta, 0, Ring::new(station, position, dim, 0))
    }

    /// Seeds the zone with the previous zone's last ring.
    pub fn from_shared(zone: Zone, delta: usize, ring: &Ring) -> Self {
        let seed = Ring {
            indices: (0..ring.dim() as u32).collect(),
            ..ring.clone()
        };
        Self::with_seed(zone, delta, ring.dim(), seed)
    }

    /// Points on the newest ring.
    pub fn current_dim(&self) -> usize {
        self.rings.last().map_or(0, Ring::dim)
    }

    /// Appends a ring of `dim` points at a profile station and stitches it
    /// to the previous ring.
    pub fn push_ring(
        &mut self,
        station: usize,
        position: DVec2,
        dim: usize,
        cell_type: CellType,
        diagnostics: &mut Diagnostics,
    ) -> Result<&Ring> {
        let first_index = (self.shared + self.points.len()) as u32;
        let ring = Ring::new(station, position, dim, first_index);

        let previous = self
            .rings
            .last()
            .ok_or_else(|| InterfaceError::invalid_topology("zone has no seed ring"))?;
        let cells = stitch_rings(&previous.indices, &ring.indices, self.delta, cell_type)?;
        self.triangles.extend(cells.triangles);
        self.quads.extend(cells.quads);

        if let Some((position, deviation)) = consecutive_distance_deviation(&ring.points) {
            diagnostics.warning(DiagnosticKind::ConsecutiveDistance {
                station,
                position,
                deviation,
            });
        }

        tracing::trace!(zone = %self.zone, station, dim = ring.dim(), "ring added");
        self.points.extend_from_slice(&ring.points);
        self.rings.push(ring);
        Ok(&self.rings[self.rings.len() - 1])
    }

    /// Consumes the builder.
    pub fn finish(self) -> ZoneMesh {
        ZoneMesh {
            zone: self.zone,
            shared: self.shared,
            points: self.points,
            rings: self.rings,
            triangles: self.triangles,
            quads: self.quads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_seed_arc() {
        let builder = ZoneMeshBuilder::from_arc(Zone::Side, 2, 0, DVec2::new(0.0, 1.0), 5);
        let zone = builder.finish();
        assert_eq!(zone.shared, 0);
        assert_eq!(zone.points.len(), 5);
        assert_eq!(zone.ring_dims(), vec![5]);
    }

    #[test]
    fn test_shared_seed_owns_no_points() {
        let mut diagnostics = Diagnostics::new();
        let mut front = ZoneMeshBuilder::from_pole(Zone::Front, 2, 0, DVec2::ZERO);
        front
            .push_ring(1, DVec2::new(0.0, 1.0), 5, CellType::Tri, &mut diagnostics)
            .unwrap();
        let front = front.finish();

        let mut side = ZoneMeshBuilder::from_shared(Zone::Side, 2, front.last_ring().unwrap());
        assert_eq!(side.current_dim(), 5);
        let ring = side
            .push_ring(2, DVec2::new(1.0, 1.0), 5, CellType::Quad, &mut diagnostics)
            .unwrap();
        assert_eq!(ring.indices, (5..10).collect::<Vec<u32>>());
        let side = side.finish();

        assert_eq!(side.shared, 5);
        assert_eq!(side.points.len(), 5);
        assert_eq!(side.quads.len(), 4);
        assert_eq!(side.quads[0], [0, 1, 6, 5]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_indices_are_monotonic() {
        let mut diagnostics = Diagnostics::new();
        let mut builder = ZoneMeshBuilder::from_pole(Zone::Front, 3, 0, DVec2::ZERO);
        for (station, dim) in [(1, 4), (2, 7), (3, 7)] {
            builder
                .push_ring(station, DVec2::new(0.0, station as f64), dim, CellType::Tri, &mut diagnostics)
                .unwrap();
        }
        let zone = builder.finish();
        let flat: Vec<u32> = zone.rings.iter().flat_map(|r| r.indices.clone()).collect();
        assert_eq!(flat, (0..19).collect::<Vec<u32>>());
        assert_eq!(zone.points.len(), 19);
    }
}
