//! # Zone Assembler
//!
//! Joins zone meshes into one indexed top half and closes the revolution
//! with its mirror image.

use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use crate::revolve::ZoneMesh;
use glam::DVec3;
use std::collections::BTreeSet;

/// Top half-revolution in global indices.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfMesh {
    pub mesh: InterfaceMesh,
    /// Global indices of seam points and poles.
    pub seam: BTreeSet<u32>,
}

/// Concatenates zone meshes, mapping each zone's local indices to global
/// ones. Points shared with the previous zone are not duplicated.
///
/// # Errors
///
/// `InvalidTopology` when a zone shares a different number of points than
/// the previous zone's last ring holds.
pub fn combine_zones(zones: &[ZoneMesh]) -> Result<HalfMesh> {
    let mut points: Vec<DVec3> = Vec::new();
    let mut triangles = Vec::new();
    let mut quads = Vec::new();
    let mut seam = BTreeSet::new();
    let mut previous_tail = 0usize;

    for (index, zone) in zones.iter().enumerate() {
        if zone.shared != previous_tail {
            return Err(InterfaceError::invalid_topology(format!(
                "{} zone shares {} points but the previous ring has {previous_tail}",
                zone.zone, zone.shared
            )));
        }
        if index == 0 && zone.shared != 0 {
            return Err(InterfaceError::invalid_topology("first zone cannot share points"));
        }

        let offset = (points.len() - zone.shared) as u32;
        points.extend_from_slice(&zone.points);

        triangles.extend(zone.triangles.iter().map(|t| t.map(|i| i + offset)));
        quads.extend(zone.quads.iter().map(|q| q.map(|i| i + offset)));

        for ring in &zone.rings {
            let (first, last) = ring.seam();
            seam.insert(first + offset);
            seam.insert(last + offset);
        }

        previous_tail = zone.last_ring().map_or(0, |r| r.dim());
    }

    Ok(HalfMesh {
        mesh: InterfaceMesh::from_parts(points, triangles, quads),
        seam,
    })
}

/// Adds the bottom half-revolution by mirroring `z`.
///
/// Seam points are shared by both halves; bottom cells are reversed so the
/// closed surface keeps one orientation.
pub fn mirror_half(half: &HalfMesh) -> InterfaceMesh {
    let top = &half.mesh;
    let mut points = top.points().to_vec();
    let mut mirrored = Vec::with_capacity(top.point_count());

    for (index, point) in top.points().iter().enumerate() {
        let index = index as u32;
        if half.seam.contains(&index) {
            mirrored.push(index);
        } else {
            mirrored.push(points.len() as u32);
            points.push(DVec3::new(point.x, point.y, -point.z));
        }
    }

    let map = |i: u32| mirrored[i as usize];
    let mut triangles = top.triangles().to_vec();
    triangles.extend(top.triangles().iter().map(|t| [map(t[0]), map(t[2]), map(t[1])]));
    let mut quads = top.quads().to_vec();
    quads.extend(
        top.quads()
            .iter()
            .map(|q| [map(q[0]), map(q[3]), map(q[2]), map(q[1])]),
    );

    InterfaceMesh::from_parts(points, triangles, quads)
}

/// Combines zones and mirrors the result into the full revolution.
pub fn assemble(zones: &[ZoneMesh]) -> Result<InterfaceMesh> {
    let half = combine_zones(zones)?;
    let mesh = mirror_half(&half);
    tracing::debug!(
        seam_points = half.seam.len(),
        points = mesh.point_count(),
        triangles = mesh.triangle_count(),
        quads = mesh.quad_count(),
        "zones assembled"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostics;
    use crate::profile::Zone;
    use crate::revolve::ZoneMeshBuilder;
    use crate::spacing::CellType;
    use glam::DVec2;

    fn cylinder_zones() -> Vec<ZoneMesh> {
        let mut diagnostics = Diagnostics::new();
        let mut front = ZoneMeshBuilder::from_pole(Zone::Front, 2, 0, DVec2::ZERO);
        front
            .push_ring(1, DVec2::new(0.0, 1.0), 5, CellType::Tri, &mut diagnostics)
            .unwrap();
        let front = front.finish();

        let mut side = ZoneMeshBuilder::from_shared(Zone::Side, 2, front.last_ring().unwrap());
        side.push_ring(2, DVec2::new(1.0, 1.0), 5, CellType::Quad, &mut diagnostics)
            .unwrap();
        let side = side.finish();

        let mut back = ZoneMeshBuilder::from_shared(Zone::Back, 2, side.last_ring().unwrap());
        back.push_ring(3, DVec2::new(1.0, 0.0), 1, CellType::Tri, &mut diagnostics)
            .unwrap();
        vec![front, side, back.finish()]
    }

    #[test]
    fn test_combine_zones_offsets() {
        let half = combine_zones(&cylinder_zones()).unwrap();
        // pole + ring + ring + pole
        assert_eq!(half.mesh.point_count(), 1 + 5 + 5 + 1);
        assert!(half.mesh.validate());
        // side quads start at the front's last ring
        assert_eq!(half.mesh.quads()[0], [1, 2, 7, 6]);
        let expected: BTreeSet<u32> = [0, 1, 5, 6, 10, 11].into_iter().collect();
        assert_eq!(half.seam, expected);
    }

    #[test]
    fn test_combine_rejects_mismatched_share() {
        let mut zones = cylinder_zones();
        zones[1].shared = 3;
        assert!(combine_zones(&zones).is_err());
    }

    #[test]
    fn test_mirror_closes_surface() {
        let mesh = assemble(&cylinder_zones()).unwrap();
        // three interior points per ring are mirrored
        assert_eq!(mesh.point_count(), 12 + 6);
        assert!(mesh.validate());
        assert!(mesh.edge_usage().values().all(|&n| n == 2));
        for p in &mesh.points()[12..] {
            assert!(p.z < 0.0);
        }
    }
}
