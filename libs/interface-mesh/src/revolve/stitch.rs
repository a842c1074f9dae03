//! # Ring Stitching
//!
//! Connectivity between two consecutive rings. Both rings are split into
//! `delta` angular groups of equal edge count; a pole is a single point
//! shared by every group. Inside a group the strip between `a` edges on the
//! previous ring `A` and `b` edges on the new ring `B` is covered by `a + b`
//! triangles, or by `a` quads when the counts match and quads are requested.
//!
//! Every cell winds so that its normal points away from the axis side of a
//! profile running front to back.

use crate::error::{InterfaceError, Result};
use crate::spacing::CellType;
use config::constants::CONSECUTIVE_DISTANCE_TOLERANCE;
use glam::DVec3;

/// Cells produced by stitching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StitchedCells {
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
}

fn group(ring: &[u32], delta: usize, index: usize) -> &[u32] {
    if ring.len() == 1 {
        return ring;
    }
    let edges = (ring.len() - 1) / delta;
    &ring[index * edges..=(index + 1) * edges]
}

fn check_groups(ring: &[u32], delta: usize) -> Result<()> {
    if ring.is_empty() {
        return Err(InterfaceError::invalid_topology("cannot stitch an empty ring"));
    }
    if ring.len() > 1 && (ring.len() - 1) % delta != 0 {
        return Err(InterfaceError::invalid_topology(format!(
            "ring of {} points cannot be split into {delta} groups",
            ring.len()
        )));
    }
    Ok(())
}

/// Connects ring `previous` to ring `next`.
///
/// # Errors
///
/// `InvalidTopology` when a ring cannot be split into `delta` groups or both
/// rings are poles.
///
/// # Example
///
/// ```rust
/// use interface_mesh::revolve::stitch_rings;
/// use interface_mesh::spacing::CellType;
///
/// // Pole fanned into a ring of 3 points with 2 groups
/// let cells = stitch_rings(&[0], &[1, 2, 3], 2, CellType::Tri).unwrap();
/// assert_eq!(cells.triangles, vec![[0, 2, 1], [0, 3, 2]]);
/// ```
pub fn stitch_rings(previous: &[u32], next: &[u32], delta: usize, cell_type: CellType) -> Result<StitchedCells> {
    if delta == 0 {
        return Err(InterfaceError::invalid_topology("group count must be positive"));
    }
    check_groups(previous, delta)?;
    check_groups(next, delta)?;
    if previous.len() == 1 && next.len() == 1 {
        return Err(InterfaceError::invalid_topology("cannot stitch two poles"));
    }

    let mut cells = StitchedCells::default();
    for g in 0..delta {
        let a_ring = group(previous, delta, g);
        let b_ring = group(next, delta, g);
        let a = a_ring.len() - 1;
        let b = b_ring.len() - 1;

        if b > a {
            grow(a_ring, b_ring, &mut cells);
        } else if b < a {
            shrink(a_ring, b_ring, &mut cells);
        } else {
            constant(a_ring, b_ring, cell_type, &mut cells);
        }
    }

    Ok(cells)
}

fn grow(a_ring: &[u32], b_ring: &[u32], cells: &mut StitchedCells) {
    let a = a_ring.len() - 1;
    let b = b_ring.len() - 1;

    for i in 0..=a {
        cells.triangles.push([a_ring[i], b_ring[i + 1], b_ring[i]]);
    }
    for i in 0..a {
        cells.triangles.push([a_ring[i], a_ring[i + 1], b_ring[i + 1]]);
    }
    // Remaining edges of B fan from the group's last point on A
    for j in a + 1..b {
        cells.triangles.push([a_ring[a], b_ring[j + 1], b_ring[j]]);
    }
}

fn shrink(a_ring: &[u32], b_ring: &[u32], cells: &mut StitchedCells) {
    let a = a_ring.len() - 1;
    let b = b_ring.len() - 1;

    for i in 0..=b {
        cells.triangles.push([a_ring[i], a_ring[i + 1], b_ring[i]]);
    }
    for i in 0..b {
        cells.triangles.push([b_ring[i], a_ring[i + 1], b_ring[i + 1]]);
    }
    for j in b + 1..a {
        cells.triangles.push([a_ring[j], a_ring[j + 1], b_ring[b]]);
    }
}

fn constant(a_ring: &[u32], b_ring: &[u32], cell_type: CellType, cells: &mut StitchedCells) {
    for i in 0..a_ring.len() - 1 {
        match cell_type {
            CellType::Quad => {
                cells
                    .quads
                    .push([a_ring[i], a_ring[i + 1], b_ring[i + 1], b_ring[i]]);
            }
            CellType::Tri => {
                cells.triangles.push([a_ring[i], a_ring[i + 1], b_ring[i + 1]]);
                cells.triangles.push([a_ring[i], b_ring[i + 1], b_ring[i]]);
            }
        }
    }
}

/// Largest deviation of the consecutive chords of a ring from its first
/// chord, if it exceeds the tolerance.
///
/// Returns the position of the offending chord and its deviation.
pub fn consecutive_distance_deviation(points: &[DVec3]) -> Option<(usize, f64)> {
    if points.len() < 3 {
        return None;
    }

    let reference = points[0].distance(points[1]);
    let tolerance = CONSECUTIVE_DISTANCE_TOLERANCE * reference.max(1.0);

    points
        .windows(2)
        .enumerate()
        .skip(1)
        .map(|(k, pair)| (k, (pair[0].distance(pair[1]) - reference).abs()))
        .filter(|&(_, deviation)| deviation > tolerance)
        .max_by(|x, y| x.1.total_cmp(&y.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn edge_usage(triangles: &[[u32; 3]], quads: &[[u32; 4]]) -> HashMap<(u32, u32), usize> {
        let mut usage = HashMap::new();
        let cells = triangles
            .iter()
            .map(|t| t.to_vec())
            .chain(quads.iter().map(|q| q.to_vec()));
        for cell in cells {
            for k in 0..cell.len() {
                let (a, b) = (cell[k], cell[(k + 1) % cell.len()]);
                *usage.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        usage
    }

    /// Interior edges of a strip appear twice, boundary edges once.
    fn assert_strip(previous: &[u32], next: &[u32], cells: &StitchedCells) {
        let usage = edge_usage(&cells.triangles, &cells.quads);
        for pair in previous.windows(2).chain(next.windows(2)) {
            let key = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            assert_eq!(usage.get(&key), Some(&1), "ring edge {key:?}");
        }
        let boundary = (previous.len() - 1) + (next.len() - 1) + 2;
        let single = usage.values().filter(|&&n| n == 1).count();
        assert_eq!(single, boundary);
        assert!(usage.values().all(|&n| n <= 2));
    }

    #[test]
    fn test_pole_fan() {
        let next: Vec<u32> = (1..=10).collect();
        let cells = stitch_rings(&[0], &next, 9, CellType::Tri).unwrap();
        assert_eq!(cells.triangles.len(), 9);
        assert!(cells.triangles.iter().all(|t| t[0] == 0));
    }

    #[test]
    fn test_grow_one_edge_per_group() {
        let previous: Vec<u32> = (0..3).collect();
        let next: Vec<u32> = (3..8).collect();
        let cells = stitch_rings(&previous, &next, 2, CellType::Tri).unwrap();
        // a + b triangles per group
        assert_eq!(cells.triangles.len(), 2 * (1 + 2));
        assert_strip(&previous, &next, &cells);
    }

    #[test]
    fn test_grow_double_fan() {
        let previous: Vec<u32> = (0..3).collect();
        let next: Vec<u32> = (3..10).collect();
        let cells = stitch_rings(&previous, &next, 2, CellType::Tri).unwrap();
        assert_eq!(cells.triangles.len(), 2 * (1 + 3));
        assert_strip(&previous, &next, &cells);
    }

    #[test]
    fn test_shrink() {
        let previous: Vec<u32> = (0..7).collect();
        let next: Vec<u32> = (7..12).collect();
        let cells = stitch_rings(&previous, &next, 2, CellType::Tri).unwrap();
        assert_eq!(cells.triangles.len(), 2 * (3 + 2));
        assert_strip(&previous, &next, &cells);
    }

    #[test]
    fn test_shrink_into_pole() {
        let previous: Vec<u32> = (0..7).collect();
        let cells = stitch_rings(&previous, &[7], 3, CellType::Quad).unwrap();
        assert_eq!(cells.triangles.len(), 6);
        assert!(cells.quads.is_empty());
        assert!(cells.triangles.iter().all(|t| t[2] == 7));
    }

    #[test]
    fn test_constant_quads() {
        let previous: Vec<u32> = (0..5).collect();
        let next: Vec<u32> = (5..10).collect();
        let cells = stitch_rings(&previous, &next, 2, CellType::Quad).unwrap();
        assert!(cells.triangles.is_empty());
        assert_eq!(cells.quads.len(), 4);
        assert_eq!(cells.quads[0], [0, 1, 6, 5]);
        assert_strip(&previous, &next, &cells);
    }

    #[test]
    fn test_constant_triangles() {
        let previous: Vec<u32> = (0..5).collect();
        let next: Vec<u32> = (5..10).collect();
        let cells = stitch_rings(&previous, &next, 4, CellType::Tri).unwrap();
        assert_eq!(cells.triangles.len(), 8);
        assert_strip(&previous, &next, &cells);
    }

    #[test]
    fn test_rejects_bad_group_split() {
        let previous: Vec<u32> = (0..4).collect();
        let next: Vec<u32> = (4..9).collect();
        let err = stitch_rings(&previous, &next, 2, CellType::Tri).unwrap_err();
        assert!(matches!(err, InterfaceError::InvalidTopology { .. }));
    }

    #[test]
    fn test_rejects_two_poles() {
        assert!(stitch_rings(&[0], &[1], 1, CellType::Tri).is_err());
    }

    #[test]
    fn test_consecutive_distance_regular_ring() {
        let points = super::super::ring_points(0.0, 3.0, 13);
        assert!(consecutive_distance_deviation(&points).is_none());
    }

    #[test]
    fn test_consecutive_distance_detects_outlier() {
        let mut points = super::super::ring_points(0.0, 1.0, 5);
        points[3].z += 0.1;
        let (position, deviation) = consecutive_distance_deviation(&points).unwrap();
        assert!(position == 2 || position == 3);
        assert!(deviation > 1e-3);
    }
}
