//! # Interface Mesh
//!
//! Combined surface mesh: points plus a triangle block and a quad block.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// A mixed triangle/quad surface mesh.
///
/// # Example
///
/// ```rust
/// use interface_mesh::InterfaceMesh;
/// use glam::DVec3;
///
/// let mut mesh = InterfaceMesh::new();
/// mesh.add_point(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_point(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_point(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle([0, 1, 2]);
/// assert_eq!(mesh.cell_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMesh {
    points: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    quads: Vec<[u32; 4]>,
}

impl InterfaceMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from raw parts.
    pub fn from_parts(points: Vec<DVec3>, triangles: Vec<[u32; 3]>, quads: Vec<[u32; 4]>) -> Self {
        Self {
            points,
            triangles,
            quads,
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Triangles plus quads.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds a point and returns its index.
    pub fn add_point(&mut self, position: DVec3) -> u32 {
        let index = self.points.len() as u32;
        self.points.push(position);
        index
    }

    pub fn add_triangle(&mut self, triangle: [u32; 3]) {
        self.triangles.push(triangle);
    }

    pub fn add_quad(&mut self, quad: [u32; 4]) {
        self.quads.push(quad);
    }

    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn quads(&self) -> &[[u32; 4]] {
        &self.quads
    }

    #[inline]
    pub fn point(&self, index: u32) -> DVec3 {
        self.points[index as usize]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.points.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.points[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Transforms all points by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for p in &mut self.points {
            *p = matrix.transform_point3(*p);
        }
    }

    /// Sum of the cell areas; quads are split along their first diagonal.
    pub fn surface_area(&self) -> f64 {
        let area = |a: u32, b: u32, c: u32| {
            let (a, b, c) = (self.point(a), self.point(b), self.point(c));
            0.5 * (b - a).cross(c - a).length()
        };
        let triangles: f64 = self.triangles.iter().map(|t| area(t[0], t[1], t[2])).sum();
        let quads: f64 = self
            .quads
            .iter()
            .map(|q| area(q[0], q[1], q[2]) + area(q[0], q[2], q[3]))
            .sum();
        triangles + quads
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All cell indices are valid
    /// - No cell repeats a point index
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let count = self.points.len() as u32;
        let cell_ok = |cell: &[u32]| {
            cell.iter().all(|&i| i < count)
                && cell
                    .iter()
                    .enumerate()
                    .all(|(k, i)| !cell[k + 1..].contains(i))
        };
        self.triangles.iter().all(|t| cell_ok(&t[..])) && self.quads.iter().all(|q| cell_ok(&q[..]))
    }

    /// Counts how often each undirected edge is used by a cell.
    ///
    /// A closed, manifold surface uses every edge exactly twice.
    pub fn edge_usage(&self) -> std::collections::HashMap<(u32, u32), usize> {
        let mut usage = std::collections::HashMap::new();
        let mut add = |cell: &[u32]| {
            for k in 0..cell.len() {
                let a = cell[k];
                let b = cell[(k + 1) % cell.len()];
                *usage.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        };
        for t in &self.triangles {
            add(&t[..]);
        }
        for q in &self.quads {
            add(&q[..]);
        }
        usage
    }
}
