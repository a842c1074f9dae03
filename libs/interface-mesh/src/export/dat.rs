//! Tecplot-style finite-element text format.
//!
//! One `FEQUADRILATERAL` zone with point-packed coordinates and 1-based
//! connectivity. Triangles repeat their last node.

use super::{next_number, MeshFormat};
use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use glam::DVec3;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct DatFormat;

impl MeshFormat for DatFormat {
    fn name(&self) -> &'static str {
        "tecplot"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["dat"]
    }

    fn write(&self, mesh: &InterfaceMesh, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "TITLE = \"rotational interface\"")?;
        writeln!(out, "VARIABLES = \"X\" \"Y\" \"Z\"")?;
        writeln!(
            out,
            "ZONE N={}, E={}, DATAPACKING=POINT, ZONETYPE=FEQUADRILATERAL",
            mesh.point_count(),
            mesh.cell_count()
        )?;
        for p in mesh.points() {
            writeln!(out, "{:e} {:e} {:e}", p.x, p.y, p.z)?;
        }
        for t in mesh.triangles() {
            writeln!(out, "{} {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1, t[2] + 1)?;
        }
        for q in mesh.quads() {
            writeln!(out, "{} {} {} {}", q[0] + 1, q[1] + 1, q[2] + 1, q[3] + 1)?;
        }
        Ok(())
    }

    fn read(&self, text: &str) -> Result<InterfaceMesh> {
        let zone = text
            .lines()
            .find(|l| l.trim_start().starts_with("ZONE"))
            .ok_or_else(|| InterfaceError::invalid_mesh_file("missing ZONE header"))?;
        let points = zone_count(zone, "N=")?;
        let cells = zone_count(zone, "E=")?;

        let body = text
            .lines()
            .skip_while(|l| !l.trim_start().starts_with("ZONE"))
            .skip(1)
            .collect::<Vec<_>>()
            .join("\n");
        let mut tokens = body.split_whitespace();

        let mut mesh = InterfaceMesh::new();
        for _ in 0..points {
            let x = next_number::<f64>(&mut tokens)?;
            let y = next_number::<f64>(&mut tokens)?;
            let z = next_number::<f64>(&mut tokens)?;
            mesh.add_point(DVec3::new(x, y, z));
        }
        for _ in 0..cells {
            let mut cell = [0u32; 4];
            for slot in &mut cell {
                let index = next_number::<u32>(&mut tokens)?;
                *slot = index
                    .checked_sub(1)
                    .ok_or_else(|| InterfaceError::invalid_mesh_file("node indices are 1-based"))?;
            }
            if cell[2] == cell[3] {
                mesh.add_triangle([cell[0], cell[1], cell[2]]);
            } else {
                mesh.add_quad(cell);
            }
        }
        Ok(mesh)
    }
}

fn zone_count(header: &str, key: &str) -> Result<usize> {
    header
        .split(',')
        .map(str::trim)
        .find_map(|field| {
            field
                .split_whitespace()
                .find_map(|part| part.strip_prefix(key))
        })
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| InterfaceError::invalid_mesh_file(format!("ZONE header lacks {key}")))
}
