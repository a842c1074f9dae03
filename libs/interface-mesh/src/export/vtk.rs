//! Legacy VTK ASCII unstructured grid.

use super::{next_number, MeshFormat};
use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use glam::DVec3;
use std::io::{self, Write};

const VTK_TRIANGLE: u32 = 5;
const VTK_QUAD: u32 = 9;

#[derive(Debug, Clone, Copy, Default)]
pub struct VtkFormat;

impl MeshFormat for VtkFormat {
    fn name(&self) -> &'static str {
        "vtk"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["vtk"]
    }

    fn write(&self, mesh: &InterfaceMesh, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# vtk DataFile Version 3.0")?;
        writeln!(out, "rotational interface")?;
        writeln!(out, "ASCII")?;
        writeln!(out, "DATASET UNSTRUCTURED_GRID")?;

        writeln!(out, "POINTS {} double", mesh.point_count())?;
        for p in mesh.points() {
            writeln!(out, "{:e} {:e} {:e}", p.x, p.y, p.z)?;
        }

        let size = mesh.triangle_count() * 4 + mesh.quad_count() * 5;
        writeln!(out, "CELLS {} {size}", mesh.cell_count())?;
        for t in mesh.triangles() {
            writeln!(out, "3 {} {} {}", t[0], t[1], t[2])?;
        }
        for q in mesh.quads() {
            writeln!(out, "4 {} {} {} {}", q[0], q[1], q[2], q[3])?;
        }

        writeln!(out, "CELL_TYPES {}", mesh.cell_count())?;
        for _ in mesh.triangles() {
            writeln!(out, "{VTK_TRIANGLE}")?;
        }
        for _ in mesh.quads() {
            writeln!(out, "{VTK_QUAD}")?;
        }
        Ok(())
    }

    fn read(&self, text: &str) -> Result<InterfaceMesh> {
        let mut tokens = text
            .lines()
            .skip_while(|l| !l.trim_start().starts_with("POINTS"))
            .flat_map(str::split_whitespace);

        expect_keyword(&mut tokens, "POINTS")?;
        let point_count: usize = next_number(&mut tokens)?;
        tokens.next(); // scalar type

        let mut mesh = InterfaceMesh::new();
        for _ in 0..point_count {
            let x = next_number::<f64>(&mut tokens)?;
            let y = next_number::<f64>(&mut tokens)?;
            let z = next_number::<f64>(&mut tokens)?;
            mesh.add_point(DVec3::new(x, y, z));
        }

        expect_keyword(&mut tokens, "CELLS")?;
        let cell_count: usize = next_number(&mut tokens)?;
        let _size: usize = next_number(&mut tokens)?;
        for _ in 0..cell_count {
            match next_number::<usize>(&mut tokens)? {
                3 => {
                    let mut cell = [0u32; 3];
                    for slot in &mut cell {
                        *slot = next_number(&mut tokens)?;
                    }
                    mesh.add_triangle(cell);
                }
                4 => {
                    let mut cell = [0u32; 4];
                    for slot in &mut cell {
                        *slot = next_number(&mut tokens)?;
                    }
                    mesh.add_quad(cell);
                }
                n => {
                    return Err(InterfaceError::invalid_mesh_file(format!(
                        "unsupported cell with {n} nodes"
                    )))
                }
            }
        }
        Ok(mesh)
    }
}

fn expect_keyword<'a>(tokens: &mut impl Iterator<Item = &'a str>, keyword: &str) -> Result<()> {
    match tokens.next() {
        Some(token) if token == keyword => Ok(()),
        Some(token) => Err(InterfaceError::invalid_mesh_file(format!(
            "expected {keyword}, found '{token}'"
        ))),
        None => Err(InterfaceError::invalid_mesh_file(format!("missing {keyword} section"))),
    }
}
