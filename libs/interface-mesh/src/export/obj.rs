//! Wavefront OBJ: `v` lines and 1-based `f` lines.

use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use glam::DVec3;
use std::io::{self, Write};

use super::{next_number, MeshFormat};

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjFormat;

impl MeshFormat for ObjFormat {
    fn name(&self) -> &'static str {
        "obj"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["obj"]
    }

    fn write(&self, mesh: &InterfaceMesh, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# rotational interface")?;
        for p in mesh.points() {
            writeln!(out, "v {:e} {:e} {:e}", p.x, p.y, p.z)?;
        }
        for t in mesh.triangles() {
            writeln!(out, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
        }
        for q in mesh.quads() {
            writeln!(out, "f {} {} {} {}", q[0] + 1, q[1] + 1, q[2] + 1, q[3] + 1)?;
        }
        Ok(())
    }

    fn read(&self, text: &str) -> Result<InterfaceMesh> {
        let mut mesh = InterfaceMesh::new();
        for (number, line) in text.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let x = next_number::<f64>(&mut tokens)?;
                    let y = next_number::<f64>(&mut tokens)?;
                    let z = next_number::<f64>(&mut tokens)?;
                    mesh.add_point(DVec3::new(x, y, z));
                }
                Some("f") => {
                    // "7/2/5" keeps only the vertex index
                    let nodes = tokens
                        .map(|t| t.split('/').next().unwrap_or(t))
                        .map(|t| face_index(t, number + 1))
                        .collect::<Result<Vec<u32>>>()?;
                    match nodes.as_slice() {
                        &[a, b, c] => mesh.add_triangle([a, b, c]),
                        &[a, b, c, d] => mesh.add_quad([a, b, c, d]),
                        _ => {
                            return Err(InterfaceError::invalid_mesh_file(format!(
                                "line {}: faces need 3 or 4 nodes",
                                number + 1
                            )))
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(mesh)
    }
}

fn face_index(token: &str, line: usize) -> Result<u32> {
    token
        .parse::<u32>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .ok_or_else(|| InterfaceError::invalid_mesh_file(format!("line {line}: bad face index '{token}'")))
}
