//! JSON dump of the mesh arrays.

use super::MeshFormat;
use crate::error::Result;
use crate::mesh::InterfaceMesh;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl MeshFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn write(&self, mesh: &InterfaceMesh, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, mesh).map_err(io::Error::from)?;
        writeln!(out)
    }

    fn read(&self, text: &str) -> Result<InterfaceMesh> {
        let mesh: InterfaceMesh = serde_json::from_str(text)?;
        Ok(mesh)
    }
}
