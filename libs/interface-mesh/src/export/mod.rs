//! # Mesh Export
//!
//! Writers (and readers) for the assembled interface mesh. Formats are looked
//! up by lowercase file extension in a [`FormatRegistry`].
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `dat` | Tecplot finite-element text (default) |
//! | `vtk` | Legacy VTK ASCII unstructured grid |
//! | `obj` | Wavefront OBJ |
//! | `json` | Plain JSON `{points, triangles, quads}` |
//!
//! Output files are replaced atomically.

mod atomic;
mod dat;
mod json;
mod obj;
mod vtk;

pub use atomic::write_atomic;
pub use dat::DatFormat;
pub use json::JsonFormat;
pub use obj::ObjFormat;
pub use vtk::VtkFormat;

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::error::{InterfaceError, Result};
use crate::mesh::InterfaceMesh;
use config::constants::DEFAULT_OUTPUT_EXTENSION;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A text mesh format.
pub trait MeshFormat: Send + Sync {
    /// Short format name for logs.
    fn name(&self) -> &'static str;

    /// Lowercase extensions handled by this format.
    fn extensions(&self) -> &'static [&'static str];

    /// Serializes `mesh` into `out`.
    fn write(&self, mesh: &InterfaceMesh, out: &mut dyn Write) -> io::Result<()>;

    /// Parses a mesh previously written by [`MeshFormat::write`].
    fn read(&self, text: &str) -> Result<InterfaceMesh>;
}

/// Extension-keyed set of mesh formats.
pub struct FormatRegistry {
    formats: Vec<Box<dyn MeshFormat>>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Registry with every built-in format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DatFormat));
        registry.register(Box::new(VtkFormat));
        registry.register(Box::new(ObjFormat));
        registry.register(Box::new(JsonFormat));
        registry
    }

    /// Adds a format. Later registrations win for a shared extension.
    pub fn register(&mut self, format: Box<dyn MeshFormat>) {
        self.formats.insert(0, format);
    }

    /// Finds the format for `extension`, ignoring case.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` when no registered format handles the extension.
    pub fn lookup(&self, extension: &str) -> Result<&dyn MeshFormat> {
        let extension = extension.to_ascii_lowercase();
        self.formats
            .iter()
            .find(|f| f.extensions().contains(&extension.as_str()))
            .map(|f| &**f)
            .ok_or(InterfaceError::UnsupportedFormat { extension })
    }

    /// Every registered extension.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.formats
            .iter()
            .flat_map(|f| f.extensions().iter().copied())
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Writes `mesh` to `path`, choosing the format by extension.
///
/// When the extension has no writer, an `UnsupportedFormat` warning is
/// reported and the mesh is written as `.dat` next to the requested path.
/// Returns the path actually written.
///
/// # Errors
///
/// - `UnsupportedFormat` if even the default writer is missing from the
///   registry
/// - `ExportWrite` if the file cannot be written; no partial output remains
pub fn export_mesh(
    mesh: &InterfaceMesh,
    path: &Path,
    registry: &FormatRegistry,
    diagnostics: &mut Diagnostics,
) -> Result<PathBuf> {
    let extension = extension_of(path);
    let (format, target) = match registry.lookup(&extension) {
        Ok(format) => (format, path.to_path_buf()),
        Err(InterfaceError::UnsupportedFormat { extension }) => {
            diagnostics.warning(DiagnosticKind::UnsupportedFormat {
                extension,
                substitute: DEFAULT_OUTPUT_EXTENSION.to_string(),
            });
            (
                registry.lookup(DEFAULT_OUTPUT_EXTENSION)?,
                path.with_extension(DEFAULT_OUTPUT_EXTENSION),
            )
        }
        Err(err) => return Err(err),
    };

    write_atomic(&target, |out| format.write(mesh, out))?;
    tracing::info!(
        path = %target.display(),
        format = format.name(),
        points = mesh.point_count(),
        cells = mesh.cell_count(),
        "mesh exported"
    );
    Ok(target)
}

/// Reads a mesh file back, choosing the format by extension.
///
/// # Errors
///
/// - `UnsupportedFormat` for an unknown extension
/// - `Io` if the file cannot be read
/// - `InvalidMeshFile` or `Json` if the content does not parse
pub fn read_mesh(path: &Path, registry: &FormatRegistry) -> Result<InterfaceMesh> {
    let format = registry.lookup(&extension_of(path))?;
    let text = std::fs::read_to_string(path).map_err(|e| InterfaceError::io(path, e))?;
    format.read(&text)
}

/// Pulls the next whitespace token and parses it.
pub(crate) fn next_number<'a, T: FromStr>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<T> {
    let token = tokens
        .next()
        .ok_or_else(|| InterfaceError::invalid_mesh_file("unexpected end of file"))?;
    token
        .parse()
        .map_err(|_| InterfaceError::invalid_mesh_file(format!("invalid number '{token}'")))
}
