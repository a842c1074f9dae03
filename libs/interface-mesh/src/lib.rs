//! # Interface Mesh
//!
//! Surface mesh generation for rotational (sliding) interfaces.
//! Revolves a 2D meridional profile about an axis into a closed surface of
//! triangles and quads, then places it in the requested frame.
//!
//! ## Architecture
//!
//! ```text
//! profile (text) → spacing → distribution → curve mesher
//!                → revolver + stitcher (per zone) → assembler → placement → export
//! ```
//!
//! ## Stages
//!
//! - **Profile**: segment parsing, validation, kind and zone classification
//! - **Spacing**: per-segment stretching laws and 1D distributions
//! - **Curve**: spline or linear placement of stations along a segment
//! - **Revolve**: rings with adaptive density, stitched into cells
//! - **Assemble**: zone concatenation and mirroring into the closed surface
//! - **Export**: neutral text formats keyed by extension
//!
//! ## Usage
//!
//! ```rust
//! use interface_mesh::{generate_from_profile, InterfaceConfig, Profile};
//!
//! let profile: Profile = "0 0\n0 1\n\n0 1\n1 1\n\n1 1\n1 0\n".parse().unwrap();
//! let config = InterfaceConfig::from_json_str(r#"{"general": {"inputProfile": "rect.txt"}}"#).unwrap();
//!
//! let report = generate_from_profile(&profile, &config).unwrap();
//! assert!(report.mesh.cell_count() > 0);
//! ```

pub mod assemble;
pub mod curve;
pub mod diagnostic;
pub mod error;
pub mod export;
pub mod mesh;
pub mod pipeline;
pub mod profile;
pub mod revolve;
pub mod settings;
pub mod spacing;
pub mod transform;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{InterfaceError, Result};
pub use export::{export_mesh, read_mesh, FormatRegistry, MeshFormat};
pub use mesh::InterfaceMesh;
pub use pipeline::{generate_from_profile, generate_interface, GenerationReport, ZoneSummary};
pub use profile::Profile;
pub use settings::InterfaceConfig;
pub use transform::Placement;
