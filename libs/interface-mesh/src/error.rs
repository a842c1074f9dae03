//! # Interface Errors
//!
//! Fatal error types for interface mesh generation. Non-fatal events are
//! reported through [`crate::diagnostic`] instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an interface generation run.
#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Profile text or profile topology is invalid
    #[error("Malformed profile{}: {message}", line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    MalformedProfile { message: String, line: Option<usize> },

    /// Stretching law of a segment is invalid
    #[error("Invalid spacing for segment {segment}: {message}")]
    InvalidSpacing { segment: usize, message: String },

    /// Configuration value is invalid or unsupported
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Invalid mesh topology
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// No writer is registered for an extension
    #[error("Unsupported mesh format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// Writing the output mesh failed
    #[error("Failed to write mesh to {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading an input file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A mesh file could not be parsed back
    #[error("Invalid mesh file: {message}")]
    InvalidMeshFile { message: String },
}

impl InterfaceError {
    /// Creates a malformed profile error.
    pub fn malformed(message: impl Into<String>, line: Option<usize>) -> Self {
        Self::MalformedProfile {
            message: message.into(),
            line,
        }
    }

    /// Creates an invalid spacing error for a segment.
    pub fn invalid_spacing(segment: usize, message: impl Into<String>) -> Self {
        Self::InvalidSpacing {
            segment,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates an invalid mesh file error.
    pub fn invalid_mesh_file(message: impl Into<String>) -> Self {
        Self::InvalidMeshFile {
            message: message.into(),
        }
    }

    /// Creates an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::constants::ConfigError> for InterfaceError {
    fn from(err: config::constants::ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InterfaceError>;
