//! Atomic file replacement: write a hidden sibling, then rename it over the
//! target.

use crate::error::{InterfaceError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Writes `path` through `write`. On any failure the partial file is removed
/// and the target is left untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let partial = partial_path(path);

    let outcome = (|| -> io::Result<()> {
        let file = File::create(&partial)?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        fs::rename(&partial, path)
    })();

    outcome.map_err(|source| {
        // Best effort: the partial file may not exist yet
        let _ = fs::remove_file(&partial);
        InterfaceError::ExportWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_and_renames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dat");
        write_atomic(&path, |w| w.write_all(b"hello")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dat");
        let err = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "writer failed"))
        })
        .unwrap_err();
        assert!(matches!(err, InterfaceError::ExportWrite { .. }));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dat");
        assert!(write_atomic(&path, |w| w.write_all(b"x")).is_err());
    }
}
