//! Saving a converted artifact to disk.
//!
//! The write is atomic: payload bytes go into a named temp file created in
//! the target directory, which is then persisted into place under the
//! resolved filename. The temp file is a scoped resource — if anything
//! fails between acquisition and persist it is deleted when the handle
//! drops, so repeated conversions never leak partial files.

use crate::client::ConversionResult;
use crate::error::ConvertError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `result.payload` into `dir/{result.filename}` atomically.
///
/// Creates `dir` if it does not exist. Returns the final path.
pub fn save_to_dir(
    result: &ConversionResult,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, ConvertError> {
    let dir = dir.as_ref();
    let target = dir.join(&result.filename);

    std::fs::create_dir_all(dir).map_err(|e| ConvertError::OutputWriteFailed {
        path: target.clone(),
        source: e,
    })?;

    // Temp file in the same directory so the final rename stays on one
    // filesystem; dropped (and deleted) on any error below.
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| ConvertError::OutputWriteFailed {
            path: target.clone(),
            source: e,
        })?;

    tmp.write_all(&result.payload)
        .map_err(|e| ConvertError::OutputWriteFailed {
            path: target.clone(),
            source: e,
        })?;

    tmp.persist(&target)
        .map_err(|e| ConvertError::OutputWriteFailed {
            path: target.clone(),
            source: e.error,
        })?;

    info!("Saved {} bytes to {}", result.payload.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(filename: &str) -> ConversionResult {
        ConversionResult {
            payload: b"%PDF-1.7 fake".to_vec(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn saves_payload_under_resolved_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_to_dir(&result("report.pdf"), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("report.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 fake");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/converted");
        let path = save_to_dir(&result("report.pdf"), &nested).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.pdf"), b"old").unwrap();
        let path = save_to_dir(&result("report.pdf"), dir.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 fake");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        save_to_dir(&result("report.pdf"), dir.path()).unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("report.pdf")]);
    }
}
