// crates/scenario-harness-gen/src/output.rs
// ============================================================================
// Module: Harness Output Files
// Description: Atomic writes and drift checks for generated harness files.
// Purpose: Persist rendered harnesses and verify on-disk copies stay current.
// Dependencies: tempfile, thiserror, tracing
// ============================================================================

//! ## Overview
//! Generated harnesses are written through a uniquely named temporary file in
//! the destination directory, synced, and renamed into place so readers never
//! observe a partial file. [`check_output`] compares an existing file with
//! freshly rendered text and reports drift.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while writing or checking generated files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error while reading or writing files.
    #[error("io error: {0}")]
    Io(String),
    /// On-disk file differs from the generated text.
    #[error("harness drift detected for {path}. Run scenario-harness-gen generate.")]
    Drift {
        /// Path of the stale file.
        path: String,
    },
}

impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// ============================================================================
// SECTION: Write and Check
// ============================================================================

/// Writes the generated contents to the specified path.
///
/// Parent directories are created when missing. The contents are staged in a
/// hidden sibling file, synced, and renamed over `path`.
///
/// # Errors
/// Returns [`OutputError::Io`] when any filesystem step fails. The staged
/// file never outlives a failed write.
pub fn write_output(path: &Path, contents: &str) -> Result<(), OutputError> {
    let mut staged = stage_output(path)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| OutputError::Io(err.error.to_string()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote scenario harness");
    Ok(())
}

/// Compares the generated contents against the existing file.
///
/// # Errors
/// Returns [`OutputError::Io`] when the file cannot be read and
/// [`OutputError::Drift`] when its contents differ.
pub fn check_output(path: &Path, contents: &str) -> Result<(), OutputError> {
    let existing = fs::read_to_string(path)?;
    if existing != contents {
        tracing::warn!(path = %path.display(), "scenario harness drift detected");
        return Err(OutputError::Drift {
            path: path.display().to_string(),
        });
    }
    tracing::info!(path = %path.display(), "scenario harness is up to date");
    Ok(())
}

// ============================================================================
// SECTION: Staging
// ============================================================================

/// Creates the hidden staging file next to `path`, creating parents first.
///
/// The returned handle deletes the file when dropped unless it is persisted.
fn stage_output(path: &Path) -> Result<NamedTempFile, OutputError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| OutputError::Io("output path does not include a file name".to_string()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(&format!(".{file_name}.tmp."))
        .tempfile_in(parent)?;
    Ok(staged)
}
