// crates/scenario-harness-model/src/loader.rs
// ============================================================================
// Module: Description Loader
// Description: Reads service descriptions from TOML or JSON files.
// Purpose: Provide size-bounded, format-aware loading for generator inputs.
// Dependencies: serde_json, toml, thiserror, tracing
// ============================================================================

//! ## Overview
//! Service descriptions are stored as TOML or JSON. The format is chosen by
//! file extension unless the caller names it explicitly. Loading performs
//! parsing only; structural validation is left to [`crate::validate`].
//!
//! ### Security Posture
//! Input files are untrusted. Reads are capped at [`MAX_DESCRIPTION_BYTES`]
//! using both file metadata and a bounded reader.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::types::ServiceDescription;

// ============================================================================
// CONSTANTS: Input limits
// ============================================================================

/// Maximum description file size accepted by the loader.
pub const MAX_DESCRIPTION_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading a service description.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// IO error while reading the file.
    #[error("io error: {0}")]
    Io(String),
    /// File exceeds [`MAX_DESCRIPTION_BYTES`].
    #[error("description input exceeds {MAX_DESCRIPTION_BYTES} bytes")]
    TooLarge,
    /// Format could not be inferred from the path.
    #[error("cannot infer description format from {0}; use a .toml or .json file")]
    UnknownFormat(String),
    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(String),
    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(String),
}

// ============================================================================
// SECTION: Formats
// ============================================================================

/// On-disk encoding of a service description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl DescriptionFormat {
    /// Infers the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Returns a stable label for the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for DescriptionFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a service description from disk.
///
/// When `format` is `None` it is inferred from the file extension.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be read, exceeds
/// [`MAX_DESCRIPTION_BYTES`], has no recognizable format, or fails to parse.
pub fn load_description(
    path: impl AsRef<Path>,
    format: Option<DescriptionFormat>,
) -> Result<ServiceDescription, LoadError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => DescriptionFormat::from_path(path)
            .ok_or_else(|| LoadError::UnknownFormat(path.display().to_string()))?,
    };
    let bytes = read_description_bytes(path)?;
    let description = parse_description(&bytes, format)?;
    tracing::debug!(
        path = %path.display(),
        %format,
        methods = description.methods.len(),
        "loaded service description"
    );
    Ok(description)
}

/// Parses a service description from raw bytes.
///
/// # Errors
/// Returns [`LoadError::TooLarge`] for oversized input and
/// [`LoadError::Json`] or [`LoadError::Toml`] when parsing fails.
pub fn parse_description(
    bytes: &[u8],
    format: DescriptionFormat,
) -> Result<ServiceDescription, LoadError> {
    let size = u64::try_from(bytes.len()).map_err(|_| LoadError::TooLarge)?;
    if size > MAX_DESCRIPTION_BYTES {
        return Err(LoadError::TooLarge);
    }
    match format {
        DescriptionFormat::Json => {
            serde_json::from_slice(bytes).map_err(|err| LoadError::Json(err.to_string()))
        }
        DescriptionFormat::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|err| LoadError::Toml(err.to_string()))?;
            toml::from_str(text).map_err(|err| LoadError::Toml(err.to_string()))
        }
    }
}

/// Reads the description file with size limits to avoid memory exhaustion.
fn read_description_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    let file = fs::File::open(path).map_err(|err| LoadError::Io(err.to_string()))?;
    let metadata = file.metadata().map_err(|err| LoadError::Io(err.to_string()))?;
    if metadata.len() > MAX_DESCRIPTION_BYTES {
        return Err(LoadError::TooLarge);
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_DESCRIPTION_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(|err| LoadError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| LoadError::TooLarge)?;
    if size > MAX_DESCRIPTION_BYTES {
        return Err(LoadError::TooLarge);
    }
    Ok(bytes)
}
