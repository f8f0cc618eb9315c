//! # Catalog Loader
//!
//! Reads a catalog file from disk and parses it into a [`CatalogDocument`].
//! The format is chosen from the file extension: `.yaml`/`.yml` for YAML,
//! anything else is parsed as JSON.
//!
//! Loading is all-or-nothing. A document that fails to parse produces a
//! [`CatalogError::Load`] and nothing downstream runs.

use std::path::{Path, PathBuf};

use crate::document::CatalogDocument;
use crate::error::{CatalogError, LoadCause};

/// Loads catalog documents from a fixed path.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] with cause `Missing`,
    /// `PermissionDenied`, `Unreadable`, or `InvalidFormat`.
    pub fn load(&self) -> Result<CatalogDocument, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| self.fail(e.into()))?;
        let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let document = match ext {
            "yaml" | "yml" => parse_yaml(content),
            _ => parse_json(content),
        }
        .map_err(|cause| self.fail(cause))?;

        tracing::debug!(
            path = %self.path.display(),
            groups = document.catalog.groups.len(),
            "catalog document parsed"
        );
        Ok(document)
    }

    fn fail(&self, cause: LoadCause) -> CatalogError {
        CatalogError::Load {
            path: self.path.clone(),
            cause,
        }
    }
}

/// Parse a catalog document from JSON text.
pub fn parse_json(content: &str) -> Result<CatalogDocument, LoadCause> {
    serde_json::from_str(content).map_err(|e| LoadCause::InvalidFormat(format!("invalid JSON: {e}")))
}

/// Parse a catalog document from YAML text.
pub fn parse_yaml(content: &str) -> Result<CatalogDocument, LoadCause> {
    serde_yaml::from_str(content).map_err(|e| LoadCause::InvalidFormat(format!("invalid YAML: {e}")))
}
