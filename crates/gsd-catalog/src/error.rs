//! # Catalog Errors
//!
//! Two failure classes halt catalog processing: the file could not be
//! turned into a [`crate::CatalogDocument`] (`Load`), or the parsed document
//! could not be flattened (`Processing`).

use std::path::PathBuf;

use thiserror::Error;

/// Checklist shown to the user when the catalog cannot be loaded.
pub const LOAD_GUIDANCE: &str = "Please check that:\n  \
    1. the catalog file exists at the configured path\n  \
    2. the file is a valid JSON (or YAML) catalog document\n  \
    3. you have read permission for the file";

/// Error raised while loading or flattening a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The source document could not be read or parsed.
    #[error("cannot load catalog '{}': {cause}", path.display())]
    Load {
        /// Path of the catalog file.
        path: PathBuf,
        /// What went wrong.
        cause: LoadCause,
    },

    /// The document parsed but could not be flattened.
    #[error("catalog processing failed: {0}")]
    Processing(String),
}

impl CatalogError {
    /// User-facing guidance for this error, if any.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::Load { .. } => Some(LOAD_GUIDANCE),
            Self::Processing(_) => None,
        }
    }
}

/// Reason a catalog file could not be loaded.
#[derive(Error, Debug)]
pub enum LoadCause {
    /// No file at the given path.
    #[error("file not found")]
    Missing,

    /// The process may not read the file.
    #[error("permission denied")]
    PermissionDenied,

    /// Any other read failure.
    #[error("read failed: {0}")]
    Unreadable(#[source] std::io::Error),

    /// The content is not a catalog document.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<std::io::Error> for LoadCause {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::Missing,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Unreadable(err),
        }
    }
}
