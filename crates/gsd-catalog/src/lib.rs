//! # gsd-catalog: Catalog Loading and Flattening
//!
//! Turns a Grundschutz++ catalog file into the flat list of controls that
//! every view of the dashboard works on.
//!
//! ## Pipeline
//!
//! ```text
//! file ──CatalogLoader──▶ CatalogDocument ──flatten()──▶ FlatCatalog
//!                                │                           ▲
//!                                └──ParameterResolver────────┘
//!                                   (placeholders in prose)
//! ```
//!
//! [`load_flat_catalog()`] runs the whole pipeline; [`CatalogCache`] runs
//! it once per process.
//!
//! ## Crate Policy
//!
//! - Depends only on `gsd-core` internally.
//! - No `unsafe` code.
//! - Failures surface as [`CatalogError`]; nothing here panics on bad input.

#![forbid(unsafe_code)]

pub mod cache;
pub mod document;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod params;

use std::path::Path;

pub use cache::CatalogCache;
pub use document::{Catalog, CatalogDocument, CatalogMetadata, Control, Group, Parameter, Part, Property};
pub use error::{CatalogError, LoadCause, LOAD_GUIDANCE};
pub use flatten::{flatten, ControlKind, FlatCatalog, FlatControlRecord, EFFORT_NOT_AVAILABLE};
pub use loader::CatalogLoader;
pub use params::ParameterResolver;

/// Load a catalog file and flatten it.
///
/// # Errors
///
/// Returns [`CatalogError::Load`] if the file cannot be read or parsed and
/// [`CatalogError::Processing`] if it cannot be flattened.
pub fn load_flat_catalog(path: impl AsRef<Path>) -> Result<FlatCatalog, CatalogError> {
    let document = CatalogLoader::new(path).load()?;
    flatten(&document)
}
