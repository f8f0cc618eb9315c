//! # gsd-report: Views Over the Control List
//!
//! Pure functions of `(flat control list, status lookup)`:
//!
//! - [`FilterSpec::apply()`] selects the controls shown,
//! - [`ProgressReport::compute()`] summarises the whole catalog,
//! - [`write_csv()`] serialises a selection for download.
//!
//! Statuses are read through [`gsd_core::StatusLookup`], so callers pass an
//! in-memory snapshot and nothing here touches the database.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No caching: every call recomputes from its inputs.

#![forbid(unsafe_code)]

pub mod export;
pub mod filter;
pub mod report;

pub use export::{export_file_name, write_csv, ExportError, EXPORT_HEADERS, UTF8_BOM};
pub use filter::{FilterOptions, FilterSpec};
pub use report::{percentage, ProgressReport, StatusShare};
