//! # gsd-core: Foundational Types for the Grundschutz++ Dashboard
//!
//! Every other crate in the workspace depends on `gsd-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `ControlStatus` enum.** The three stored status literals
//!    (`erfuellt`, `nicht_erfuellt`, `entbehrlich`) are defined once.
//!    "Unset" is never a variant: it is the absence of a [`StatusRecord`],
//!    modelled as `Option<ControlStatus>`.
//!
//! 2. **Validation lives in front of the store.** [`StatusUpdate::validate()`]
//!    is the only gate that rejects blank names and blank notes. The store
//!    persists whatever it is handed.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] reads both the SQLite
//!    `CURRENT_TIMESTAMP` shape and RFC 3339.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gsd-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

#![forbid(unsafe_code)]

pub mod error;
pub mod record;
pub mod status;
pub mod temporal;
pub mod update;

// Re-export primary types for ergonomic imports.
pub use error::{GsdError, ValidationError};
pub use record::{StatusEntry, StatusLookup, StatusRecord};
pub use status::{ControlStatus, StatusFilter, UNSET_LABEL};
pub use temporal::Timestamp;
pub use update::StatusUpdate;
