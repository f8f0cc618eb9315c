//! # gsd-store: Status Persistence
//!
//! SQLite-backed [`StatusStore`]: one row per control in `control_status`,
//! one row per name in `users`. Opening a database runs the additive
//! migrations in `schema` so files from older releases keep working.
//!
//! ## Crate Policy
//!
//! - Depends only on `gsd-core` internally.
//! - No `unsafe` code.
//! - Every write is a single atomic replace-or-insert; no retries.

#![forbid(unsafe_code)]

mod error;
mod schema;
mod store;

pub use error::StoreError;
pub use store::StatusStore;

/// Default database file name.
pub const DEFAULT_DATABASE_FILE: &str = "grundschutz_status.db";

/// Default number of names offered as suggestions.
pub const DEFAULT_RECENT_NAMES: usize = 10;
