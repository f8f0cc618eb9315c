//! # gsd-cli: The `gsd` Command
//!
//! Terminal interface to the Grundschutz++ dashboard. Every subcommand
//! loads the catalog through the process-wide cache, reads statuses from
//! the SQLite store, and prints German-language output.
//!
//! ## Subcommands
//!
//! - `gsd summary`: totals, per-status shares, completion progress.
//! - `gsd dashboard`: stored status distribution and recent updates.
//! - `gsd controls`: filtered control list.
//! - `gsd show <ID>`: one control in full, with name suggestions.
//! - `gsd set <ID>`: validate and save a status.
//! - `gsd names`: recently used names.
//! - `gsd export`: CSV export of the filtered list.
//! - `gsd options`: values accepted by the filters.
//! - `gsd reset`: delete all statuses (two-step confirmation).
//!
//! ```bash
//! gsd controls --group "Organisation und Personal" --status "Ohne Status"
//! gsd set ORP.1.A1 --status erfuellt --notes "Richtlinie v3, Abschnitt 2" --by "Jana"
//! gsd export --class Basis --output basis.csv
//! ```
//!
//! ## Exit codes
//!
//! `0` success, `1` failure or declined action, `2` rejected input
//! (validation error).

pub mod config;
pub mod controls;
pub mod export;
pub mod overview;
pub mod reset;
pub mod session;
pub mod status;

use gsd_core::{ControlStatus, UNSET_LABEL};

/// Exit code for input rejected by validation.
pub const EXIT_INVALID: u8 = 2;

/// German display label for an optional status.
pub fn status_label(status: Option<ControlStatus>) -> &'static str {
    status.map_or(UNSET_LABEL, |s| s.label())
}
