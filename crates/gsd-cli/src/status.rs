//! # Status Commands
//!
//! `gsd set` is the only write path for statuses. It runs
//! [`StatusUpdate::validate()`] before the store is opened, so a rejected
//! update never reaches the database.

use anyhow::{Context, Result};
use clap::Args;

use gsd_core::{ControlStatus, StatusUpdate};

use crate::session::Session;
use crate::EXIT_INVALID;

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Control id, e.g. ORP.1.A1.
    pub id: String,

    /// New status: erfuellt, nicht_erfuellt, entbehrlich (or the German label).
    #[arg(long)]
    pub status: ControlStatus,

    /// Where the evidence is, or why the control is dispensable.
    /// Required for erfuellt and entbehrlich.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Name of the person making the change.
    #[arg(long = "by", value_name = "NAME", default_value = "")]
    pub changed_by: String,
}

#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Maximum number of names (default from config).
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Execute `gsd set`.
pub fn run_set(args: &SetArgs, session: &Session) -> Result<u8> {
    let record = session.control(&args.id)?;

    let update = StatusUpdate::new(&record.id, args.status, &args.notes, &args.changed_by);
    let update = match update.validate() {
        Ok(update) => update,
        Err(err) => {
            tracing::debug!(control_id = %record.id, %err, "status update rejected");
            eprintln!("error: {err}");
            return Ok(EXIT_INVALID);
        }
    };

    let mut store = session.store()?;
    store
        .save(
            &update.control_id,
            update.status,
            &update.notes,
            &update.changed_by,
        )
        .with_context(|| format!("failed to save status for {}", update.control_id))?;

    println!(
        "{}: {} (geändert von {})",
        update.control_id,
        update.status.label(),
        update.changed_by
    );
    Ok(0)
}

/// Execute `gsd names`.
pub fn run_names(args: &NamesArgs, session: &Session) -> Result<u8> {
    let limit = args.limit.unwrap_or(session.config.recent_names_limit);
    let names = session
        .store()?
        .recent_names(limit)
        .context("failed to read recent names")?;
    for name in names {
        println!("{name}");
    }
    Ok(0)
}
