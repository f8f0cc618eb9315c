//! # Overview Commands
//!
//! `gsd summary` reports progress over the whole catalog. `gsd dashboard`
//! shows what is stored in the database, independent of the catalog.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;

use gsd_core::ControlStatus;
use gsd_report::{percentage, ProgressReport};

use crate::session::Session;
use crate::status_label;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Number of recent updates to list (default from config).
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Execute `gsd summary`.
pub fn run_summary(args: &SummaryArgs, session: &Session) -> Result<u8> {
    let catalog = session.catalog()?;
    let snapshot = session.store()?.snapshot().context("failed to read statuses")?;
    let report = ProgressReport::compute(&catalog.records, &snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    if let Some(meta) = &catalog.metadata {
        println!("{} (Version {}, Stand {})", meta.title, meta.version, meta.last_modified);
    }
    println!(
        "Gruppen: {}  Kontrollen: {}",
        catalog.total_groups, catalog.total_controls
    );
    println!();
    println!("  {:<16}{:>6}", "Gesamt", report.total);
    for share in &report.shares {
        if report.total == 0 {
            println!("  {:<16}{:>6}", share.label(), 0);
        } else {
            println!(
                "  {:<16}{:>6} ({:.1}%)",
                share.label(),
                share.count,
                share.percentage
            );
        }
    }
    println!();
    println!(
        "Fortschritt: {:.1}% abgeschlossen ({} von {})",
        report.completion_ratio * 100.0,
        report.completed,
        report.total
    );
    Ok(0)
}

/// Execute `gsd dashboard`.
pub fn run_dashboard(args: &DashboardArgs, session: &Session) -> Result<u8> {
    let store = session.store()?;
    let limit = args.limit.unwrap_or(session.config.recent_updates_limit);
    let counts = store.status_counts().context("failed to count statuses")?;
    let updates = store.recent_updates(limit).context("failed to read recent updates")?;

    println!("Statusverteilung:");
    if counts.is_empty() {
        println!("  Noch keine Statusdaten vorhanden.");
    }
    for line in distribution_lines(&counts) {
        println!("{line}");
    }

    println!();
    println!("Letzte Aktualisierungen:");
    if updates.is_empty() {
        println!("  Keine Aktualisierungen vorhanden.");
    }
    for record in &updates {
        let when = record
            .updated_at
            .map(|ts| ts.to_iso8601())
            .unwrap_or_else(|| "-".to_string());
        let by = if record.changed_by.is_empty() {
            "-"
        } else {
            record.changed_by.as_str()
        };
        println!(
            "  {when}  {:<14} {:<14} {by}",
            record.control_id,
            status_label(record.status)
        );
    }
    Ok(0)
}

/// Lines of the stored status distribution: a total, then each status as
/// `count (pct%)` of that total. Empty when nothing is stored.
fn distribution_lines(counts: &BTreeMap<ControlStatus, usize>) -> Vec<String> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut lines = vec![format!("  {:<16}{:>6}", "Gesamt", total)];
    lines.extend(counts.iter().map(|(status, &count)| {
        format!(
            "  {:<16}{:>6} ({:.1}%)",
            status.label(),
            count,
            percentage(count, total)
        )
    }));
    lines
}
