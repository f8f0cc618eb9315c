//! # Browsing Commands
//!
//! `gsd controls` lists the filtered catalog, `gsd show` prints one
//! control in full, `gsd options` lists the values the filters accept.

use anyhow::{Context, Result};
use clap::Args;

use gsd_core::{StatusFilter, StatusLookup};
use gsd_report::{FilterOptions, FilterSpec};

use crate::session::Session;
use crate::status_label;

/// Filter flags shared by `controls` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only controls of this group (exact title; "Alle" for no filter).
    #[arg(long)]
    pub group: Option<String>,

    /// Only controls of this class. Repeatable; any listed class matches.
    #[arg(long = "class", value_name = "CLASS")]
    pub classes: Vec<String>,

    /// Status literal or label, "Ohne Status" for unset, "Alle" for no filter.
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Only controls with this effort level. Repeatable.
    #[arg(long = "effort", value_name = "LEVEL")]
    pub effort_levels: Vec<String>,

    /// Case-insensitive text searched in id, title, statement and guidance.
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            group: self
                .group
                .clone()
                .filter(|g| !matches!(g.to_lowercase().as_str(), "alle" | "all")),
            classes: self.classes.iter().cloned().collect(),
            status: self.status.unwrap_or_default(),
            effort_levels: self.effort_levels.iter().cloned().collect(),
            search: self.search.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ControlsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the selected records as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Control id, e.g. ORP.1.A1.
    pub id: String,
}

/// Execute `gsd controls`.
pub fn run_controls(args: &ControlsArgs, session: &Session) -> Result<u8> {
    let catalog = session.catalog()?;
    let snapshot = session.store()?.snapshot().context("failed to read statuses")?;
    let spec = args.filters.to_spec();
    warn_unknown_values(&spec, &FilterOptions::from_records(&catalog.records));

    let selected = spec.apply(&catalog.records, &snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(0);
    }

    println!(
        "Kontrollen ({} von {} angezeigt)",
        selected.len(),
        catalog.total_controls
    );
    if selected.is_empty() {
        println!("Keine Kontrollen gefunden, die den ausgewählten Filtern entsprechen.");
        return Ok(0);
    }
    println!();
    for record in selected {
        println!(
            "{:<14} {:<14} {:<9} {:<4} {}",
            record.id,
            status_label(snapshot.status_of(&record.id)),
            record.class,
            record.effort_level,
            record.title
        );
    }
    Ok(0)
}

fn warn_unknown_values(spec: &FilterSpec, options: &FilterOptions) {
    if let Some(group) = &spec.group {
        if !options.groups.contains(group) {
            tracing::warn!(%group, "no group with this title; see `gsd options`");
        }
    }
    for class in spec.classes.iter().filter(|c| !options.classes.contains(c)) {
        tracing::warn!(%class, "no control has this class");
    }
    for level in spec
        .effort_levels
        .iter()
        .filter(|l| !options.effort_levels.contains(l))
    {
        tracing::warn!(%level, "no control has this effort level");
    }
}

/// Execute `gsd show`.
pub fn run_show(args: &ShowArgs, session: &Session) -> Result<u8> {
    let record = session.control(&args.id)?;
    let store = session.store()?;
    let stored = store.record(&record.id).context("failed to read status")?;
    let suggestions = store
        .name_suggestions(&record.id, session.config.recent_names_limit)
        .context("failed to read recent names")?;

    println!("{}: {}", record.id, record.title);
    match (&record.subgroup_title, &record.subgroup_id) {
        (Some(title), Some(id)) => {
            println!("Gruppe:       {} / {} ({id})", record.group_title, title)
        }
        _ => println!("Gruppe:       {}", record.group_title),
    }
    println!("Klasse:       {}", record.class);
    println!("Aufwand:      {}", record.effort_level);
    println!();
    println!("Anforderung:");
    println!("  {}", record.statement);
    if !record.guidance.is_empty() {
        println!();
        println!("Hinweise:");
        println!("  {}", record.guidance);
    }
    println!();
    println!("Status:       {}", status_label(stored.as_ref().and_then(|r| r.status)));
    if let Some(stored) = &stored {
        if !stored.notes.is_empty() {
            println!("Notizen:      {}", stored.notes);
        }
        if !stored.changed_by.is_empty() {
            println!("Geändert von: {}", stored.changed_by);
        }
        if let Some(at) = stored.updated_at {
            println!("Geändert am:  {}", at.to_iso8601());
        }
    }
    if !suggestions.is_empty() {
        println!("Namen:        {}", suggestions.join(", "));
    }
    Ok(0)
}

/// Execute `gsd options`.
pub fn run_options(session: &Session) -> Result<u8> {
    let catalog = session.catalog()?;
    let options = FilterOptions::from_records(&catalog.records);

    println!("Gruppen:");
    for group in &options.groups {
        println!("  {group}");
    }
    println!("Klassen:   {}", options.classes.join(", "));
    println!("Aufwand:   {}", options.effort_levels.join(", "));
    let statuses: Vec<&str> = gsd_core::ControlStatus::all()
        .iter()
        .map(|s| s.label())
        .chain([gsd_core::UNSET_LABEL])
        .collect();
    println!("Status:    Alle, {}", statuses.join(", "));
    Ok(0)
}
