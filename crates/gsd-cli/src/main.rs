//! # gsd CLI entry point
//!
//! Parses command-line arguments, resolves the configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gsd_cli::config::{DashboardConfig, PathOverrides};
use gsd_cli::controls::{run_controls, run_options, run_show, ControlsArgs, ShowArgs};
use gsd_cli::export::{run_export, ExportArgs};
use gsd_cli::overview::{run_dashboard, run_summary, DashboardArgs, SummaryArgs};
use gsd_cli::reset::{run_reset, ResetArgs};
use gsd_cli::session::Session;
use gsd_cli::status::{run_names, run_set, NamesArgs, SetArgs};

/// Grundschutz++ compliance dashboard
///
/// Browse the Grundschutz++ catalog, record the status of each control,
/// follow overall progress and export the result as CSV.
#[derive(Parser, Debug)]
#[command(name = "gsd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (JSON or YAML).
    #[arg(long, global = true, env = "GSD_CATALOG")]
    catalog: Option<PathBuf>,

    /// SQLite status database.
    #[arg(long, global = true, env = "GSD_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Totals, per-status shares and completion progress.
    Summary(SummaryArgs),

    /// Stored status distribution and the most recent updates.
    Dashboard(DashboardArgs),

    /// List controls matching the given filters.
    Controls(ControlsArgs),

    /// Show one control with its texts, status and name suggestions.
    Show(ShowArgs),

    /// Set the status of a control.
    Set(SetArgs),

    /// List recently used names.
    Names(NamesArgs),

    /// Export the filtered control list as CSV.
    Export(ExportArgs),

    /// List the values accepted by the filters.
    Options,

    /// Delete all status records.
    Reset(ResetArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level; RUST_LOG applies without -v.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("gsd CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let overrides = PathOverrides {
        catalog: cli.catalog,
        database: cli.database,
    };
    let config = match DashboardConfig::resolve(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let session = Session::new(config);

    let result = match &cli.command {
        Commands::Summary(args) => run_summary(args, &session),
        Commands::Dashboard(args) => run_dashboard(args, &session),
        Commands::Controls(args) => run_controls(args, &session),
        Commands::Show(args) => run_show(args, &session),
        Commands::Set(args) => run_set(args, &session),
        Commands::Names(args) => run_names(args, &session),
        Commands::Export(args) => run_export(args, &session),
        Commands::Options => run_options(&session),
        Commands::Reset(args) => run_reset(args, &session),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
