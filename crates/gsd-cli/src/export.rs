//! # `gsd export`
//!
//! Writes the filtered control list as CSV. Without `--output` the file
//! lands in the configured export directory as
//! `grundschutz_export_<YYYYmmdd_HHMMSS>.csv`; `--output -` writes to
//! stdout.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gsd_core::Timestamp;
use gsd_report::{export_file_name, write_csv};

use crate::controls::FilterArgs;
use crate::session::Session;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output file, or `-` for stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute `gsd export`.
pub fn run_export(args: &ExportArgs, session: &Session) -> Result<u8> {
    let catalog = session.catalog()?;
    let snapshot = session.store()?.snapshot().context("failed to read statuses")?;
    let selected = args.filters.to_spec().apply(&catalog.records, &snapshot);

    if selected.is_empty() {
        eprintln!("Keine Daten zum Exportieren vorhanden.");
        return Ok(1);
    }

    let target = match &args.output {
        Some(path) if path.as_os_str() == "-" => {
            let stdout = std::io::stdout();
            write_csv(stdout.lock(), selected, &snapshot).context("failed to write CSV to stdout")?;
            return Ok(0);
        }
        Some(path) => path.clone(),
        None => {
            let dir = &session.config.export_dir;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create export directory: {}", dir.display()))?;
            dir.join(export_file_name(&Timestamp::now()))
        }
    };

    let file = File::create(&target)
        .with_context(|| format!("failed to create export file: {}", target.display()))?;
    let rows = write_csv(BufWriter::new(file), selected, &snapshot)
        .with_context(|| format!("failed to write export file: {}", target.display()))?;

    println!("{rows} Kontrollen exportiert: {}", target.display());
    Ok(0)
}
