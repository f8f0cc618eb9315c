//! # CSV Export
//!
//! One row per filtered control, joined with its current status. The
//! layout is fixed so spreadsheets built on earlier exports keep working:
//!
//! - UTF-8 with a leading byte-order mark (spreadsheet tools need it to
//!   detect the encoding of umlauts)
//! - `;` as delimiter, every field quoted
//! - header row [`EXPORT_HEADERS`]
//!
//! `Begründung`, `Verantwortlich` and `Termin` are always empty; they are
//! filled in by hand after export. Status records without a matching
//! catalog control are never exported.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use gsd_catalog::FlatControlRecord;
use gsd_core::{StatusLookup, Timestamp, UNSET_LABEL};

/// Byte-order mark written before the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column labels, in output order.
pub const EXPORT_HEADERS: [&str; 13] = [
    "ID",
    "Titel",
    "Gruppe",
    "Untergruppe",
    "Aufwand",
    "Anforderung",
    "Hinweise",
    "Klasse",
    "Status",
    "Begründung",
    "Notizen",
    "Verantwortlich",
    "Termin",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Default file name for an export taken at `at`.
pub fn export_file_name(at: &Timestamp) -> String {
    format!("grundschutz_export_{}.csv", at.to_file_stamp())
}

/// Write the export table to `out`. Returns the number of data rows.
pub fn write_csv<'a, W, I, L>(mut out: W, records: I, statuses: &L) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a FlatControlRecord>,
    L: StatusLookup + ?Sized,
{
    out.write_all(UTF8_BOM)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(EXPORT_HEADERS)?;
    let mut rows = 0;
    for record in records {
        let entry = statuses.lookup(&record.id);
        let status = entry.status.map_or(UNSET_LABEL, |s| s.as_str());
        writer.write_record([
            record.id.as_str(),
            record.title.as_str(),
            record.group_title.as_str(),
            record.subgroup_title.as_deref().unwrap_or(""),
            record.effort_level.as_str(),
            record.statement.as_str(),
            record.guidance.as_str(),
            record.class.as_str(),
            status,
            "",
            entry.notes.as_deref().unwrap_or(""),
            "",
            "",
        ])?;
        rows += 1;
    }
    writer.flush()?;

    tracing::info!(rows, "csv export written");
    Ok(rows)
}
