//! Integration test: run subcommand handlers against a temporary catalog
//! and database.

use std::path::Path;

use gsd_catalog::CatalogCache;
use gsd_cli::config::DashboardConfig;
use gsd_cli::controls::{run_controls, run_show, ControlsArgs, FilterArgs, ShowArgs};
use gsd_cli::export::{run_export, ExportArgs};
use gsd_cli::overview::{run_dashboard, run_summary, DashboardArgs, SummaryArgs};
use gsd_cli::reset::{run_reset_with, ResetArgs};
use gsd_cli::session::Session;
use gsd_cli::status::{run_names, run_set, NamesArgs, SetArgs};
use gsd_cli::EXIT_INVALID;
use gsd_core::{ControlStatus, StatusEntry};
use gsd_store::StatusStore;

const CATALOG: &str = r#"{
  "catalog": {
    "metadata": { "title": "Testkatalog", "version": "1", "last-modified": "2025-01-01" },
    "groups": [
      { "id": "ORP", "title": "Organisation",
        "controls": [
          { "id": "ORP.1.A1", "class": "Basis", "title": "Verantwortlichkeiten",
            "parts": [ { "name": "statement", "prose": "Die {{insert: param, rolle}} MUSS festlegen." } ],
            "params": [ { "id": "rolle", "label": "Leitung" } ] },
          { "id": "ORP.1.A2", "class": "Standard", "title": "Zuständigkeiten" }
        ] },
      { "id": "CON", "title": "Konzepte",
        "controls": [ { "id": "CON.3.A1", "class": "Basis", "title": "Datensicherung" } ] }
    ]
  }
}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    session: Session,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&catalog_path, CATALOG).unwrap();
        let config = DashboardConfig {
            catalog_path,
            database_path: dir.path().join("status.db"),
            export_dir: dir.path().join("exports"),
            ..DashboardConfig::default()
        };
        let cache: &'static CatalogCache = Box::leak(Box::new(CatalogCache::new()));
        Self {
            session: Session::with_cache(config, cache),
            _dir: dir,
        }
    }

    fn store(&self) -> StatusStore {
        StatusStore::open(&self.session.config.database_path).unwrap()
    }

    fn export_dir(&self) -> &Path {
        &self.session.config.export_dir
    }
}

fn set_args(id: &str, status: ControlStatus, notes: &str, by: &str) -> SetArgs {
    SetArgs {
        id: id.to_string(),
        status,
        notes: notes.to_string(),
        changed_by: by.to_string(),
    }
}

#[test]
fn set_saves_valid_update() {
    let fx = Fixture::new();
    let code = run_set(
        &set_args("ORP.1.A1", ControlStatus::Fulfilled, "Doc at /x", "  Alice "),
        &fx.session,
    )
    .unwrap();
    assert_eq!(code, 0);

    let entry = fx.store().get("ORP.1.A1").unwrap();
    assert_eq!(entry.status, Some(ControlStatus::Fulfilled));
    assert_eq!(entry.notes.as_deref(), Some("Doc at /x"));
    assert_eq!(entry.changed_by.as_deref(), Some("Alice"));
}

#[test]
fn set_rejects_missing_notes_without_writing() {
    let fx = Fixture::new();
    run_set(&set_args("ORP.1.A1", ControlStatus::NotFulfilled, "", "Bob"), &fx.session).unwrap();
    let before = fx.store().get("ORP.1.A1").unwrap();

    let code = run_set(
        &set_args("ORP.1.A1", ControlStatus::Fulfilled, "   ", "Bob"),
        &fx.session,
    )
    .unwrap();
    assert_eq!(code, EXIT_INVALID);
    assert_eq!(fx.store().get("ORP.1.A1").unwrap(), before);
}

#[test]
fn set_rejects_missing_name_without_writing() {
    let fx = Fixture::new();
    let code = run_set(
        &set_args("ORP.1.A2", ControlStatus::NotFulfilled, "", ""),
        &fx.session,
    )
    .unwrap();
    assert_eq!(code, EXIT_INVALID);
    assert_eq!(fx.store().get("ORP.1.A2").unwrap(), StatusEntry::default());
    assert!(fx.store().recent_names(10).unwrap().is_empty());
}

#[test]
fn set_unknown_control_is_error() {
    let fx = Fixture::new();
    let err = run_set(
        &set_args("NOPE.1", ControlStatus::NotFulfilled, "", "Bob"),
        &fx.session,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("NOPE.1"));
}

#[test]
fn read_only_commands_succeed() {
    let fx = Fixture::new();
    run_set(&set_args("CON.3.A1", ControlStatus::Dispensable, "kein Bedarf", "Eva"), &fx.session)
        .unwrap();

    assert_eq!(run_summary(&SummaryArgs { json: false }, &fx.session).unwrap(), 0);
    assert_eq!(run_summary(&SummaryArgs { json: true }, &fx.session).unwrap(), 0);
    assert_eq!(run_dashboard(&DashboardArgs { limit: None }, &fx.session).unwrap(), 0);
    assert_eq!(run_names(&NamesArgs { limit: Some(3) }, &fx.session).unwrap(), 0);
    assert_eq!(
        run_show(&ShowArgs { id: "ORP.1.A1".into() }, &fx.session).unwrap(),
        0
    );
    let controls = ControlsArgs {
        filters: FilterArgs {
            search: Some("leitung".into()),
            ..FilterArgs::default()
        },
        json: false,
    };
    assert_eq!(run_controls(&controls, &fx.session).unwrap(), 0);
}

#[test]
fn missing_catalog_is_error() {
    let fx = Fixture::new();
    std::fs::remove_file(&fx.session.config.catalog_path).unwrap();
    assert!(run_summary(&SummaryArgs { json: false }, &fx.session).is_err());
}

#[test]
fn export_writes_timestamped_file_with_filtered_rows() {
    let fx = Fixture::new();
    run_set(&set_args("ORP.1.A1", ControlStatus::Fulfilled, "Doc", "Alice"), &fx.session).unwrap();

    let args = ExportArgs {
        filters: FilterArgs {
            classes: vec!["Basis".into()],
            ..FilterArgs::default()
        },
        output: None,
    };
    assert_eq!(run_export(&args, &fx.session).unwrap(), 0);

    let files: Vec<_> = std::fs::read_dir(fx.export_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("grundschutz_export_") && name.ends_with(".csv"), "{name}");

    let bytes = std::fs::read(&files[0]).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("\"Die Leitung MUSS festlegen.\""));
    assert!(text.contains("\"erfuellt\""));
    assert!(text.contains("\"Ohne Status\""));
    assert!(!text.contains("ORP.1.A2"));
}

#[test]
fn export_with_empty_selection_writes_nothing() {
    let fx = Fixture::new();
    let out = fx.export_dir().join("leer.csv");
    let args = ExportArgs {
        filters: FilterArgs {
            search: Some("gibt es nicht".into()),
            ..FilterArgs::default()
        },
        output: Some(out.clone()),
    };
    assert_eq!(run_export(&args, &fx.session).unwrap(), 1);
    assert!(!out.exists());
}

#[test]
fn reset_needs_both_steps() {
    let fx = Fixture::new();
    run_set(&set_args("ORP.1.A2", ControlStatus::NotFulfilled, "", "Bob"), &fx.session).unwrap();

    let no_flag = ResetArgs { confirm: false, yes: false };
    assert_eq!(run_reset_with(&no_flag, &fx.session, &mut "ja\n".as_bytes()).unwrap(), 1);
    assert_eq!(fx.store().snapshot().unwrap().len(), 1);

    let flag = ResetArgs { confirm: true, yes: false };
    assert_eq!(run_reset_with(&flag, &fx.session, &mut "nein\n".as_bytes()).unwrap(), 1);
    assert_eq!(fx.store().snapshot().unwrap().len(), 1);

    assert_eq!(run_reset_with(&flag, &fx.session, &mut "ja\n".as_bytes()).unwrap(), 0);
    assert!(fx.store().snapshot().unwrap().is_empty());
    assert_eq!(fx.store().recent_names(10).unwrap(), ["Bob"]);
}

#[test]
fn reset_with_yes_skips_prompt() {
    let fx = Fixture::new();
    run_set(&set_args("ORP.1.A2", ControlStatus::NotFulfilled, "", "Bob"), &fx.session).unwrap();
    let args = ResetArgs { confirm: true, yes: true };
    assert_eq!(run_reset_with(&args, &fx.session, &mut "".as_bytes()).unwrap(), 0);
    assert!(fx.store().snapshot().unwrap().is_empty());
}
