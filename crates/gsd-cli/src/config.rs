//! # Dashboard Configuration
//!
//! Layers, lowest precedence first:
//!
//! 1. built-in defaults ([`DashboardConfig::default()`])
//! 2. a YAML file: `--config <file>`, or `gsd.yaml` in the working
//!    directory when present
//! 3. `GSD_CATALOG` / `GSD_DATABASE` environment variables
//! 4. `--catalog` / `--database` flags
//!
//! Layers 3 and 4 arrive already merged by clap (a flag beats its
//! environment variable) as [`PathOverrides`].
//!
//! ```yaml
//! catalog_path: /srv/gsd/Grundschutz++-Kompendium.json
//! database_path: /srv/gsd/grundschutz_status.db
//! recent_names_limit: 10
//! export_dir: exports
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Catalog file name looked up when nothing else is configured.
pub const DEFAULT_CATALOG_FILE: &str = "Grundschutz++-Kompendium.json";

/// Config file picked up from the working directory without `--config`.
pub const DEFAULT_CONFIG_FILE: &str = "gsd.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub catalog_path: PathBuf,
    pub database_path: PathBuf,
    /// Names offered as `changed_by` suggestions.
    pub recent_names_limit: usize,
    /// Entries in the dashboard's recent-updates feed.
    pub recent_updates_limit: usize,
    /// Directory for exports written without `--output`.
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            database_path: PathBuf::from(gsd_store::DEFAULT_DATABASE_FILE),
            recent_names_limit: gsd_store::DEFAULT_RECENT_NAMES,
            recent_updates_limit: 10,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Paths given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub catalog: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

impl DashboardConfig {
    /// Parse a YAML config file. Keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in config file: {}", path.display()))
    }

    /// Build the effective configuration from all layers.
    ///
    /// An explicit `config_file` must exist; the implicit
    /// [`DEFAULT_CONFIG_FILE`] is only read if it is there.
    pub fn resolve(config_file: Option<&Path>, overrides: &PathOverrides) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    tracing::debug!(path = %implicit.display(), "using config file from working directory");
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply(overrides);
        tracing::debug!(
            catalog = %config.catalog_path.display(),
            database = %config.database_path.display(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Apply path overrides on top of this configuration.
    pub fn apply(&mut self, overrides: &PathOverrides) {
        if let Some(catalog) = &overrides.catalog {
            self.catalog_path.clone_from(catalog);
        }
        if let Some(database) = &overrides.database {
            self.database_path.clone_from(database);
        }
    }
}
