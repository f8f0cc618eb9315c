//! Shared state for one `gsd` invocation: the resolved configuration,
//! the flattened catalog (loaded once per process) and the status store.

use anyhow::{Context, Result};

use gsd_catalog::{CatalogCache, FlatCatalog, FlatControlRecord};
use gsd_store::StatusStore;

use crate::config::DashboardConfig;

#[derive(Debug)]
pub struct Session {
    pub config: DashboardConfig,
    cache: &'static CatalogCache,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: CatalogCache::global(),
        }
    }

    /// Use a private cache instead of the process-wide one.
    pub fn with_cache(config: DashboardConfig, cache: &'static CatalogCache) -> Self {
        Self { config, cache }
    }

    /// The flattened catalog.
    ///
    /// Load failures print the troubleshooting checklist to stderr before
    /// the error is returned.
    pub fn catalog(&self) -> Result<&'static FlatCatalog> {
        self.cache
            .get_or_load(&self.config.catalog_path)
            .map_err(|err| {
                if let Some(guidance) = err.guidance() {
                    eprintln!("{guidance}");
                }
                anyhow::Error::new(err)
            })
    }

    /// Look up one control by id.
    pub fn control(&self, control_id: &str) -> Result<&'static FlatControlRecord> {
        self.catalog()?
            .get(control_id)
            .with_context(|| format!("control '{control_id}' is not in the catalog"))
    }

    /// Open the status database.
    pub fn store(&self) -> Result<StatusStore> {
        StatusStore::open(&self.config.database_path).with_context(|| {
            format!(
                "failed to open status database: {}",
                self.config.database_path.display()
            )
        })
    }
}
