//! # Process-Wide Catalog Cache
//!
//! The catalog is immutable for the life of the process, so it is loaded
//! and flattened once and shared by reference afterwards. Repeated calls
//! to [`CatalogCache::get_or_load()`] never touch the file again.
//!
//! A failed load is not cached: the next call retries.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::error::CatalogError;
use crate::flatten::FlatCatalog;

/// Load-once holder for a flattened catalog.
#[derive(Debug)]
pub struct CatalogCache {
    slot: OnceLock<(PathBuf, FlatCatalog)>,
    loading: Mutex<()>,
}

impl CatalogCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    /// The process-wide cache.
    pub fn global() -> &'static CatalogCache {
        static GLOBAL: CatalogCache = CatalogCache::new();
        &GLOBAL
    }

    /// The cached catalog, if one has been loaded.
    pub fn get(&self) -> Option<&FlatCatalog> {
        self.slot.get().map(|(_, flat)| flat)
    }

    /// Return the cached catalog, loading and flattening `path` on first use.
    ///
    /// Once a catalog is cached, later calls return it regardless of
    /// `path`; a different path is logged and ignored.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from loading or flattening. Nothing is
    /// cached in that case.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<&FlatCatalog, CatalogError> {
        let path = path.as_ref();
        if let Some(flat) = self.cached_for(path) {
            return Ok(flat);
        }

        // Serialize first loads so concurrent callers parse the file once.
        let _guard = self
            .loading
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(flat) = self.cached_for(path) {
            return Ok(flat);
        }

        let flat = crate::load_flat_catalog(path)?;
        let (_, flat) = self.slot.get_or_init(|| (path.to_path_buf(), flat));
        Ok(flat)
    }

    fn cached_for(&self, path: &Path) -> Option<&FlatCatalog> {
        let (cached_path, flat) = self.slot.get()?;
        if cached_path != path {
            tracing::warn!(
                cached = %cached_path.display(),
                requested = %path.display(),
                "catalog already loaded from another path; using cached catalog"
            );
        }
        Some(flat)
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{"catalog": {"groups": [{"id": "G1", "title": "Gruppe",
        "controls": [{"id": "G1.A1", "title": "Erste"}]}]}}"#;

    #[test]
    fn test_second_call_does_not_reread_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let cache = CatalogCache::new();
        let first = cache.get_or_load(&path).unwrap().total_controls;
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap().total_controls;
        assert_eq!(first, 1);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let cache = CatalogCache::new();
        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.get().is_none());

        std::fs::write(&path, CATALOG).unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().records[0].id, "G1.A1");
    }
}
