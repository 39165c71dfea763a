//! Content factory for loading everything from a data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use armory_core::{CatalogOracle, InventoryConfig};

use crate::catalog::Catalog;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Loads all inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load inventory configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<InventoryConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load_catalog(&self.data_dir.join("items.ron"))
    }

    /// Load the catalog as a shareable oracle handle for store construction.
    pub fn load_catalog_handle(&self) -> LoadResult<Arc<dyn CatalogOracle>> {
        Ok(Arc::new(self.load_catalog()?))
    }
}
