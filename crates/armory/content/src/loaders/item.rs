//! Item catalog loader.

use std::path::Path;

use armory_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load item definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        let file: CatalogFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Ok(file.items)
    }

    /// Load and index a catalog in one step.
    pub fn load_catalog(path: &Path) -> LoadResult<Catalog> {
        Ok(Catalog::from_definitions(Self::load(path)?))
    }
}
