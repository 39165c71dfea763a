//! Inventory configuration loader.

use std::path::Path;

use armory_core::InventoryConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for inventory configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<InventoryConfig> {
        let content = read_file(path)?;
        let config: InventoryConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_capacities() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"max_items = 128\nstorage_unit_max_items = 16\n")
            .unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_items, 128);
        assert_eq!(config.storage_unit_max_items, 16);
    }
}
