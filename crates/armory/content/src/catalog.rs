//! Indexed in-memory catalog.

use std::collections::HashMap;

use armory_core::{CatalogOracle, ItemDefinition, ItemId};
use tracing::warn;

/// Immutable item-definition index implementing [`CatalogOracle`].
///
/// Built once from loaded definitions and then shared (via `Arc`) across
/// every store that needs it.
#[derive(Debug, Default)]
pub struct Catalog {
    defs: HashMap<ItemId, ItemDefinition>,
}

impl Catalog {
    /// Indexes a list of definitions. Later duplicates replace earlier ones.
    pub fn from_definitions(definitions: Vec<ItemDefinition>) -> Self {
        let mut defs = HashMap::with_capacity(definitions.len());
        for def in definitions {
            if defs.insert(def.id, def).is_some() {
                warn!("duplicate item definition replaced an earlier one");
            }
        }
        Self { defs }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.defs.values()
    }
}

impl CatalogOracle for Catalog {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.defs.get(&id)
    }
}
