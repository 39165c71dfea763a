//! The catalog accessor contract.

use super::{ItemDefinition, ItemId};

/// Read-only lookup from item id to static definition.
///
/// Implementations are treated as pure and immutable for the lifetime of any
/// store holding them. The oracle is safely
/// shared across many store instances without synchronization.
pub trait CatalogOracle: Send + Sync {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition>;

    /// Convenience for callers that treat a missing definition as an error.
    fn contains(&self, id: ItemId) -> bool {
        self.definition(id).is_some()
    }
}

impl CatalogOracle for std::collections::HashMap<ItemId, ItemDefinition> {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.get(&id)
    }
}
