//! Forward-only migration of persisted snapshots.
//!
//! Hydration takes an untyped blob of unknown (older) schema version,
//! applies every registered version transform in increasing order, prunes
//! references the catalog no longer knows, and produces a live store. Any
//! failure anywhere yields a single "hydration failed" outcome; the
//! pipeline never partially commits.
mod v1;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::catalog::{CatalogOracle, ItemId};
use crate::config::InventoryConfig;
use crate::snapshot::{CURRENT_VERSION, EntrySnapshot, InventorySnapshot};
use crate::state::{ItemEntry, SlotAllocator, Sticker, StorageSpace, Uid};
use crate::store::Inventory;

/// Why a snapshot could not be hydrated.
///
/// Distinct from [`crate::error::InventoryError`]: these are not mutation
/// failures, and callers treat any of them as "no data".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HydrationError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(String),
    #[error("snapshot version {0} is newer than this build supports")]
    UnknownVersion(u64),
    #[error("migration to version {version} failed: {message}")]
    Transform { version: u32, message: String },
    #[error("snapshot does not match the version {CURRENT_VERSION} shape: {0}")]
    Shape(String),
}

/// A pure schema transform from version `v-1` data to version `v` data.
type Transform = fn(Value) -> Result<Value, String>;

/// Registered transforms, ordered by target version. Adding version N+1 is
/// one additional row; earlier transforms stay untouched.
const TRANSFORMS: &[(u32, Transform)] = &[(1, v1::migrate_v0_to_v1)];

/// Hydrates a store from persisted JSON text.
pub fn hydrate(
    json: &str,
    catalog: Arc<dyn CatalogOracle>,
    config: InventoryConfig,
) -> Result<Inventory, HydrationError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| HydrationError::Parse(e.to_string()))?;
    hydrate_value(value, catalog, config)
}

/// Hydrates a store from an already-parsed blob.
pub fn hydrate_value(
    mut value: Value,
    catalog: Arc<dyn CatalogOracle>,
    config: InventoryConfig,
) -> Result<Inventory, HydrationError> {
    // An absent version field means version 0 (the legacy list shape).
    let version = value.get("version").and_then(Value::as_u64).unwrap_or(0);
    if version > u64::from(CURRENT_VERSION) {
        return Err(HydrationError::UnknownVersion(version));
    }

    for &(target, transform) in TRANSFORMS {
        if u64::from(target) > version {
            value = transform(value).map_err(|message| HydrationError::Transform {
                version: target,
                message,
            })?;
        }
    }

    let mut snapshot: InventorySnapshot =
        serde_json::from_value(value).map_err(|e| HydrationError::Shape(e.to_string()))?;
    prune(&mut snapshot, catalog.as_ref());

    let items = snapshot
        .items
        .into_iter()
        .map(|(uid, entry)| (Uid(uid), build_entry(entry, catalog.as_ref(), &config)))
        .collect();
    Ok(Inventory::from_entries(config, catalog, items))
}

/// Drops every reference the catalog cannot resolve.
///
/// An invalid leaf (sticker, patch, provenance id) is removed on its own;
/// the parent entry survives unless its own item id is invalid.
fn prune(snapshot: &mut InventorySnapshot, catalog: &dyn CatalogOracle) {
    snapshot
        .items
        .retain(|uid, entry| prune_entry(*uid, entry, catalog));
}

fn prune_entry(uid: u32, entry: &mut EntrySnapshot, catalog: &dyn CatalogOracle) -> bool {
    if !catalog.contains(ItemId(entry.id)) {
        warn!(uid, item = entry.id, "dropping entry with unknown item id");
        return false;
    }
    entry.stickers.retain(|slot, sticker| {
        let keep = catalog.contains(ItemId(sticker.id));
        if !keep {
            warn!(uid, slot, sticker = sticker.id, "dropping unknown sticker");
        }
        keep
    });
    entry.patches.retain(|slot, patch| {
        let keep = catalog.contains(ItemId(*patch));
        if !keep {
            warn!(uid, slot, patch = *patch, "dropping unknown patch");
        }
        keep
    });
    if entry
        .container_id
        .is_some_and(|id| !catalog.contains(ItemId(id)))
    {
        entry.container_id = None;
    }
    if let Some(storage) = &mut entry.storage {
        storage.retain(|inner_uid, inner| prune_entry(*inner_uid, inner, catalog));
    }
    true
}

/// Builds a live entry from a pruned snapshot entry.
fn build_entry(
    snap: EntrySnapshot,
    catalog: &dyn CatalogOracle,
    config: &InventoryConfig,
) -> ItemEntry {
    let is_storage_unit = catalog
        .definition(ItemId(snap.id))
        .is_some_and(|def| def.is_storage_unit());

    let mut entry = ItemEntry::new(ItemId(snap.id));
    let mut flags = crate::state::EquipFlags::empty();
    flags.set(crate::state::EquipFlags::EQUIPPED, snap.equipped);
    flags.set(crate::state::EquipFlags::EQUIPPED_CT, snap.equipped_ct);
    flags.set(crate::state::EquipFlags::EQUIPPED_T, snap.equipped_t);
    entry.flags = flags;
    entry.wear = snap.wear;
    entry.seed = snap.seed;
    entry.stat_trak = snap.stat_trak;
    entry.name_tag = snap.name_tag;
    entry.container_id = snap.container_id.map(ItemId);
    entry.stickers = snap
        .stickers
        .into_iter()
        .map(|(slot, s)| {
            (
                slot,
                Sticker {
                    id: ItemId(s.id),
                    wear: s.wear,
                },
            )
        })
        .collect();
    entry.patches = snap
        .patches
        .into_iter()
        .map(|(slot, id)| (slot, ItemId(id)))
        .collect();
    if let Some(updated_at) = snap.updated_at {
        entry.updated_at = updated_at;
    }

    if is_storage_unit {
        let items: BTreeMap<Uid, ItemEntry> = snap
            .storage
            .unwrap_or_default()
            .into_iter()
            .map(|(uid, inner)| (Uid(uid), build_entry(inner, catalog, config)))
            .collect();
        let alloc =
            SlotAllocator::with_used(config.storage_unit_max_items, items.keys().copied());
        entry.storage = Some(StorageSpace { alloc, items });
    }
    entry
}
