//! The authoritative inventory store.
//!
//! [`Inventory`] owns the map from uid to dynamic entry and is the single
//! mutation path for all of it. Every operation validates its preconditions
//! first and then applies in full, so a failed call leaves no partial
//! effect. The store is a single-writer structure: callers serialize access,
//! typically one store per player session.
mod cosmetics;
mod storage;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Capabilities, CatalogOracle, ItemDefinition, ItemId, ItemType};
use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::state::{EquipFlags, EquipSlot, ItemEntry, SlotAllocator, Sticker, StorageSpace, Team, Uid};

/// Input descriptor for [`Inventory::add`].
///
/// Equip flags are intentionally absent: a freshly added entry always
/// starts unequipped.
#[derive(Clone, Debug, Default)]
pub struct ItemSpec {
    pub item_id: ItemId,
    pub wear: Option<f64>,
    pub seed: Option<u32>,
    pub stat_trak: Option<u32>,
    pub name_tag: Option<String>,
    pub container_id: Option<ItemId>,
    pub stickers: BTreeMap<u8, Sticker>,
    pub patches: BTreeMap<u8, ItemId>,
}

impl ItemSpec {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            ..Self::default()
        }
    }

    pub fn with_wear(mut self, wear: f64) -> Self {
        self.wear = Some(wear);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stat_trak(mut self, stat_trak: u32) -> Self {
        self.stat_trak = Some(stat_trak);
        self
    }
}

/// Authoritative map from uid to dynamic item entry.
pub struct Inventory {
    config: InventoryConfig,
    catalog: Arc<dyn CatalogOracle>,
    pub(crate) items: BTreeMap<Uid, ItemEntry>,
    pub(crate) alloc: SlotAllocator,
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("config", &self.config)
            .field("items", &self.items)
            .field("alloc", &self.alloc)
            .finish_non_exhaustive()
    }
}

impl Inventory {
    /// Creates an empty store against a shared catalog handle.
    pub fn new(config: InventoryConfig, catalog: Arc<dyn CatalogOracle>) -> Self {
        Self {
            alloc: SlotAllocator::new(config.max_items),
            config,
            catalog,
            items: BTreeMap::new(),
        }
    }

    /// Rebuilds a store from already-validated entries (hydration path).
    pub(crate) fn from_entries(
        config: InventoryConfig,
        catalog: Arc<dyn CatalogOracle>,
        items: BTreeMap<Uid, ItemEntry>,
    ) -> Self {
        let alloc = SlotAllocator::with_used(config.max_items, items.keys().copied());
        Self {
            config,
            catalog,
            items,
            alloc,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogOracle> {
        &self.catalog
    }

    pub fn get(&self, uid: Uid) -> Option<&ItemEntry> {
        self.items.get(&uid)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.config.max_items
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uid, &ItemEntry)> {
        self.items.iter().map(|(uid, entry)| (*uid, entry))
    }

    /// The entry currently equipped in the given (team, slot) pair, if any.
    pub fn equipped_in(&self, slot: &EquipSlot, team: Option<Team>) -> Option<Uid> {
        let flag = EquipFlags::for_team(team);
        self.items
            .iter()
            .find(|(_, entry)| {
                entry.flags.contains(flag)
                    && self
                        .catalog
                        .definition(entry.item_id)
                        .is_some_and(|def| EquipSlot::of(def) == *slot)
            })
            .map(|(uid, _)| *uid)
    }

    // ========================================================================
    // Add / remove
    // ========================================================================

    /// Validates a descriptor against the catalog and attribute eligibility
    /// tables, then inserts it under a freshly allocated uid.
    pub fn add(&mut self, spec: ItemSpec) -> Result<Uid, InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .definition(spec.item_id)
            .ok_or(InventoryError::UnknownItem { id: spec.item_id })?;
        self.validate_spec(&spec, def)?;

        let uid = self
            .alloc
            .acquire()
            .ok_or(InventoryError::CapacityExceeded {
                capacity: self.config.max_items,
            })?;

        let mut entry = ItemEntry::new(spec.item_id);
        entry.wear = spec.wear;
        entry.seed = spec.seed;
        entry.stat_trak = spec.stat_trak;
        entry.name_tag = spec.name_tag;
        entry.container_id = spec.container_id;
        entry.stickers = spec.stickers;
        entry.patches = spec.patches;
        if def.is_storage_unit() {
            entry.storage = Some(StorageSpace::new(self.config.storage_unit_max_items));
        }

        debug!(uid = uid.0, item = spec.item_id.0, "add item");
        self.items.insert(uid, entry);
        Ok(uid)
    }

    /// Removes one entry, freeing its uid.
    pub fn remove(&mut self, uid: Uid) -> Result<ItemEntry, InventoryError> {
        let entry = self
            .items
            .remove(&uid)
            .ok_or(InventoryError::UidNotFound { uid })?;
        self.alloc.release(uid);
        debug!(uid = uid.0, item = entry.item_id.0, "remove item");
        Ok(entry)
    }

    /// Removes every entry and resets the slot space.
    pub fn remove_all(&mut self) {
        self.items.clear();
        self.alloc.clear();
    }

    // ========================================================================
    // Equip / unequip
    // ========================================================================

    /// Equips an entry in its (team, slot) pair, implicitly unequipping any
    /// previous holder of that pair.
    ///
    /// `team` must be given exactly when the item type is team-scoped;
    /// team-agnostic items (pins, music kits, graffiti) take `None`.
    pub fn equip(&mut self, uid: Uid, team: Option<Team>) -> Result<(), InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        let def = self.equip_target(&catalog, uid, team)?;
        let slot = EquipSlot::of(def);
        let flag = EquipFlags::for_team(team);

        // Mutual exclusion: clear the pair's previous holder first.
        let previous: Vec<Uid> = self
            .items
            .iter()
            .filter(|(other, entry)| {
                **other != uid
                    && entry.flags.contains(flag)
                    && catalog
                        .definition(entry.item_id)
                        .is_some_and(|d| EquipSlot::of(d) == slot)
            })
            .map(|(other, _)| *other)
            .collect();
        for other in previous {
            let entry = self.items.get_mut(&other).expect("listed above");
            entry.flags.remove(flag);
            entry.touch();
        }

        let entry = self.items.get_mut(&uid).expect("validated above");
        entry.flags.insert(flag);
        entry.touch();
        Ok(())
    }

    /// Clears an entry's equip flag for the given scope.
    pub fn unequip(&mut self, uid: Uid, team: Option<Team>) -> Result<(), InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        self.equip_target(&catalog, uid, team)?;
        let entry = self.items.get_mut(&uid).expect("validated above");
        entry.flags.remove(EquipFlags::for_team(team));
        entry.touch();
        Ok(())
    }

    /// Shared equip/unequip validation: entry exists, item is equippable,
    /// and the team argument matches the item's scoping.
    fn equip_target<'c>(
        &self,
        catalog: &'c Arc<dyn CatalogOracle>,
        uid: Uid,
        team: Option<Team>,
    ) -> Result<&'c ItemDefinition, InventoryError> {
        let entry = self
            .items
            .get(&uid)
            .ok_or(InventoryError::UidNotFound { uid })?;
        let def = catalog
            .definition(entry.item_id)
            .ok_or(InventoryError::UnknownItem { id: entry.item_id })?;
        if def.item_type.is_team_equippable() {
            if team.is_none() {
                return Err(InventoryError::PreconditionFailed {
                    reason: "team-scoped item equipped without a team",
                });
            }
        } else if def.item_type.is_agnostic_equippable() {
            if team.is_some() {
                return Err(InventoryError::PreconditionFailed {
                    reason: "team-agnostic item equipped with a team",
                });
            }
        } else {
            return Err(InventoryError::InvalidAttribute {
                attribute: "equipped",
            });
        }
        Ok(def)
    }

    // ========================================================================
    // Descriptor validation
    // ========================================================================

    fn validate_spec(
        &self,
        spec: &ItemSpec,
        def: &ItemDefinition,
    ) -> Result<(), InventoryError> {
        let caps = def.item_type.capabilities();
        if let Some(wear) = spec.wear {
            if !caps.contains(Capabilities::WEAR) {
                return Err(InventoryError::InvalidAttribute { attribute: "wear" });
            }
            if !wear.is_finite() || !(0.0..=1.0).contains(&wear) {
                return Err(InventoryError::InvalidAttribute { attribute: "wear" });
            }
        }
        if let Some(seed) = spec.seed {
            if !caps.contains(Capabilities::SEED)
                || !(InventoryConfig::MIN_SEED..=InventoryConfig::MAX_SEED).contains(&seed)
            {
                return Err(InventoryError::InvalidAttribute { attribute: "seed" });
            }
        }
        if let Some(stat_trak) = spec.stat_trak {
            if !caps.contains(Capabilities::STAT_TRAK)
                || stat_trak > InventoryConfig::MAX_STAT_TRAK
            {
                return Err(InventoryError::InvalidAttribute {
                    attribute: "statTrak",
                });
            }
        }
        if let Some(container_id) = spec.container_id {
            // Provenance is a catalog reference like any other.
            if !self.catalog.contains(container_id) {
                return Err(InventoryError::UnknownItem { id: container_id });
            }
        }
        if let Some(name_tag) = &spec.name_tag {
            if !caps.contains(Capabilities::NAME_TAG) && !def.is_storage_unit() {
                return Err(InventoryError::InvalidAttribute {
                    attribute: "nameTag",
                });
            }
            // Storage units may carry an empty label; everything else needs text.
            cosmetics::validate_name_tag(name_tag, !def.is_storage_unit())?;
        }
        if !spec.stickers.is_empty() {
            if !caps.contains(Capabilities::STICKERS) {
                return Err(InventoryError::InvalidAttribute {
                    attribute: "stickers",
                });
            }
            for (slot, sticker) in &spec.stickers {
                if *slot >= InventoryConfig::MAX_STICKERS {
                    return Err(InventoryError::SlotOutOfRange { slot: *slot });
                }
                let sticker_def = self
                    .catalog
                    .definition(sticker.id)
                    .ok_or(InventoryError::UnknownItem { id: sticker.id })?;
                if sticker_def.item_type != ItemType::Sticker {
                    return Err(InventoryError::InvalidAttribute {
                        attribute: "stickers",
                    });
                }
                if let Some(wear) = sticker.wear {
                    if !wear.is_finite() || !(0.0..=1.0).contains(&wear) {
                        return Err(InventoryError::InvalidAttribute {
                            attribute: "stickers",
                        });
                    }
                }
            }
        }
        if !spec.patches.is_empty() {
            if !caps.contains(Capabilities::PATCHES) {
                return Err(InventoryError::InvalidAttribute {
                    attribute: "patches",
                });
            }
            for (slot, patch_id) in &spec.patches {
                if *slot >= InventoryConfig::MAX_PATCHES {
                    return Err(InventoryError::SlotOutOfRange { slot: *slot });
                }
                let patch_def = self
                    .catalog
                    .definition(*patch_id)
                    .ok_or(InventoryError::UnknownItem { id: *patch_id })?;
                if patch_def.item_type != ItemType::Patch {
                    return Err(InventoryError::InvalidAttribute {
                        attribute: "patches",
                    });
                }
            }
        }
        Ok(())
    }

    /// Looks up an entry together with its definition, for operations that
    /// need both.
    pub(crate) fn entry_def<'c>(
        &self,
        catalog: &'c Arc<dyn CatalogOracle>,
        uid: Uid,
    ) -> Result<(&ItemEntry, &'c ItemDefinition), InventoryError> {
        let entry = self
            .items
            .get(&uid)
            .ok_or(InventoryError::UidNotFound { uid })?;
        let def = catalog
            .definition(entry.item_id)
            .ok_or(InventoryError::UnknownItem { id: entry.item_id })?;
        Ok((entry, def))
    }
}
