//! Cosmetic and counter mutations: name tags, stickers, patches, StatTrak,
//! and container unlocks.
//!
//! Consumable items (name-tag tools, stickers, patches, swap tools, keys,
//! containers) are deleted as a side effect of successful application; every
//! operation validates in full before touching any entry.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Capabilities, ItemType, ToolKind};
use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::roll::RollResult;
use crate::state::{ItemEntry, Sticker, Uid};

use super::Inventory;

/// Name-tag text rule: printable, single line, at most
/// [`InventoryConfig::MAX_NAME_TAG_LEN`] characters.
pub(crate) fn validate_name_tag(
    text: &str,
    require_non_empty: bool,
) -> Result<(), InventoryError> {
    if text.chars().count() > InventoryConfig::MAX_NAME_TAG_LEN
        || text.chars().any(char::is_control)
        || (require_non_empty && text.trim().is_empty())
    {
        return Err(InventoryError::InvalidAttribute {
            attribute: "nameTag",
        });
    }
    Ok(())
}

impl Inventory {
    // ========================================================================
    // Name tags
    // ========================================================================

    /// Applies a name tag to `target_uid`, consuming the tool entry at
    /// `nametag_uid`.
    pub fn rename_item(
        &mut self,
        nametag_uid: Uid,
        target_uid: Uid,
        text: &str,
    ) -> Result<(), InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        let (_, tool_def) = self.entry_def(&catalog, nametag_uid)?;
        if tool_def.tool != Some(ToolKind::NameTag) {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a name-tag tool",
            });
        }
        let (_, target_def) = self.entry_def(&catalog, target_uid)?;
        if !target_def.item_type.supports(Capabilities::NAME_TAG) {
            return Err(InventoryError::InvalidAttribute {
                attribute: "nameTag",
            });
        }
        validate_name_tag(text, true)?;

        self.remove(nametag_uid)?;
        let entry = self.items.get_mut(&target_uid).expect("validated above");
        entry.name_tag = Some(text.to_owned());
        entry.touch();
        debug!(uid = target_uid.0, "rename item");
        Ok(())
    }

    /// Renames a storage unit. No consumable is required and the operation
    /// is repeatable; the first rename (even to an empty string) makes the
    /// unit usable for deposits.
    pub fn rename_storage_unit(&mut self, uid: Uid, text: &str) -> Result<(), InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        let (_, def) = self.entry_def(&catalog, uid)?;
        if !def.is_storage_unit() {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a storage unit",
            });
        }
        validate_name_tag(text, false)?;
        let entry = self.items.get_mut(&uid).expect("validated above");
        entry.name_tag = Some(text.to_owned());
        entry.touch();
        Ok(())
    }

    // ========================================================================
    // Stickers
    // ========================================================================

    /// Applies the sticker held at `sticker_uid` to an unoccupied slot of
    /// `target_uid`, consuming the sticker entry.
    pub fn apply_item_sticker(
        &mut self,
        sticker_uid: Uid,
        target_uid: Uid,
        slot: u8,
    ) -> Result<(), InventoryError> {
        if slot >= InventoryConfig::MAX_STICKERS {
            return Err(InventoryError::SlotOutOfRange { slot });
        }
        let catalog = Arc::clone(&self.catalog);
        let (sticker_entry, sticker_def) = self.entry_def(&catalog, sticker_uid)?;
        if sticker_def.item_type != ItemType::Sticker {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a sticker",
            });
        }
        let sticker_id = sticker_entry.item_id;
        let (target, target_def) = self.entry_def(&catalog, target_uid)?;
        if !target_def.item_type.supports(Capabilities::STICKERS) {
            return Err(InventoryError::InvalidAttribute {
                attribute: "stickers",
            });
        }
        if target.stickers.contains_key(&slot) {
            return Err(InventoryError::SlotOccupied { slot });
        }

        self.remove(sticker_uid)?;
        let entry = self.items.get_mut(&target_uid).expect("validated above");
        entry.stickers.insert(slot, Sticker::new(sticker_id));
        entry.touch();
        debug!(uid = target_uid.0, slot, "apply sticker");
        Ok(())
    }

    /// Scrapes the sticker in `slot`, raising its wear by one fixed step.
    /// Once the wear has walked past the last step the sticker is removed
    /// and the slot becomes empty.
    ///
    /// Wear is tracked in integer steps of [`InventoryConfig::STICKER_WEAR_STEP`]
    /// so that exactly ten increments succeed before removal.
    pub fn scrape_item_sticker(&mut self, target_uid: Uid, slot: u8) -> Result<(), InventoryError> {
        if slot >= InventoryConfig::MAX_STICKERS {
            return Err(InventoryError::SlotOutOfRange { slot });
        }
        let entry = self
            .items
            .get_mut(&target_uid)
            .ok_or(InventoryError::UidNotFound { uid: target_uid })?;
        let Some(sticker) = entry.stickers.get_mut(&slot) else {
            return Err(InventoryError::SlotEmpty { slot });
        };

        let step = InventoryConfig::STICKER_WEAR_STEP;
        let limit = (InventoryConfig::MAX_STICKER_WEAR / step).round() as u32 + 1;
        let steps = (sticker.wear.unwrap_or(0.0) / step).round() as u32;
        if steps + 1 > limit {
            entry.stickers.remove(&slot);
            debug!(uid = target_uid.0, slot, "sticker scraped off");
        } else {
            sticker.wear = Some(f64::from(steps + 1) * step);
        }
        entry.touch();
        Ok(())
    }

    // ========================================================================
    // Patches
    // ========================================================================

    /// Applies the patch held at `patch_uid` to an unoccupied slot of
    /// `target_uid`, consuming the patch entry.
    pub fn apply_item_patch(
        &mut self,
        patch_uid: Uid,
        target_uid: Uid,
        slot: u8,
    ) -> Result<(), InventoryError> {
        if slot >= InventoryConfig::MAX_PATCHES {
            return Err(InventoryError::SlotOutOfRange { slot });
        }
        let catalog = Arc::clone(&self.catalog);
        let (patch_entry, patch_def) = self.entry_def(&catalog, patch_uid)?;
        if patch_def.item_type != ItemType::Patch {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a patch",
            });
        }
        let patch_id = patch_entry.item_id;
        let (target, target_def) = self.entry_def(&catalog, target_uid)?;
        if !target_def.item_type.supports(Capabilities::PATCHES) {
            return Err(InventoryError::InvalidAttribute {
                attribute: "patches",
            });
        }
        if target.patches.contains_key(&slot) {
            return Err(InventoryError::SlotOccupied { slot });
        }

        self.remove(patch_uid)?;
        let entry = self.items.get_mut(&target_uid).expect("validated above");
        entry.patches.insert(slot, patch_id);
        entry.touch();
        Ok(())
    }

    /// Removes the patch in `slot`. Nothing is consumed.
    pub fn remove_item_patch(&mut self, target_uid: Uid, slot: u8) -> Result<(), InventoryError> {
        if slot >= InventoryConfig::MAX_PATCHES {
            return Err(InventoryError::SlotOutOfRange { slot });
        }
        let entry = self
            .items
            .get_mut(&target_uid)
            .ok_or(InventoryError::UidNotFound { uid: target_uid })?;
        if entry.patches.remove(&slot).is_none() {
            return Err(InventoryError::SlotEmpty { slot });
        }
        entry.touch();
        Ok(())
    }

    // ========================================================================
    // StatTrak
    // ========================================================================

    /// Increments an entry's StatTrak counter, saturating at
    /// [`InventoryConfig::MAX_STAT_TRAK`].
    pub fn increment_item_stat_trak(&mut self, uid: Uid) -> Result<(), InventoryError> {
        let entry = self
            .items
            .get_mut(&uid)
            .ok_or(InventoryError::UidNotFound { uid })?;
        let Some(counter) = entry.stat_trak else {
            return Err(InventoryError::PreconditionFailed {
                reason: "no StatTrak counter",
            });
        };
        // Hydrated snapshots may carry counters past the cap; clamp here.
        entry.stat_trak = Some(counter.saturating_add(1).min(InventoryConfig::MAX_STAT_TRAK));
        entry.touch();
        Ok(())
    }

    /// Exchanges the StatTrak counters of two distinct non-tool entries,
    /// consuming the swap tool.
    pub fn swap_items_stat_trak(
        &mut self,
        tool_uid: Uid,
        a_uid: Uid,
        b_uid: Uid,
    ) -> Result<(), InventoryError> {
        if a_uid == b_uid {
            return Err(InventoryError::PreconditionFailed {
                reason: "cannot swap an item with itself",
            });
        }
        let catalog = Arc::clone(&self.catalog);
        let (_, tool_def) = self.entry_def(&catalog, tool_uid)?;
        if tool_def.tool != Some(ToolKind::StatTrakSwap) {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a StatTrak swap tool",
            });
        }
        let mut counters = [0u32; 2];
        for (i, uid) in [a_uid, b_uid].into_iter().enumerate() {
            let (entry, def) = self.entry_def(&catalog, uid)?;
            if def.item_type == ItemType::Tool {
                return Err(InventoryError::PreconditionFailed {
                    reason: "cannot swap StatTrak on a tool",
                });
            }
            counters[i] = entry.stat_trak.ok_or(InventoryError::PreconditionFailed {
                reason: "no StatTrak counter",
            })?;
        }

        self.remove(tool_uid)?;
        let a = self.items.get_mut(&a_uid).expect("validated above");
        a.stat_trak = Some(counters[1]);
        a.touch();
        let b = self.items.get_mut(&b_uid).expect("validated above");
        b.stat_trak = Some(counters[0]);
        b.touch();
        debug!(a = a_uid.0, b = b_uid.0, "swap StatTrak");
        Ok(())
    }

    // ========================================================================
    // Container unlock
    // ========================================================================

    /// Consumes a container entry (and its key, where required) and inserts
    /// the rolled item in its place.
    ///
    /// The roll itself is produced separately by [`crate::roll::roll_container`]
    /// so callers can reject empty containers before consuming anything.
    pub fn unlock_container(
        &mut self,
        roll: RollResult,
        container_uid: Uid,
        key_uid: Option<Uid>,
    ) -> Result<Uid, InventoryError> {
        let catalog = Arc::clone(&self.catalog);
        let (container, container_def) = self.entry_def(&catalog, container_uid)?;
        if !container_def.is_container() {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a container",
            });
        }
        if roll.container_id != container.item_id {
            return Err(InventoryError::PreconditionFailed {
                reason: "roll does not match container",
            });
        }
        if !catalog.contains(roll.item_id) {
            return Err(InventoryError::UnknownItem { id: roll.item_id });
        }
        if container_def.keys.is_empty() {
            if key_uid.is_some() {
                return Err(InventoryError::PreconditionFailed {
                    reason: "container does not take a key",
                });
            }
        } else {
            let key_uid = key_uid.ok_or(InventoryError::PreconditionFailed {
                reason: "container requires a key",
            })?;
            if key_uid == container_uid {
                return Err(InventoryError::PreconditionFailed {
                    reason: "key and container are the same entry",
                });
            }
            let (key, _) = self.entry_def(&catalog, key_uid)?;
            if !container_def.keys.contains(&key.item_id) {
                return Err(InventoryError::PreconditionFailed {
                    reason: "key does not fit this container",
                });
            }
        }

        if let Some(key_uid) = key_uid {
            self.remove(key_uid)?;
        }
        self.remove(container_uid)?;
        // The container's slot was just freed, so this cannot fail.
        let uid = self.alloc.acquire().expect("slot freed by container removal");
        let mut entry = ItemEntry::new(roll.item_id);
        entry.wear = roll.wear;
        entry.seed = roll.seed;
        entry.stat_trak = roll.stat_trak;
        entry.container_id = Some(roll.container_id);
        debug!(
            uid = uid.0,
            item = roll.item_id.0,
            special = roll.special,
            "unlock container"
        );
        self.items.insert(uid, entry);
        Ok(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogOracle, ItemDefinition, ItemId, Rarity};
    use crate::store::ItemSpec;
    use std::collections::HashMap;

    fn catalog() -> Arc<dyn CatalogOracle> {
        let mut defs = HashMap::new();
        let mut put = |def: ItemDefinition| {
            defs.insert(def.id, def);
        };
        put(ItemDefinition {
            model: Some("ak47".into()),
            ..ItemDefinition::new(ItemId(1), ItemType::Weapon, Rarity::Rare)
        });
        put(ItemDefinition {
            model: Some("awp".into()),
            ..ItemDefinition::new(ItemId(2), ItemType::Weapon, Rarity::Legendary)
        });
        put(ItemDefinition::new(
            ItemId(20),
            ItemType::Sticker,
            Rarity::Common,
        ));
        put(ItemDefinition::new(
            ItemId(21),
            ItemType::Patch,
            Rarity::Common,
        ));
        put(ItemDefinition::new(
            ItemId(22),
            ItemType::Agent,
            Rarity::Legendary,
        ));
        put(ItemDefinition {
            tool: Some(ToolKind::NameTag),
            ..ItemDefinition::new(ItemId(30), ItemType::Tool, Rarity::Common)
        });
        put(ItemDefinition {
            tool: Some(ToolKind::StatTrakSwap),
            ..ItemDefinition::new(ItemId(31), ItemType::Tool, Rarity::Common)
        });
        Arc::new(defs)
    }

    fn store() -> Inventory {
        Inventory::new(InventoryConfig::new(64, 4), catalog())
    }

    #[test]
    fn rename_consumes_the_tool() {
        let mut inv = store();
        let rifle = inv.add(ItemSpec::new(ItemId(1))).unwrap();
        let tag = inv.add(ItemSpec::new(ItemId(30))).unwrap();
        inv.rename_item(tag, rifle, "my rifle").unwrap();
        assert_eq!(inv.get(rifle).unwrap().name_tag.as_deref(), Some("my rifle"));
        assert!(inv.get(tag).is_none());
    }

    #[test]
    fn rename_rejects_bad_text_without_consuming() {
        let mut inv = store();
        let rifle = inv.add(ItemSpec::new(ItemId(1))).unwrap();
        let tag = inv.add(ItemSpec::new(ItemId(30))).unwrap();
        let long = "x".repeat(21);
        for text in ["", "   ", long.as_str(), "two\nlines"] {
            assert_eq!(
                inv.rename_item(tag, rifle, text).unwrap_err(),
                InventoryError::InvalidAttribute {
                    attribute: "nameTag"
                }
            );
        }
        assert!(inv.get(tag).is_some());
    }

    #[test]
    fn sticker_apply_then_scrape_to_removal() {
        let mut inv = store();
        let rifle = inv.add(ItemSpec::new(ItemId(1))).unwrap();
        let sticker = inv.add(ItemSpec::new(ItemId(20))).unwrap();
        inv.apply_item_sticker(sticker, rifle, 2).unwrap();
        assert!(inv.get(sticker).is_none());
        assert_eq!(inv.get(rifle).unwrap().stickers[&2].wear, None);

        // Exactly ten scrapes raise wear 0.1 at a time; the eleventh removes.
        for n in 1..=10u32 {
            inv.scrape_item_sticker(rifle, 2).unwrap();
            let wear = inv.get(rifle).unwrap().stickers[&2].wear.unwrap();
            assert!((wear - f64::from(n) * 0.1).abs() < 1e-9, "scrape {n}: {wear}");
        }
        inv.scrape_item_sticker(rifle, 2).unwrap();
        assert!(!inv.get(rifle).unwrap().stickers.contains_key(&2));
        assert_eq!(
            inv.scrape_item_sticker(rifle, 2).unwrap_err(),
            InventoryError::SlotEmpty { slot: 2 }
        );
    }

    #[test]
    fn sticker_slot_rules() {
        let mut inv = store();
        let rifle = inv.add(ItemSpec::new(ItemId(1))).unwrap();
        let s1 = inv.add(ItemSpec::new(ItemId(20))).unwrap();
        let s2 = inv.add(ItemSpec::new(ItemId(20))).unwrap();
        assert_eq!(
            inv.apply_item_sticker(s1, rifle, 4).unwrap_err(),
            InventoryError::SlotOutOfRange { slot: 4 }
        );
        inv.apply_item_sticker(s1, rifle, 0).unwrap();
        assert_eq!(
            inv.apply_item_sticker(s2, rifle, 0).unwrap_err(),
            InventoryError::SlotOccupied { slot: 0 }
        );
        // Failed apply must not consume.
        assert!(inv.get(s2).is_some());
    }

    #[test]
    fn patch_apply_and_remove() {
        let mut inv = store();
        let agent = inv.add(ItemSpec::new(ItemId(22))).unwrap();
        let patch = inv.add(ItemSpec::new(ItemId(21))).unwrap();
        inv.apply_item_patch(patch, agent, 4).unwrap();
        assert!(inv.get(patch).is_none());
        assert_eq!(inv.get(agent).unwrap().patches[&4], ItemId(21));
        inv.remove_item_patch(agent, 4).unwrap();
        assert_eq!(
            inv.remove_item_patch(agent, 4).unwrap_err(),
            InventoryError::SlotEmpty { slot: 4 }
        );
        assert_eq!(
            inv.apply_item_patch(agent, agent, 5).unwrap_err(),
            InventoryError::SlotOutOfRange { slot: 5 }
        );
    }

    #[test]
    fn patches_only_fit_patchable_items() {
        let mut inv = store();
        let rifle = inv.add(ItemSpec::new(ItemId(1))).unwrap();
        let patch = inv.add(ItemSpec::new(ItemId(21))).unwrap();
        assert_eq!(
            inv.apply_item_patch(patch, rifle, 0).unwrap_err(),
            InventoryError::InvalidAttribute {
                attribute: "patches"
            }
        );
    }

    #[test]
    fn stat_trak_increments_and_saturates() {
        let mut inv = store();
        let rifle = inv
            .add(ItemSpec::new(ItemId(1)).with_stat_trak(InventoryConfig::MAX_STAT_TRAK - 1))
            .unwrap();
        inv.increment_item_stat_trak(rifle).unwrap();
        inv.increment_item_stat_trak(rifle).unwrap();
        assert_eq!(
            inv.get(rifle).unwrap().stat_trak,
            Some(InventoryConfig::MAX_STAT_TRAK)
        );

        let plain = inv.add(ItemSpec::new(ItemId(2))).unwrap();
        assert!(matches!(
            inv.increment_item_stat_trak(plain),
            Err(InventoryError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn increment_clamps_counters_from_oversized_snapshots() {
        // Only hydration can introduce a counter past the cap.
        let snapshot = serde_json::json!({
            "version": 1,
            "items": {"0": {"id": 1, "statTrak": u32::MAX}}
        });
        let mut inv =
            crate::migrate::hydrate_value(snapshot, catalog(), InventoryConfig::new(64, 4))
                .unwrap();
        inv.increment_item_stat_trak(Uid(0)).unwrap();
        assert_eq!(
            inv.get(Uid(0)).unwrap().stat_trak,
            Some(InventoryConfig::MAX_STAT_TRAK)
        );
    }

    #[test]
    fn unlock_rejects_the_container_as_its_own_key() {
        // Degenerate catalog: the container lists itself as a valid key.
        let mut defs: HashMap<ItemId, ItemDefinition> = HashMap::new();
        defs.insert(
            ItemId(1),
            ItemDefinition {
                model: Some("ak47".into()),
                ..ItemDefinition::new(ItemId(1), ItemType::Weapon, Rarity::Rare)
            },
        );
        defs.insert(
            ItemId(50),
            ItemDefinition {
                contents: vec![ItemId(1)],
                keys: vec![ItemId(50)],
                ..ItemDefinition::new(ItemId(50), ItemType::Container, Rarity::Common)
            },
        );
        let mut inv = Inventory::new(InventoryConfig::new(8, 2), Arc::new(defs));
        let case = inv.add(ItemSpec::new(ItemId(50))).unwrap();
        let roll = RollResult {
            item_id: ItemId(1),
            wear: None,
            seed: None,
            stat_trak: None,
            special: false,
            container_id: ItemId(50),
        };
        assert!(matches!(
            inv.unlock_container(roll, case, Some(case)),
            Err(InventoryError::PreconditionFailed { .. })
        ));
        // The failed unlock consumed nothing.
        assert!(inv.get(case).is_some());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn stat_trak_swap_is_a_pure_exchange() {
        let mut inv = store();
        let a = inv.add(ItemSpec::new(ItemId(1)).with_stat_trak(5)).unwrap();
        let b = inv.add(ItemSpec::new(ItemId(2)).with_stat_trak(90)).unwrap();
        let tool = inv.add(ItemSpec::new(ItemId(31))).unwrap();
        inv.swap_items_stat_trak(tool, a, b).unwrap();
        assert_eq!(inv.get(a).unwrap().stat_trak, Some(90));
        assert_eq!(inv.get(b).unwrap().stat_trak, Some(5));
        assert!(inv.get(tool).is_none());
    }

    #[test]
    fn stat_trak_swap_preconditions() {
        let mut inv = store();
        let a = inv.add(ItemSpec::new(ItemId(1)).with_stat_trak(5)).unwrap();
        let plain = inv.add(ItemSpec::new(ItemId(2))).unwrap();
        let tool = inv.add(ItemSpec::new(ItemId(31))).unwrap();
        let not_tool = inv.add(ItemSpec::new(ItemId(30))).unwrap();

        assert!(inv.swap_items_stat_trak(tool, a, a).is_err());
        assert!(inv.swap_items_stat_trak(tool, a, plain).is_err());
        assert!(inv.swap_items_stat_trak(not_tool, a, plain).is_err());
        // Nothing was consumed by the failed attempts.
        assert!(inv.get(tool).is_some());
        assert_eq!(inv.get(a).unwrap().stat_trak, Some(5));
    }
}
