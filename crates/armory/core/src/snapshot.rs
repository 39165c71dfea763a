//! Version-1 persisted snapshot shape.
//!
//! The wire form is `{ version, items: map<string-uid, Entry> }`; nested
//! storage interiors follow the same entry shape recursively. Where the
//! bytes live is a caller concern; the core only defines the shape and the
//! conversion from a live store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::{EquipFlags, ItemEntry, Sticker};
use crate::store::Inventory;

/// Latest snapshot schema version produced by [`Inventory::snapshot`].
pub const CURRENT_VERSION: u32 = 1;

/// One applied sticker on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickerSnapshot {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wear: Option<f64>,
}

/// One dynamic entry on the wire.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntrySnapshot {
    pub id: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub equipped: bool,
    #[serde(rename = "equippedCT", skip_serializing_if = "std::ops::Not::not")]
    pub equipped_ct: bool,
    #[serde(rename = "equippedT", skip_serializing_if = "std::ops::Not::not")]
    pub equipped_t: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wear: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_trak: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub stickers: BTreeMap<u8, StickerSnapshot>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub patches: BTreeMap<u8, u32>,
    /// Interior uid map, present only on storage-unit entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<BTreeMap<u32, EntrySnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
}

impl EntrySnapshot {
    pub fn from_entry(entry: &ItemEntry) -> Self {
        Self {
            id: entry.item_id.0,
            equipped: entry.flags.contains(EquipFlags::EQUIPPED),
            equipped_ct: entry.flags.contains(EquipFlags::EQUIPPED_CT),
            equipped_t: entry.flags.contains(EquipFlags::EQUIPPED_T),
            wear: entry.wear,
            seed: entry.seed,
            stat_trak: entry.stat_trak,
            name_tag: entry.name_tag.clone(),
            container_id: entry.container_id.map(|id| id.0),
            stickers: entry
                .stickers
                .iter()
                .map(|(slot, sticker)| (*slot, StickerSnapshot::from_sticker(sticker)))
                .collect(),
            patches: entry
                .patches
                .iter()
                .map(|(slot, id)| (*slot, id.0))
                .collect(),
            storage: entry.storage.as_ref().map(|space| {
                space
                    .iter()
                    .map(|(uid, inner)| (uid.0, Self::from_entry(inner)))
                    .collect()
            }),
            updated_at: Some(entry.updated_at),
        }
    }
}

impl StickerSnapshot {
    pub fn from_sticker(sticker: &Sticker) -> Self {
        Self {
            id: sticker.id.0,
            wear: sticker.wear,
        }
    }
}

/// Versioned snapshot of one whole inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub version: u32,
    #[serde(default)]
    pub items: BTreeMap<u32, EntrySnapshot>,
}

impl Inventory {
    /// Serializable view of the current state at [`CURRENT_VERSION`].
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            version: CURRENT_VERSION,
            items: self
                .iter()
                .map(|(uid, entry)| (uid.0, EntrySnapshot::from_entry(entry)))
                .collect(),
        }
    }
}
