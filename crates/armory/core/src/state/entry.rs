//! Dynamic item entries and storage-unit interiors.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::{EquipFlags, SlotAllocator};
use crate::catalog::ItemId;

/// Small dense integer handle addressing one live entry within a slot space.
///
/// Uids are minimum-unused-integer allocated; the top-level inventory and
/// each storage unit interior are independent spaces, so equal uids in
/// different spaces are unrelated.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Uid(pub u32);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One applied sticker. `wear: None` means pristine (never scraped).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sticker {
    pub id: ItemId,
    pub wear: Option<f64>,
}

impl Sticker {
    pub fn new(id: ItemId) -> Self {
        Self { id, wear: None }
    }
}

/// Interior slot space of a storage-unit entry.
///
/// Independent from the outer inventory: its own allocator, its own
/// capacity, its own dense uid range.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageSpace {
    pub(crate) alloc: SlotAllocator,
    pub(crate) items: BTreeMap<Uid, ItemEntry>,
}

impl StorageSpace {
    pub fn new(capacity: usize) -> Self {
        Self {
            alloc: SlotAllocator::new(capacity),
            items: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.alloc.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.alloc.capacity()
    }

    pub fn get(&self, uid: Uid) -> Option<&ItemEntry> {
        self.items.get(&uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uid, &ItemEntry)> {
        self.items.iter().map(|(uid, entry)| (*uid, entry))
    }
}

/// One player-owned, mutable instance of an item.
///
/// Owned exclusively by the store that created it; every mutation goes
/// through [`crate::store::Inventory`] so invariants hold at all times.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemEntry {
    /// Reference into the catalog. Always resolvable while the entry lives.
    pub item_id: ItemId,
    pub flags: EquipFlags,
    pub wear: Option<f64>,
    pub seed: Option<u32>,
    pub stat_trak: Option<u32>,
    pub name_tag: Option<String>,
    /// Provenance: the container item that produced this entry.
    pub container_id: Option<ItemId>,
    /// Sticker slots, sparse. Keys are within `0..MAX_STICKERS`.
    pub stickers: BTreeMap<u8, Sticker>,
    /// Patch slots, sparse. Keys are within `0..MAX_PATCHES`.
    pub patches: BTreeMap<u8, ItemId>,
    /// Present only on storage-unit entries.
    pub storage: Option<StorageSpace>,
    /// Unix seconds of the last mutation touching this entry.
    pub updated_at: u64,
}

impl ItemEntry {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            flags: EquipFlags::empty(),
            wear: None,
            seed: None,
            stat_trak: None,
            name_tag: None,
            container_id: None,
            stickers: BTreeMap::new(),
            patches: BTreeMap::new(),
            storage: None,
            updated_at: unix_now(),
        }
    }

    pub fn is_storage_unit(&self) -> bool {
        self.storage.is_some()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = unix_now();
    }
}

/// Wall-clock stamp for `updated_at`. Monotonicity is not required; the
/// field is informational.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
