//! Inventory configuration and fixed economy constants.

use serde::{Deserialize, Serialize};

/// Construction-time configuration for an [`crate::store::Inventory`].
///
/// Both capacities are hard caps enforced on every mutation; there is no
/// dynamic resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Maximum number of entries in the top-level inventory.
    pub max_items: usize,
    /// Maximum number of entries inside each storage unit's interior space.
    pub storage_unit_max_items: usize,
}

impl InventoryConfig {
    // ===== compile-time constants used across the crate =====
    /// Number of sticker slots on a sticker-capable item (slots `0..=3`).
    pub const MAX_STICKERS: u8 = 4;
    /// Number of patch slots on a patch-capable item (slots `0..=4`).
    pub const MAX_PATCHES: u8 = 5;
    /// Sticker wear ceiling; a scrape past this point removes the sticker.
    pub const MAX_STICKER_WEAR: f64 = 0.9;
    /// Wear added to a sticker by one scrape.
    pub const STICKER_WEAR_STEP: f64 = 0.1;
    /// StatTrak counters saturate here instead of erroring.
    pub const MAX_STAT_TRAK: u32 = 999_999;
    /// Inclusive paint-seed range generated at roll time.
    pub const MIN_SEED: u32 = 1;
    pub const MAX_SEED: u32 = 1000;
    /// Default wear range when an item definition carries no explicit bounds.
    pub const MIN_WEAR: f64 = 0.000_001;
    pub const MAX_WEAR: f64 = 0.999_999;
    /// Maximum name-tag length in characters.
    pub const MAX_NAME_TAG_LEN: usize = 20;
    /// Chance denominator for a StatTrak counter on a rolled item (1-in-10).
    pub const STAT_TRAK_ODDS: u32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ITEMS: usize = 256;
    pub const DEFAULT_STORAGE_UNIT_MAX_ITEMS: usize = 32;

    pub fn new(max_items: usize, storage_unit_max_items: usize) -> Self {
        Self {
            max_items,
            storage_unit_max_items,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_items: Self::DEFAULT_MAX_ITEMS,
            storage_unit_max_items: Self::DEFAULT_STORAGE_UNIT_MAX_ITEMS,
        }
    }
}
