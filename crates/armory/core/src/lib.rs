//! Durable, mutation-safe inventory state machine for a collectible-item
//! economy.
//!
//! `armory-core` owns the persisted collection of dynamic item instances and
//! exposes pure, synchronous APIs around it. All state mutation flows through
//! [`store::Inventory`]; the static item catalog is consumed through the
//! read-only [`catalog::CatalogOracle`] seam so many independent stores can
//! share one catalog handle. Persisted blobs of older schema versions are
//! brought forward by [`migrate::hydrate`].
pub mod catalog;
pub mod config;
pub mod error;
pub mod migrate;
pub mod rng;
pub mod roll;
pub mod snapshot;
pub mod state;
pub mod store;

pub use catalog::{Capabilities, CatalogOracle, ItemDefinition, ItemId, ItemType, Rarity, ToolKind};
pub use config::InventoryConfig;
pub use error::{ErrorSeverity, InventoryError};
pub use migrate::{HydrationError, hydrate, hydrate_value};
pub use rng::{PcgRng, RollRng};
pub use roll::{RollResult, roll_container};
pub use snapshot::{EntrySnapshot, InventorySnapshot, StickerSnapshot};
pub use state::{EquipFlags, EquipSlot, ItemEntry, SlotAllocator, Sticker, Team, Uid};
pub use store::{Inventory, ItemSpec};
