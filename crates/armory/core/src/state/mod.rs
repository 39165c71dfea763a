//! Dynamic inventory state representation.
//!
//! This module owns the data shapes for player-owned item instances and the
//! slot-handle allocator. Runtime layers query this state but mutate it
//! exclusively through [`crate::store::Inventory`].
mod entry;
mod equip;
mod slots;

pub use entry::{ItemEntry, StorageSpace, Sticker, Uid};
pub use equip::{EquipFlags, EquipSlot, Team};
pub use slots::SlotAllocator;
