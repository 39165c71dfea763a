//! Storage-unit deposit, retrieval, and interior queries.
//!
//! A storage-unit entry owns an interior slot space with its own allocator
//! and capacity, independent from the outer inventory. Entries move between
//! the two spaces; they are never aliased in both.

use std::sync::Arc;

use tracing::debug;

use crate::error::InventoryError;
use crate::state::{EquipFlags, ItemEntry, Uid};

use super::Inventory;

impl Inventory {
    /// Moves entries from the outer inventory into a storage unit.
    ///
    /// The unit must have been named at least once; the move strips outer
    /// equip flags and assigns fresh interior uids. Either every listed
    /// entry moves or none does.
    pub fn deposit_to_storage_unit(
        &mut self,
        storage_uid: Uid,
        uids: &[Uid],
    ) -> Result<(), InventoryError> {
        self.storage_gate(storage_uid, uids)?;
        for &uid in uids {
            let entry = self
                .items
                .get(&uid)
                .ok_or(InventoryError::UidNotFound { uid })?;
            if entry.is_storage_unit() {
                return Err(InventoryError::PreconditionFailed {
                    reason: "storage units cannot be nested",
                });
            }
        }
        {
            let storage = self.interior(storage_uid)?;
            if storage.len() + uids.len() > storage.capacity() {
                return Err(InventoryError::CapacityExceeded {
                    capacity: storage.capacity(),
                });
            }
        }

        for &uid in uids {
            let mut entry = self.items.remove(&uid).expect("validated above");
            self.alloc.release(uid);
            entry.flags = EquipFlags::empty();
            entry.touch();
            let storage = self
                .items
                .get_mut(&storage_uid)
                .and_then(|e| e.storage.as_mut())
                .expect("validated above");
            let inner = storage.alloc.acquire().expect("capacity checked above");
            storage.items.insert(inner, entry);
        }
        debug!(storage = storage_uid.0, moved = uids.len(), "deposit");
        self.items
            .get_mut(&storage_uid)
            .expect("validated above")
            .touch();
        Ok(())
    }

    /// Moves entries from a storage unit back into the outer inventory,
    /// assigning fresh outer uids.
    pub fn retrieve_from_storage_unit(
        &mut self,
        storage_uid: Uid,
        inner_uids: &[Uid],
    ) -> Result<(), InventoryError> {
        self.storage_gate(storage_uid, inner_uids)?;
        {
            let storage = self.interior(storage_uid)?;
            for &inner in inner_uids {
                if storage.get(inner).is_none() {
                    return Err(InventoryError::UidNotFound { uid: inner });
                }
            }
        }
        if self.items.len() + inner_uids.len() > self.config().max_items {
            return Err(InventoryError::CapacityExceeded {
                capacity: self.config().max_items,
            });
        }

        for &inner in inner_uids {
            let storage = self
                .items
                .get_mut(&storage_uid)
                .and_then(|e| e.storage.as_mut())
                .expect("validated above");
            let mut entry = storage.items.remove(&inner).expect("validated above");
            storage.alloc.release(inner);
            entry.touch();
            let uid = self.alloc.acquire().expect("outer capacity checked above");
            self.items.insert(uid, entry);
        }
        debug!(storage = storage_uid.0, moved = inner_uids.len(), "retrieve");
        self.items
            .get_mut(&storage_uid)
            .expect("validated above")
            .touch();
        Ok(())
    }

    // ========================================================================
    // Interior queries
    // ========================================================================

    pub fn get_storage_unit_size(&self, storage_uid: Uid) -> Result<usize, InventoryError> {
        Ok(self.interior(storage_uid)?.len())
    }

    pub fn is_storage_unit_full(&self, storage_uid: Uid) -> Result<bool, InventoryError> {
        Ok(self.interior(storage_uid)?.is_full())
    }

    /// True when the unit holds at least one entry.
    pub fn is_storage_unit_filled(&self, storage_uid: Uid) -> Result<bool, InventoryError> {
        Ok(!self.interior(storage_uid)?.is_empty())
    }

    /// True when depositing `count` more entries would be accepted.
    pub fn can_deposit_to_storage_unit(
        &self,
        storage_uid: Uid,
        count: usize,
    ) -> Result<bool, InventoryError> {
        let named = self
            .get(storage_uid)
            .ok_or(InventoryError::UidNotFound { uid: storage_uid })?
            .name_tag
            .is_some();
        let storage = self.interior(storage_uid)?;
        Ok(named && count > 0 && storage.len() + count <= storage.capacity())
    }

    pub fn get_storage_unit_items(
        &self,
        storage_uid: Uid,
    ) -> Result<impl Iterator<Item = (Uid, &ItemEntry)>, InventoryError> {
        Ok(self.interior(storage_uid)?.iter())
    }

    // ========================================================================
    // Shared validation
    // ========================================================================

    /// Common gate for both move directions: the target exists, is a named
    /// storage unit, and the uid list is non-empty and duplicate-free.
    fn storage_gate(&self, storage_uid: Uid, uids: &[Uid]) -> Result<(), InventoryError> {
        let catalog = Arc::clone(self.catalog());
        let (entry, def) = self.entry_def(&catalog, storage_uid)?;
        if !def.is_storage_unit() {
            return Err(InventoryError::PreconditionFailed {
                reason: "not a storage unit",
            });
        }
        if entry.name_tag.is_none() {
            return Err(InventoryError::PreconditionFailed {
                reason: "storage unit has never been named",
            });
        }
        if uids.is_empty() {
            return Err(InventoryError::PreconditionFailed {
                reason: "no items listed",
            });
        }
        for (i, uid) in uids.iter().enumerate() {
            if uids[..i].contains(uid) {
                return Err(InventoryError::PreconditionFailed {
                    reason: "duplicate uid in list",
                });
            }
        }
        Ok(())
    }

    fn interior(&self, storage_uid: Uid) -> Result<&crate::state::StorageSpace, InventoryError> {
        self.items
            .get(&storage_uid)
            .ok_or(InventoryError::UidNotFound { uid: storage_uid })?
            .storage
            .as_ref()
            .ok_or(InventoryError::PreconditionFailed {
                reason: "not a storage unit",
            })
    }
}
