//! Common error infrastructure for armory-core.
//!
//! Every mutation on [`crate::store::Inventory`] either fully applies or
//! fails with one of the kinds below and no partial effect. All failures are
//! deterministic validation outcomes; retrying an unchanged call is never
//! meaningful.

use crate::catalog::ItemId;
use crate::state::Uid;

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    Validation,
    /// A resource limit was hit; freeing space may allow a retry.
    Capacity,
    /// Unexpected state inconsistency. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Capacity => "capacity",
            Self::Internal => "internal",
        }
    }
}

/// Errors produced by inventory mutation operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error, serde::Serialize)]
pub enum InventoryError {
    /// No live entry holds this uid in the addressed slot space.
    #[error("uid {uid} not found")]
    UidNotFound { uid: Uid },

    /// An item id does not resolve in the catalog.
    #[error("item {id} not found in catalog")]
    UnknownItem { id: ItemId },

    /// The inventory or a storage unit interior is at its configured cap.
    #[error("capacity exceeded ({capacity} items)")]
    CapacityExceeded { capacity: usize },

    /// An attribute is not eligible for the item's type, or is outside its
    /// numeric/textual range.
    #[error("invalid attribute: {attribute}")]
    InvalidAttribute { attribute: &'static str },

    /// A sticker/patch slot already holds a value.
    #[error("slot {slot} is occupied")]
    SlotOccupied { slot: u8 },

    /// A sticker/patch slot holds no value.
    #[error("slot {slot} is empty")]
    SlotEmpty { slot: u8 },

    /// A sticker/patch slot index outside the fixed bounds.
    #[error("slot {slot} out of range")]
    SlotOutOfRange { slot: u8 },

    /// An operation-specific precondition does not hold.
    #[error("precondition failed: {reason}")]
    PreconditionFailed { reason: &'static str },
}

impl InventoryError {
    pub fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            UidNotFound { .. } | UnknownItem { .. } => ErrorSeverity::Validation,
            CapacityExceeded { .. } => ErrorSeverity::Capacity,
            InvalidAttribute { .. } | SlotOccupied { .. } | SlotEmpty { .. } => {
                ErrorSeverity::Validation
            }
            SlotOutOfRange { .. } | PreconditionFailed { .. } => ErrorSeverity::Validation,
        }
    }

    /// Stable machine-readable code for logs and wire surfaces.
    pub fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            UidNotFound { .. } => "INV_UID_NOT_FOUND",
            UnknownItem { .. } => "INV_UNKNOWN_ITEM",
            CapacityExceeded { .. } => "INV_CAPACITY_EXCEEDED",
            InvalidAttribute { .. } => "INV_INVALID_ATTRIBUTE",
            SlotOccupied { .. } => "INV_SLOT_OCCUPIED",
            SlotEmpty { .. } => "INV_SLOT_EMPTY",
            SlotOutOfRange { .. } => "INV_SLOT_OUT_OF_RANGE",
            PreconditionFailed { .. } => "INV_PRECONDITION_FAILED",
        }
    }
}
