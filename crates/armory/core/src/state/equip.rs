//! Equip flags, teams, and exclusivity slots.

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemDefinition, ItemType};

/// The two opposing teams for team-scoped equip slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "ct")]
    Ct,
    #[serde(rename = "t")]
    T,
}

bitflags::bitflags! {
    /// Equip state of a dynamic entry.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EquipFlags: u8 {
        /// Team-agnostic equip (music kits, collectibles, graffiti).
        const EQUIPPED = 1 << 0;
        const EQUIPPED_CT = 1 << 1;
        const EQUIPPED_T = 1 << 2;
    }
}

impl EquipFlags {
    pub const fn for_team(team: Option<Team>) -> Self {
        match team {
            None => Self::EQUIPPED,
            Some(Team::Ct) => Self::EQUIPPED_CT,
            Some(Team::T) => Self::EQUIPPED_T,
        }
    }
}

/// Key of an equip-exclusivity slot.
///
/// At most one entry is equipped per (team, slot) pair; equipping another
/// entry with the same key implicitly unequips the previous holder. Weapons
/// are exclusive per model so two skins of the same weapon cannot be
/// equipped together, while different weapons coexist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    WeaponModel(String),
    Type(ItemType),
}

impl EquipSlot {
    /// Resolves the slot an item definition occupies when equipped.
    ///
    /// Weapons without a model token fall back to the type-wide slot.
    pub fn of(def: &ItemDefinition) -> Self {
        match (def.item_type, def.model.as_deref()) {
            (ItemType::Weapon, Some(model)) => Self::WeaponModel(model.to_owned()),
            (item_type, _) => Self::Type(item_type),
        }
    }
}
