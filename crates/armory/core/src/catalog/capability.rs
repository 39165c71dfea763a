//! Attribute eligibility per item type.
//!
//! Replaces scattered per-operation conditionals with one capability set
//! resolved from the item type and checked by table lookup.

use super::ItemType;

bitflags::bitflags! {
    /// Dynamic attributes an item type may legally carry or receive.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Float wear generated/persisted on the entry.
        const WEAR = 1 << 0;
        /// Paint seed generated/persisted on the entry.
        const SEED = 1 << 1;
        /// StatTrak counter may be present.
        const STAT_TRAK = 1 << 2;
        /// Sticker slots may be populated.
        const STICKERS = 1 << 3;
        /// Patch slots may be populated.
        const PATCHES = 1 << 4;
        /// May receive a name tag via the rename operations.
        const NAME_TAG = 1 << 5;
        /// Occupies a per-team equip slot.
        const EQUIP_TEAM = 1 << 6;
        /// Occupies a team-agnostic equip slot.
        const EQUIP = 1 << 7;
    }
}

impl ItemType {
    /// Capability set for this item type.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            ItemType::Weapon => Capabilities::WEAR
                .union(Capabilities::SEED)
                .union(Capabilities::STAT_TRAK)
                .union(Capabilities::STICKERS)
                .union(Capabilities::NAME_TAG)
                .union(Capabilities::EQUIP_TEAM),
            ItemType::Melee => Capabilities::WEAR
                .union(Capabilities::SEED)
                .union(Capabilities::STAT_TRAK)
                .union(Capabilities::NAME_TAG)
                .union(Capabilities::EQUIP_TEAM),
            ItemType::Gloves => Capabilities::WEAR
                .union(Capabilities::SEED)
                .union(Capabilities::EQUIP_TEAM),
            ItemType::MusicKit => Capabilities::STAT_TRAK.union(Capabilities::EQUIP),
            ItemType::Agent => Capabilities::PATCHES.union(Capabilities::EQUIP_TEAM),
            ItemType::Graffiti | ItemType::Collectible => Capabilities::EQUIP,
            ItemType::Sticker
            | ItemType::Patch
            | ItemType::Tool
            | ItemType::Container
            | ItemType::ContainerKey => Capabilities::empty(),
        }
    }

    pub const fn supports(self, needed: Capabilities) -> bool {
        self.capabilities().contains(needed)
    }

    /// True when equip/unequip requires a team argument.
    pub const fn is_team_equippable(self) -> bool {
        self.capabilities().contains(Capabilities::EQUIP_TEAM)
    }

    /// True when equip/unequip must not receive a team argument.
    pub const fn is_agnostic_equippable(self) -> bool {
        self.capabilities().contains(Capabilities::EQUIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapons_take_stickers_but_agents_do_not() {
        assert!(ItemType::Weapon.supports(Capabilities::STICKERS));
        assert!(!ItemType::Agent.supports(Capabilities::STICKERS));
        assert!(ItemType::Agent.supports(Capabilities::PATCHES));
    }

    #[test]
    fn consumables_have_no_capabilities() {
        for t in [
            ItemType::Sticker,
            ItemType::Patch,
            ItemType::Tool,
            ItemType::Container,
            ItemType::ContainerKey,
        ] {
            assert!(t.capabilities().is_empty());
        }
    }

    #[test]
    fn equip_scopes_are_exclusive() {
        use strum::IntoEnumIterator;
        for t in ItemType::iter() {
            assert!(!(t.is_team_equippable() && t.is_agnostic_equippable()));
        }
    }
}
