//! Static item definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a static item definition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of economy item types.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Melee,
    Gloves,
    #[serde(rename = "musickit")]
    MusicKit,
    Sticker,
    Graffiti,
    Patch,
    Agent,
    Collectible,
    Tool,
    Container,
    #[serde(rename = "containerkey")]
    #[strum(serialize = "containerkey")]
    ContainerKey,
}

/// Ordered rarity tier driving container-roll probability weighting.
///
/// The ordering of the variants is the total tier order; `Special` is the
/// distinguished tier for a container's rare `specials` payload.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythical,
    Legendary,
    Ancient,
    Special,
}

impl Rarity {
    /// Maps the raw color token used by game definition files to a tier.
    pub fn from_color(color: &str) -> Option<Self> {
        match color.to_ascii_lowercase().as_str() {
            "#b0c3d9" => Some(Self::Common),
            "#5e98d9" => Some(Self::Uncommon),
            "#4b69ff" => Some(Self::Rare),
            "#8847ff" => Some(Self::Mythical),
            "#d32ce6" => Some(Self::Legendary),
            "#eb4b4b" => Some(Self::Ancient),
            "#e4ae39" => Some(Self::Special),
            _ => None,
        }
    }

    /// Fixed base odds used by the roll engine before renormalization.
    ///
    /// Non-special tiers follow a 1:5 geometric ladder; `Special` sits
    /// between `Legendary` and `Ancient` in base-odds order.
    pub const fn base_odds(self) -> f64 {
        match self {
            Self::Common => 0.80,
            Self::Uncommon => 0.16,
            Self::Rare => 0.032,
            Self::Mythical => 0.0064,
            Self::Legendary => 0.001_28,
            Self::Ancient => 0.000_256,
            Self::Special => 0.000_64,
        }
    }
}

/// Discriminates the consumable/utility tool items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Consumed by `rename_item` to set a name tag.
    NameTag,
    /// Consumed by `swap_items_stat_trak`.
    #[serde(rename = "stattrakswap")]
    StatTrakSwap,
    /// Owns a nested, capacity-bounded interior slot space.
    #[serde(rename = "storageunit")]
    StorageUnit,
}

/// Immutable static description of one kind of economy item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub rarity: Rarity,
    /// Weapon model token; used for per-(team, model) equip exclusivity.
    pub model: Option<String>,
    /// Discriminator for `Tool` items.
    pub tool: Option<ToolKind>,
    pub wear_min: Option<f64>,
    pub wear_max: Option<f64>,
    /// Regular container payload (item ids).
    pub contents: Vec<ItemId>,
    /// Rare special payload, rolled as the distinguished `special` tier.
    pub specials: Vec<ItemId>,
    /// Ids of key items accepted when unlocking this container.
    pub keys: Vec<ItemId>,
    /// Every item rolled from this container carries a StatTrak counter.
    pub stat_trak_only: bool,
    /// No item rolled from this container carries a StatTrak counter.
    pub stat_trakless: bool,
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self {
            id: ItemId(0),
            item_type: ItemType::Weapon,
            rarity: Rarity::Common,
            model: None,
            tool: None,
            wear_min: None,
            wear_max: None,
            contents: Vec::new(),
            specials: Vec::new(),
            keys: Vec::new(),
            stat_trak_only: false,
            stat_trakless: false,
        }
    }
}

impl ItemDefinition {
    pub fn new(id: ItemId, item_type: ItemType, rarity: Rarity) -> Self {
        Self {
            id,
            item_type,
            rarity,
            ..Self::default()
        }
    }

    pub fn is_storage_unit(&self) -> bool {
        self.item_type == ItemType::Tool && self.tool == Some(ToolKind::StorageUnit)
    }

    pub fn is_container(&self) -> bool {
        self.item_type == ItemType::Container
    }

    /// Effective wear range for attribute generation.
    pub fn wear_range(&self) -> (f64, f64) {
        (
            self.wear_min
                .unwrap_or(crate::config::InventoryConfig::MIN_WEAR),
            self.wear_max
                .unwrap_or(crate::config::InventoryConfig::MAX_WEAR),
        )
    }
}
