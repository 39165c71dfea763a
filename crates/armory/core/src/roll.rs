//! Container roll engine.
//!
//! A roll is a pure function of the container definition and an RNG stream:
//! candidates are bucketed by rarity tier, one tier is chosen by its
//! renormalized base odds, and one candidate is chosen uniformly inside the
//! tier. Attribute generation then follows the picked item's eligibility.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{Capabilities, CatalogOracle, ItemDefinition, ItemId, Rarity};
use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::rng::RollRng;

/// Outcome of one container roll, ready to be written into a store via
/// [`crate::store::Inventory::unlock_container`].
#[derive(Clone, Debug, PartialEq)]
pub struct RollResult {
    pub item_id: ItemId,
    pub wear: Option<f64>,
    pub seed: Option<u32>,
    pub stat_trak: Option<u32>,
    /// Whether the distinguished `special` tier was selected. Affects
    /// presentation only, never state.
    pub special: bool,
    /// Provenance carried onto the created entry.
    pub container_id: ItemId,
}

/// Rolls one item from `container`.
///
/// Fails with `PreconditionFailed` when the container is not a container
/// item or none of its listed contents resolve in the catalog.
pub fn roll_container(
    container: &ItemDefinition,
    catalog: &dyn CatalogOracle,
    rng: &mut dyn RollRng,
) -> Result<RollResult, InventoryError> {
    if !container.is_container() {
        return Err(InventoryError::PreconditionFailed {
            reason: "not a container",
        });
    }

    let buckets = bucket_contents(container, catalog);
    if buckets.is_empty() {
        return Err(InventoryError::PreconditionFailed {
            reason: "container has no eligible contents",
        });
    }

    let tier = select_tier(&buckets, rng.next_f64());
    let candidates = &buckets[&tier];
    let item_id = candidates[rng.index(candidates.len())];
    let picked = catalog.definition(item_id).expect("bucketed from catalog");

    let caps = picked.item_type.capabilities();
    let seed = caps.contains(Capabilities::SEED).then(|| {
        rng.range_u32(InventoryConfig::MIN_SEED, InventoryConfig::MAX_SEED)
    });
    let wear = caps.contains(Capabilities::WEAR).then(|| {
        let (min, max) = picked.wear_range();
        rng.range_f64(min, max)
    });
    let stat_trak = if caps.contains(Capabilities::STAT_TRAK) && !container.stat_trakless {
        if container.stat_trak_only || rng.index(InventoryConfig::STAT_TRAK_ODDS as usize) == 0 {
            Some(0)
        } else {
            None
        }
    } else {
        None
    };

    debug!(
        container = container.id.0,
        item = item_id.0,
        %tier,
        "container roll"
    );
    Ok(RollResult {
        item_id,
        wear,
        seed,
        stat_trak,
        special: tier == Rarity::Special,
        container_id: container.id,
    })
}

/// Partitions contents into rarity buckets, dropping ids the catalog no
/// longer knows. Regular contents rarer than `Ancient` collapse into the
/// `Ancient` bucket; `specials` always form the `Special` tier.
fn bucket_contents(
    container: &ItemDefinition,
    catalog: &dyn CatalogOracle,
) -> BTreeMap<Rarity, Vec<ItemId>> {
    let mut buckets: BTreeMap<Rarity, Vec<ItemId>> = BTreeMap::new();
    for &id in &container.contents {
        if let Some(def) = catalog.definition(id) {
            let tier = def.rarity.min(Rarity::Ancient);
            buckets.entry(tier).or_default().push(id);
        }
    }
    for &id in &container.specials {
        if catalog.contains(id) {
            buckets.entry(Rarity::Special).or_default().push(id);
        }
    }
    buckets
}

/// Selects a present tier from a uniform draw in `[0, 1)`.
///
/// Base odds are renormalized over the present tiers, and the cumulative
/// walk runs in ascending base-odds order so ties break deterministically
/// for a given draw value.
fn select_tier(buckets: &BTreeMap<Rarity, Vec<ItemId>>, draw: f64) -> Rarity {
    let mut present: Vec<Rarity> = buckets.keys().copied().collect();
    present.sort_by(|a, b| {
        a.base_odds()
            .partial_cmp(&b.base_odds())
            .expect("odds are finite")
            .then(a.cmp(b))
    });
    let total: f64 = present.iter().map(|tier| tier.base_odds()).sum();

    let mut cumulative = 0.0;
    for &tier in &present {
        cumulative += tier.base_odds() / total;
        if draw <= cumulative {
            return tier;
        }
    }
    // Float slop can leave the final cumulative a hair under 1.0.
    *present.last().expect("buckets are non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemType;
    use crate::rng::PcgRng;
    use std::collections::HashMap;

    fn fixture() -> (HashMap<ItemId, ItemDefinition>, ItemDefinition) {
        let mut defs = HashMap::new();
        let rarities = [
            (1, Rarity::Common),
            (2, Rarity::Uncommon),
            (3, Rarity::Rare),
            (4, Rarity::Mythical),
            (5, Rarity::Legendary),
            (6, Rarity::Ancient),
        ];
        for (id, rarity) in rarities {
            defs.insert(
                ItemId(id),
                ItemDefinition {
                    model: Some(format!("model{id}")),
                    ..ItemDefinition::new(ItemId(id), ItemType::Weapon, rarity)
                },
            );
        }
        defs.insert(
            ItemId(7),
            ItemDefinition::new(ItemId(7), ItemType::Melee, Rarity::Special),
        );
        let container = ItemDefinition {
            contents: (1..=6).map(ItemId).collect(),
            specials: vec![ItemId(7)],
            ..ItemDefinition::new(ItemId(100), ItemType::Container, Rarity::Common)
        };
        defs.insert(ItemId(100), container.clone());
        (defs, container)
    }

    #[test]
    fn empty_container_is_a_precondition_failure() {
        let (defs, _) = fixture();
        let empty = ItemDefinition::new(ItemId(101), ItemType::Container, Rarity::Common);
        let mut rng = PcgRng::new(1);
        assert!(matches!(
            roll_container(&empty, &defs, &mut rng),
            Err(InventoryError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn non_container_is_rejected() {
        let (defs, _) = fixture();
        let def = defs[&ItemId(1)].clone();
        let mut rng = PcgRng::new(1);
        assert!(roll_container(&def, &defs, &mut rng).is_err());
    }

    #[test]
    fn unresolvable_contents_are_skipped() {
        let (defs, _) = fixture();
        let container = ItemDefinition {
            contents: vec![ItemId(1), ItemId(999)],
            ..ItemDefinition::new(ItemId(102), ItemType::Container, Rarity::Common)
        };
        let mut rng = PcgRng::new(3);
        for _ in 0..50 {
            let roll = roll_container(&container, &defs, &mut rng).unwrap();
            assert_eq!(roll.item_id, ItemId(1));
        }
    }

    #[test]
    fn tier_selection_is_deterministic_at_the_boundaries() {
        let (defs, container) = fixture();
        let buckets = super::bucket_contents(&container, &defs);
        // Ascending base odds puts Ancient first and Common last.
        assert_eq!(select_tier(&buckets, 0.0), Rarity::Ancient);
        assert_eq!(select_tier(&buckets, 0.999_999_9), Rarity::Common);
    }

    #[test]
    fn renormalization_only_spans_present_tiers() {
        let (defs, _) = fixture();
        // Two tiers present: odds 0.80 and 0.16 renormalize to 5/6 and 1/6,
        // walked in ascending order (uncommon first).
        let container = ItemDefinition {
            contents: vec![ItemId(1), ItemId(2)],
            ..ItemDefinition::new(ItemId(103), ItemType::Container, Rarity::Common)
        };
        let buckets = super::bucket_contents(&container, &defs);
        assert_eq!(select_tier(&buckets, 0.1), Rarity::Uncommon);
        assert_eq!(select_tier(&buckets, 0.2), Rarity::Common);
    }

    #[test]
    fn attributes_respect_eligibility_and_bounds() {
        let (mut defs, mut container) = fixture();
        defs.get_mut(&ItemId(1)).unwrap().wear_min = Some(0.1);
        defs.get_mut(&ItemId(1)).unwrap().wear_max = Some(0.3);
        container.contents = vec![ItemId(1)];

        let mut rng = PcgRng::new(11);
        for _ in 0..200 {
            let roll = roll_container(&container, &defs, &mut rng).unwrap();
            let wear = roll.wear.unwrap();
            assert!((0.1..=0.3).contains(&wear));
            let seed = roll.seed.unwrap();
            assert!((InventoryConfig::MIN_SEED..=InventoryConfig::MAX_SEED).contains(&seed));
            assert!(roll.stat_trak.is_none() || roll.stat_trak == Some(0));
        }
    }

    #[test]
    fn stat_trak_container_flags_are_honored() {
        let (defs, mut container) = fixture();
        container.contents = vec![ItemId(1)];

        container.stat_trak_only = true;
        let mut rng = PcgRng::new(5);
        for _ in 0..20 {
            let roll = roll_container(&container, &defs, &mut rng).unwrap();
            assert_eq!(roll.stat_trak, Some(0));
        }

        container.stat_trak_only = false;
        container.stat_trakless = true;
        for _ in 0..20 {
            let roll = roll_container(&container, &defs, &mut rng).unwrap();
            assert_eq!(roll.stat_trak, None);
        }
    }

    #[test]
    fn special_tier_is_reported() {
        let (defs, container) = fixture();
        let mut rng = PcgRng::new(17);
        let mut saw_special = false;
        for _ in 0..100_000 {
            let roll = roll_container(&container, &defs, &mut rng).unwrap();
            if roll.special {
                saw_special = true;
                assert_eq!(roll.item_id, ItemId(7));
            }
            assert_eq!(roll.container_id, ItemId(100));
        }
        assert!(saw_special, "special tier never selected in 100k draws");
    }
}
