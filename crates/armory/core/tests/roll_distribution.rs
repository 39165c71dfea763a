//! Seeded roll distribution sanity: empirical tier frequencies converge to
//! the renormalized base odds, and generated attributes always respect the
//! picked item's eligibility rules.

use std::collections::HashMap;

use armory_core::{
    InventoryConfig, ItemDefinition, ItemId, ItemType, PcgRng, Rarity, roll_container,
};

const DRAWS: usize = 200_000;

fn fixture() -> (HashMap<ItemId, ItemDefinition>, ItemDefinition) {
    let mut defs = HashMap::new();
    let tiers = [
        (1, Rarity::Common),
        (2, Rarity::Uncommon),
        (3, Rarity::Rare),
        (4, Rarity::Mythical),
        (5, Rarity::Legendary),
        (6, Rarity::Ancient),
    ];
    for (id, rarity) in tiers {
        defs.insert(
            ItemId(id),
            ItemDefinition {
                model: Some(format!("model{id}")),
                wear_min: Some(0.06),
                wear_max: Some(0.8),
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
fn tier_frequencies_match_renormalized_odds() {
    let (defs, container) = fixture();
    let mut rng = PcgRng::new(2024);
    let mut counts: HashMap<Rarity, usize> = HashMap::new();
    for _ in 0..DRAWS {
        let roll = roll_container(&container, &defs, &mut rng).unwrap();
        let rarity = defs[&roll.item_id].rarity;
        *counts.entry(rarity).or_default() += 1;
    }

    let total_odds: f64 = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Mythical,
        Rarity::Legendary,
        Rarity::Ancient,
        Rarity::Special,
    ]
    .iter()
    .map(|r| r.base_odds())
    .sum();

    for (rarity, tolerance) in [
        (Rarity::Common, 0.01),
        (Rarity::Uncommon, 0.008),
        (Rarity::Rare, 0.004),
        (Rarity::Mythical, 0.002),
        (Rarity::Legendary, 0.001),
        (Rarity::Special, 0.000_8),
        (Rarity::Ancient, 0.000_5),
    ] {
        let expected = rarity.base_odds() / total_odds;
        let observed = counts.get(&rarity).copied().unwrap_or(0) as f64 / DRAWS as f64;
        assert!(
            (observed - expected).abs() < tolerance,
            "{rarity}: observed {observed:.6}, expected {expected:.6}"
        );
    }
}

#[test]
fn attributes_always_respect_eligibility_and_bounds() {
    let (defs, container) = fixture();
    let mut rng = PcgRng::new(31);
    let mut stat_trak_hits = 0usize;
    for _ in 0..DRAWS {
        let roll = roll_container(&container, &defs, &mut rng).unwrap();
        let def = &defs[&roll.item_id];

        let (min, max) = def.wear_range();
        let wear = roll.wear.expect("weapons and melee carry wear");
        assert!(wear >= min && wear <= max);

        let seed = roll.seed.expect("weapons and melee carry a seed");
        assert!((InventoryConfig::MIN_SEED..=InventoryConfig::MAX_SEED).contains(&seed));

        assert_eq!(roll.special, def.rarity == Rarity::Special);
        if roll.stat_trak.is_some() {
            assert_eq!(roll.stat_trak, Some(0));
            stat_trak_hits += 1;
        }
    }

    // The 1-in-10 StatTrak chance, within a wide band.
    let rate = stat_trak_hits as f64 / DRAWS as f64;
    assert!((0.08..0.12).contains(&rate), "StatTrak rate {rate:.4}");
}
