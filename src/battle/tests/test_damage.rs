use super::common::{predictable_rng, strike, TestCombatantBuilder};
use crate::battle::calculators::{base_damage, calculate_damage};
use crate::battle::stats::move_is_critical;
use crate::move_data::get_move_data;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use schema::{Effectiveness, PokemonType, StatType};

#[test]
fn test_critical_hit_multiplier() {
    let attacker = TestCombatantBuilder::new("Attacker", PokemonType::Normal)
        .with_stat(StatType::Attack, 175)
        .build();
    let defender = TestCombatantBuilder::new("Defender", PokemonType::Normal).build();

    let normal = calculate_damage(&attacker, &defender, &strike(50), false);
    let critical = calculate_damage(&attacker, &defender, &strike(50), true);

    assert_eq!(normal.damage, 40);
    assert_eq!(critical.damage, 60);
}

#[rstest]
#[case(1.0, true)]
#[case(0.5, true)]
#[case(0.49, false)]
#[case(0.0, false)]
fn test_critical_roll_follows_crit_ratio(#[case] ratio: f64, #[case] expected: bool) {
    let attacker = TestCombatantBuilder::new("Attacker", PokemonType::Normal)
        .with_crit_ratio(ratio)
        .build();
    let mut rng = predictable_rng();

    assert_eq!(move_is_critical(&attacker, &mut rng), expected);
}

#[test]
fn test_super_effective_special_move() {
    let attacker = TestCombatantBuilder::new("Squirt", PokemonType::Water)
        .with_moves(&["Water Gun", "Tackle"])
        .with_stat(StatType::Attack, 1)
        .build();
    let defender = TestCombatantBuilder::new("Ember", PokemonType::Fire)
        .with_stat(StatType::Defense, 1000)
        .build();
    let water_gun = get_move_data("Water Gun").unwrap();

    let outcome = calculate_damage(&attacker, &defender, &water_gun, false);

    // Special moves ignore Attack and Defense
    assert_eq!(outcome.effectiveness, Effectiveness::SuperEffective);
    assert_eq!(outcome.damage, 38);
}

#[test]
fn test_immune_defender_takes_nothing() {
    let attacker = TestCombatantBuilder::new("Attacker", PokemonType::Normal).build();
    let ghost = TestCombatantBuilder::new("Ghost", PokemonType::Ghost).build();

    let outcome = calculate_damage(&attacker, &ghost, &strike(80), true);

    assert_eq!(outcome.damage, 0);
    assert_eq!(outcome.effectiveness, Effectiveness::Immune);
}

#[test]
fn test_zero_power_deals_nothing() {
    let attacker = TestCombatantBuilder::new("Singer", PokemonType::Normal).build();
    let defender = TestCombatantBuilder::new("Listener", PokemonType::Normal).build();
    let sing = get_move_data("Sing").unwrap();

    assert_eq!(calculate_damage(&attacker, &defender, &sing, false).damage, 0);
}

#[test]
fn test_resisted_hit_still_deals_damage() {
    let attacker = TestCombatantBuilder::new("Weakling", PokemonType::Normal)
        .with_level(1)
        .with_stat(StatType::Attack, 1)
        .build();
    let rock = TestCombatantBuilder::new("Boulder", PokemonType::Rock)
        .with_stat(StatType::Defense, 1000)
        .build();

    let outcome = calculate_damage(&attacker, &rock, &strike(10), false);

    assert_eq!(outcome.effectiveness, Effectiveness::NotVeryEffective);
    assert_eq!(outcome.damage, 1);
}

proptest! {
    #[test]
    fn damage_grows_with_attack(
        level in 1u8..=100,
        power in 1u16..=250,
        defense in 1i32..=999,
        low in 0i32..=999,
        extra in 0i32..=999,
    ) {
        prop_assert!(base_damage(level, power, low, defense) <= base_damage(level, power, low + extra, defense));
    }

    #[test]
    fn damage_grows_with_power(
        level in 1u8..=100,
        attack in 0i32..=999,
        defense in 1i32..=999,
        low in 1u16..=200,
        extra in 0u16..=50,
    ) {
        prop_assert!(base_damage(level, low, attack, defense) <= base_damage(level, low + extra, attack, defense));
    }

    #[test]
    fn damage_shrinks_with_defense(
        level in 1u8..=100,
        power in 1u16..=250,
        attack in 0i32..=999,
        low in 1i32..=999,
        extra in 0i32..=999,
    ) {
        prop_assert!(base_damage(level, power, attack, low) >= base_damage(level, power, attack, low + extra));
    }

    #[test]
    fn landed_hits_deal_at_least_one(
        attack in 0i32..=500,
        defense in 0i32..=500,
        power in 1u16..=150,
        critical in any::<bool>(),
    ) {
        let attacker = TestCombatantBuilder::new("Attacker", PokemonType::Normal)
            .with_stat(StatType::Attack, attack)
            .build();
        let defender = TestCombatantBuilder::new("Defender", PokemonType::Rock)
            .with_stat(StatType::Defense, defense)
            .build();

        let outcome = calculate_damage(&attacker, &defender, &strike(power), critical);
        prop_assert!(outcome.damage >= 1);
    }
}
