use super::common::{create_test_pair, predictable_rng, TestCombatantBuilder};
use crate::battle::engine::BattleEngine;
use crate::battle::state::{ActionFailureReason, BattleEvent, TurnRng};
use pretty_assertions::assert_eq;
use schema::{PokemonType, StatType, StatusType};

fn one_round() -> BattleEngine {
    BattleEngine::new(1)
}

#[test]
fn test_sleep_blocks_action() {
    let sleeper = TestCombatantBuilder::new("Sleeper", PokemonType::Normal)
        .with_stat(StatType::Speed, 120)
        .with_status(StatusType::Sleep)
        .with_id(1)
        .build();
    let foe = TestCombatantBuilder::new("Foe", PokemonType::Normal)
        .with_id(2)
        .build();
    let pair = create_test_pair(sleeper, foe);

    let failure = one_round()
        .resolve(pair, &mut predictable_rng())
        .expect_err("one round is not enough");

    assert!(failure.events.events().contains(&BattleEvent::ActionFailed {
        pokemon: "Sleeper".to_string(),
        reason: ActionFailureReason::IsAsleep,
    }));
    assert_eq!(failure.pair.first.status(), StatusType::Sleep);
    assert_eq!(failure.pair.first.current_hp(), 81);
    assert_eq!(failure.pair.second.current_hp(), 100);
}

#[test]
fn test_move_inflicts_status() {
    let slammer = TestCombatantBuilder::new("Slammer", PokemonType::Normal)
        .with_moves(&["Body Slam", "Tackle"])
        .with_id(1)
        .build();
    let target = TestCombatantBuilder::new("Target", PokemonType::Normal)
        .with_id(2)
        .build();
    let pair = create_test_pair(slammer, target);
    let mut rng = TurnRng::new_for_test(vec![20]);

    let failure = one_round()
        .resolve(pair, &mut rng)
        .expect_err("one round is not enough");

    let events = failure.events.events();
    assert!(events.contains(&BattleEvent::StatusApplied {
        target: "Target".to_string(),
        status: StatusType::Paralysis,
    }));
    // The same low roll lets it shake the paralysis off on its own action
    assert!(events.contains(&BattleEvent::StatusRemoved {
        target: "Target".to_string(),
        status: StatusType::Paralysis,
    }));
}

#[test]
fn test_electric_type_resists_paralysis() {
    let slammer = TestCombatantBuilder::new("Slammer", PokemonType::Normal)
        .with_moves(&["Body Slam", "Tackle"])
        .with_id(1)
        .build();
    let sparky = TestCombatantBuilder::new("Sparky", PokemonType::Electric)
        .with_id(2)
        .build();
    let pair = create_test_pair(slammer, sparky);

    let failure = one_round()
        .resolve(pair, &mut TurnRng::new_for_test(vec![1]))
        .expect_err("one round is not enough");

    assert_eq!(failure.pair.second.status(), StatusType::Normal);
    assert!(!failure
        .events
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::StatusApplied { .. })));
}

#[test]
fn test_burn_ticks_at_end_of_round() {
    let burned = TestCombatantBuilder::new("Burned", PokemonType::Normal)
        .with_status(StatusType::Burn)
        .with_id(1)
        .build();
    let foe = TestCombatantBuilder::new("Foe", PokemonType::Normal)
        .with_id(2)
        .build();
    let pair = create_test_pair(burned, foe);

    let failure = one_round()
        .resolve(pair, &mut predictable_rng())
        .expect_err("one round is not enough");

    assert!(failure.events.events().contains(&BattleEvent::StatusDamage {
        target: "Burned".to_string(),
        status: StatusType::Burn,
        damage: 6,
        remaining_hp: 75,
    }));
}

#[test]
fn test_confusion_self_hit() {
    let confused = TestCombatantBuilder::new("Dizzy", PokemonType::Normal)
        .with_status(StatusType::Confusion)
        .with_id(1)
        .build();
    let foe = TestCombatantBuilder::new("Foe", PokemonType::Normal)
        .with_id(2)
        .build();
    let pair = create_test_pair(confused, foe);
    let mut rng = TurnRng::new_for_test(vec![40]);

    let failure = one_round()
        .resolve(pair, &mut rng)
        .expect_err("one round is not enough");

    assert!(failure.events.events().contains(&BattleEvent::ConfusionSelfHit {
        target: "Dizzy".to_string(),
        damage: 19,
        remaining_hp: 81,
    }));
    assert_eq!(failure.pair.first.current_hp(), 62);
    assert_eq!(failure.pair.second.current_hp(), 100);
}

#[test]
fn test_end_of_round_ticks_stop_at_first_faint() {
    let poisoned = TestCombatantBuilder::new("Sickly", PokemonType::Normal)
        .with_stat(StatType::Speed, 120)
        .with_hp(1)
        .with_status(StatusType::Poison)
        .with_id(1)
        .build();
    let ghost = TestCombatantBuilder::new("Haunter", PokemonType::Ghost)
        .with_moves(&["Lick", "Shadow Ball"])
        .with_hp(1)
        .with_status(StatusType::Poison)
        .with_id(2)
        .build();
    let pair = create_test_pair(poisoned, ghost);

    let result = BattleEngine::default()
        .resolve(pair, &mut predictable_rng())
        .expect("poison should end it");

    assert_eq!(result.rounds, 1);
    assert_eq!(result.winner.name(), "Haunter");
    assert_eq!(result.winner.current_hp(), 1);
    assert_eq!(result.winner.status(), StatusType::Normal);
    assert_eq!(result.loser.status(), StatusType::Fainted);
}
