use super::common::{create_test_pair, predictable_rng, TestCombatantBuilder};
use crate::battle::engine::BattleEngine;
use crate::battle::state::BattleEvent;
use pretty_assertions::assert_eq;
use schema::{PokemonType, StatusType};

fn foe() -> crate::pokemon::Combatant {
    TestCombatantBuilder::new("Foe", PokemonType::Normal)
        .with_id(2)
        .build()
}

#[test]
fn test_potion_replaces_move() {
    let mut user = TestCombatantBuilder::new("User", PokemonType::Normal)
        .with_hp(50)
        .with_items(&["Potion"])
        .with_id(1)
        .build();
    user.select_item(0).unwrap();
    let pair = create_test_pair(user, foe());

    let failure = BattleEngine::new(1)
        .resolve(pair, &mut predictable_rng())
        .expect_err("one round is not enough");

    let events = failure.events.events();
    assert!(events.contains(&BattleEvent::PokemonHealed {
        target: "User".to_string(),
        amount: 20,
        new_hp: 70,
    }));
    assert!(!events.iter().any(
        |event| matches!(event, BattleEvent::MoveUsed { pokemon, .. } if pokemon == "User")
    ));
    assert_eq!(failure.pair.first.current_hp(), 51);
    assert!(failure.pair.first.items().is_empty());
    assert_eq!(failure.pair.first.selected_item(), None);
}

#[test]
fn test_reusable_item_used_once_per_selection() {
    let mut user = TestCombatantBuilder::new("User", PokemonType::Normal)
        .with_hp(50)
        .with_items(&["Oran Berry Pouch"])
        .with_id(1)
        .build();
    user.select_item(0).unwrap();
    let pair = create_test_pair(user, foe());

    let failure = BattleEngine::new(2)
        .resolve(pair, &mut predictable_rng())
        .expect_err("two rounds is not enough");

    let uses = failure
        .events
        .events()
        .iter()
        .filter(|event| matches!(event, BattleEvent::ItemUsed { .. }))
        .count();
    assert_eq!(uses, 1);
    assert_eq!(failure.pair.first.items().len(), 1);
}

#[test]
fn test_full_heal_cures_status() {
    let mut user = TestCombatantBuilder::new("User", PokemonType::Normal)
        .with_status(StatusType::Poison)
        .with_items(&["Full Heal"])
        .with_id(1)
        .build();
    user.select_item(0).unwrap();
    let pair = create_test_pair(user, foe());

    let failure = BattleEngine::new(1)
        .resolve(pair, &mut predictable_rng())
        .expect_err("one round is not enough");

    assert_eq!(failure.pair.first.status(), StatusType::Normal);
    assert!(!failure
        .events
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::StatusDamage { .. })));
}

#[test]
fn test_ether_restores_pp() {
    let mut user = TestCombatantBuilder::new("User", PokemonType::Normal)
        .with_move_pp(0)
        .with_items(&["Ether"])
        .with_id(1)
        .build();
    user.select_item(0).unwrap();
    let pair = create_test_pair(user, foe());

    let failure = BattleEngine::new(2)
        .resolve(pair, &mut predictable_rng())
        .expect_err("two rounds is not enough");

    let user_moves: Vec<&str> = failure
        .events
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { pokemon, move_name } if pokemon == "User" => {
                Some(move_name.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(user_moves, vec!["Tackle"]);
    assert_eq!(failure.pair.first.moves().current_move_pp_at(0), Some(9));
    assert_eq!(failure.pair.first.moves().current_move_pp_at(1), Some(10));
}
