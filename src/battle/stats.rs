use crate::battle::state::TurnRng;
use crate::pokemon::Combatant;
use schema::{MoveCategory, MoveData, StatType, StatusType};

/// Attack stat used by a move: Attack for physical, Special Attack for special
pub fn effective_attack(pokemon: &Combatant, move_data: &MoveData) -> i32 {
    match move_data.category {
        MoveCategory::Physical => pokemon.stats().current(StatType::Attack),
        MoveCategory::Special => pokemon.stats().current(StatType::SpecialAttack),
    }
}

/// Defense stat a move is resisted by
pub fn effective_defense(pokemon: &Combatant, move_data: &MoveData) -> i32 {
    match move_data.category {
        MoveCategory::Physical => pokemon.stats().current(StatType::Defense),
        MoveCategory::Special => pokemon.stats().current(StatType::SpecialDefense),
    }
}

/// Calculate effective speed, quartered by paralysis
pub fn effective_speed(pokemon: &Combatant) -> i32 {
    let speed = pokemon.stats().current(StatType::Speed);
    if pokemon.status() == StatusType::Paralysis {
        speed / 4
    } else {
        speed
    }
}

/// Probability that a move lands, in [0, 1].
/// Zero defender evasion means the move cannot miss.
pub fn hit_probability(move_accuracy: u8, attacker_accuracy: i32, defender_evasion: i32) -> f64 {
    if defender_evasion <= 0 {
        return 1.0;
    }
    let probability =
        move_accuracy as f64 / 100.0 * attacker_accuracy as f64 / defender_evasion as f64;
    probability.clamp(0.0, 1.0)
}

/// Convert a probability into a percentile threshold for `TurnRng` rolls
pub fn percent_threshold(probability: f64) -> u8 {
    (probability.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Roll whether a move hits. One roll is always consumed.
pub fn move_hits(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> bool {
    let probability = hit_probability(
        move_data.accuracy,
        attacker.stats().current(StatType::Accuracy),
        defender.stats().current(StatType::Evasion),
    );
    rng.roll_percent(percent_threshold(probability), "Accuracy Check")
}

/// Roll for a critical hit against the attacker's current ratio.
pub fn move_is_critical(attacker: &Combatant, rng: &mut TurnRng) -> bool {
    rng.roll_percent(percent_threshold(attacker.crit_ratio()), "Critical Hit Check")
}
