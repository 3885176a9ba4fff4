use crate::battle::stats::{effective_attack, effective_defense};
use crate::pokemon::Combatant;
use ordered_float::OrderedFloat;
use schema::{Effectiveness, MoveData, PokemonType, StatType};

pub const CRITICAL_MULTIPLIER: f64 = 1.5;
pub const CONFUSION_POWER: u16 = 40;
const STRUGGLE_RECOIL_DIVISOR: i32 = 4;

/// Result of a damage calculation before it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: i32,
    pub effectiveness: Effectiveness,
}

/// The move a combatant will use this action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    Slot(usize),
    Struggle,
}

/// Integer base damage: ((2 × Level / 5 + 2) × Power × A / D) / 50 + 2
pub fn base_damage(level: u8, power: u16, attack: i32, defense: i32) -> i64 {
    let level_factor = 2 * level as i64 / 5 + 2;
    let defense = defense.max(1) as i64;
    (level_factor * power as i64 * attack.max(0) as i64 / defense) / 50 + 2
}

/// Damage a move deals to `defender`. Power-0 moves and immune matchups deal
/// nothing; any other hit deals at least 1.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    critical: bool,
) -> DamageOutcome {
    let effectiveness = PokemonType::effectiveness(move_data.move_type, defender.pokemon_type());
    if move_data.power == 0 || effectiveness == Effectiveness::Immune {
        return DamageOutcome {
            damage: 0,
            effectiveness,
        };
    }

    let base = base_damage(
        attacker.level(),
        move_data.power,
        effective_attack(attacker, move_data),
        effective_defense(defender, move_data),
    );
    let crit = if critical { CRITICAL_MULTIPLIER } else { 1.0 };
    let damage = (base as f64 * effectiveness.multiplier() * crit).floor() as i64;

    DamageOutcome {
        damage: damage.clamp(1, i32::MAX as i64) as i32,
        effectiveness,
    }
}

/// A confused combatant's hit on itself: typeless 40 power, own Attack vs own Defense.
pub fn confusion_damage(pokemon: &Combatant) -> i32 {
    let base = base_damage(
        pokemon.level(),
        CONFUSION_POWER,
        pokemon.stats().current(StatType::Attack),
        pokemon.stats().current(StatType::Defense),
    );
    base.clamp(1, i32::MAX as i64) as i32
}

/// Recoil taken after Struggle lands: a quarter of the damage dealt, at least 1.
pub fn struggle_recoil(damage_dealt: i32) -> i32 {
    if damage_dealt <= 0 {
        return 0;
    }
    (damage_dealt / STRUGGLE_RECOIL_DIVISOR).max(1)
}

/// Expected value of a move against a defender type: power × effectiveness × accuracy
pub fn move_score(move_data: &MoveData, defender_type: PokemonType) -> f64 {
    let effectiveness = PokemonType::effectiveness(move_data.move_type, defender_type);
    move_data.power as f64 * effectiveness.multiplier() * move_data.accuracy as f64 / 100.0
}

/// Pick the move to use: the selected move while it has PP, otherwise the
/// best-scoring move with PP (ties to the lower slot), otherwise Struggle.
pub fn choose_move(attacker: &Combatant, defender: &Combatant) -> MoveChoice {
    let moves = attacker.moves();

    if let Some(selected) = attacker.selected_move() {
        if moves.current_move_pp_at(selected).unwrap_or(0) > 0 {
            return MoveChoice::Slot(selected);
        }
    }

    moves
        .iter()
        .enumerate()
        .filter(|(_, mv)| mv.pp > 0)
        .map(|(index, mv)| {
            (
                index,
                OrderedFloat(move_score(&mv.data, defender.pokemon_type())),
            )
        })
        .max_by(|(a_index, a_score), (b_index, b_score)| {
            a_score.cmp(b_score).then(b_index.cmp(a_index))
        })
        .map(|(index, _)| MoveChoice::Slot(index))
        .unwrap_or(MoveChoice::Struggle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(50, 50, 175, 100, 40)]
    #[case(50, 50, 100, 100, 24)]
    #[case(1, 40, 10, 10, 3)]
    #[case(100, 100, 200, 0, 2 + (42 * 100 * 200) / 50)]
    fn test_base_damage(
        #[case] level: u8,
        #[case] power: u16,
        #[case] attack: i32,
        #[case] defense: i32,
        #[case] expected: i64,
    ) {
        assert_eq!(base_damage(level, power, attack, defense), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 1)]
    #[case(40, 10)]
    #[case(41, 10)]
    fn test_struggle_recoil(#[case] damage: i32, #[case] expected: i32) {
        assert_eq!(struggle_recoil(damage), expected);
    }

    #[test]
    fn test_move_score() {
        let surf = get_move_data("Surf").unwrap();
        assert_eq!(move_score(&surf, PokemonType::Fire), 180.0);
        assert_eq!(move_score(&surf, PokemonType::Grass), 45.0);

        let iron_tail = get_move_data("Iron Tail").unwrap();
        assert_eq!(move_score(&iron_tail, PokemonType::Rock), 150.0);

        let sing = get_move_data("Sing").unwrap();
        assert_eq!(move_score(&sing, PokemonType::Normal), 0.0);
    }
}
