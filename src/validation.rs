use crate::errors::{ValidationError, ValidationResult};
use crate::items::MAX_ITEMS;
use crate::moves::{MAX_MOVES, MIN_MOVES};
use crate::pokemon::Combatant;
use schema::StatusType;
use tracing::warn;

/// Outcome of an inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Disqualify(ValidationError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Audits combatants before they are allowed to battle.
///
/// Checks run in a fixed order and stop at the first failure: move count,
/// non-negative stats, HP and status consistency, move and type
/// compatibility, critical-hit ratios, then held items and experience.
/// Inspection never mutates the combatant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficerJenny;

impl OfficerJenny {
    pub fn inspect(&self, combatant: &Combatant) -> Verdict {
        match self.check(combatant) {
            Ok(()) => Verdict::Pass,
            Err(error) => {
                warn!(
                    id = combatant.id(),
                    name = combatant.name(),
                    %error,
                    "combatant disqualified"
                );
                Verdict::Disqualify(error)
            }
        }
    }

    /// Inspect every combatant, returning the ids and reasons of those disqualified.
    pub fn inspect_all<'a, I>(&self, combatants: I) -> Vec<(u32, ValidationError)>
    where
        I: IntoIterator<Item = &'a Combatant>,
    {
        combatants
            .into_iter()
            .filter_map(|combatant| match self.inspect(combatant) {
                Verdict::Pass => None,
                Verdict::Disqualify(error) => Some((combatant.id(), error)),
            })
            .collect()
    }

    /// The same audit as `inspect`, as a `Result`.
    pub fn check(&self, combatant: &Combatant) -> ValidationResult<()> {
        check_move_total(combatant)?;
        check_stat_values(combatant)?;
        check_hp_and_status(combatant)?;
        check_move_types(combatant)?;
        check_crit_ratios(combatant)?;
        check_items(combatant)?;
        check_experience(combatant)
    }
}

fn check_move_total(combatant: &Combatant) -> ValidationResult<()> {
    let count = combatant.moves().len();
    if !(MIN_MOVES..=MAX_MOVES).contains(&count) {
        return Err(ValidationError::InvalidMoveTotal(format!(
            "{} knows {} moves; allowed range is {}-{}",
            combatant.name(),
            count,
            MIN_MOVES,
            MAX_MOVES
        )));
    }
    Ok(())
}

fn check_stat_values(combatant: &Combatant) -> ValidationResult<()> {
    if let Some((stat, value)) = combatant.stats().first_negative() {
        return Err(ValidationError::InvalidPokemonValues(format!(
            "{} has negative {} ({})",
            combatant.name(),
            stat,
            value
        )));
    }
    Ok(())
}

fn check_hp_and_status(combatant: &Combatant) -> ValidationResult<()> {
    let hp = combatant.current_hp();
    let max_hp = combatant.max_hp();
    if max_hp == 0 || hp > max_hp {
        return Err(ValidationError::InvalidPokemonValues(format!(
            "{} has {} HP out of a maximum of {}",
            combatant.name(),
            hp,
            max_hp
        )));
    }
    if (hp == 0) != (combatant.status() == StatusType::Fainted) {
        return Err(ValidationError::InvalidPokemonValues(format!(
            "{} has {} HP but status {}",
            combatant.name(),
            hp,
            combatant.status()
        )));
    }
    Ok(())
}

fn check_move_types(combatant: &Combatant) -> ValidationResult<()> {
    let owner_type = combatant.pokemon_type();
    match combatant
        .moves()
        .iter()
        .find(|mv| !owner_type.can_learn(mv.data.move_type))
    {
        Some(mv) => Err(ValidationError::InvalidType(format!(
            "{} is {} type and cannot use the {} move {}",
            combatant.name(),
            owner_type,
            mv.data.move_type,
            mv.name()
        ))),
        None => Ok(()),
    }
}

fn check_crit_ratios(combatant: &Combatant) -> ValidationResult<()> {
    let stats = combatant.stats();
    for ratio in [stats.base_crit_ratio(), stats.crit_ratio()] {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ValidationError::InvalidPokemonValues(format!(
                "{} has critical-hit ratio {} outside [0, 1]",
                combatant.name(),
                ratio
            )));
        }
    }
    Ok(())
}

fn check_items(combatant: &Combatant) -> ValidationResult<()> {
    if combatant.items().len() > MAX_ITEMS {
        return Err(ValidationError::InvalidPokemonPoints(format!(
            "{} holds {} items; at most {} are allowed",
            combatant.name(),
            combatant.items().len(),
            MAX_ITEMS
        )));
    }
    Ok(())
}

fn check_experience(combatant: &Combatant) -> ValidationResult<()> {
    if !combatant.level_matches_exp() {
        return Err(ValidationError::InvalidExp(format!(
            "{} is level {} with {} total experience",
            combatant.name(),
            combatant.level(),
            combatant.total_exp()
        )));
    }
    Ok(())
}
