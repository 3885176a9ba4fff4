use crate::battle::state::{ActionFailureReason, BattleEvent, EventBus, TurnRng};
use crate::pokemon::Combatant;
use schema::{PokemonType, StatusInfliction, StatusType};
use tracing::debug;

const PARALYSIS_BLOCK_CHANCE: u8 = 25;
const CONFUSION_SELF_HIT_CHANCE: u8 = 50;
const BURN_DIVISOR: i32 = 16;
const POISON_DIVISOR: i32 = 8;

/// What a combatant may do after its start-of-action status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCheck {
    Proceed,
    Blocked(ActionFailureReason),
    HurtItself,
}

/// Status transitions and their per-turn effects.
pub struct StatusEngine;

impl StatusEngine {
    /// Percent chance to shake off a status at the start of an action.
    pub fn recovery_chance(status: StatusType) -> u8 {
        match status {
            StatusType::Freeze => 20,
            StatusType::Sleep => 33,
            StatusType::Paralysis | StatusType::Bound | StatusType::Confusion => 25,
            _ => 0,
        }
    }

    pub fn is_immune(pokemon_type: PokemonType, status: StatusType) -> bool {
        matches!(
            (pokemon_type, status),
            (PokemonType::Fire, StatusType::Burn)
                | (PokemonType::Ice, StatusType::Freeze)
                | (PokemonType::Electric, StatusType::Paralysis)
                | (PokemonType::Poison, StatusType::Poison)
                | (PokemonType::Steel, StatusType::Poison)
        )
    }

    /// Roll a move's status infliction against `target`.
    /// Only a healthy target with no status can be afflicted, and the roll is
    /// skipped entirely otherwise.
    pub fn try_inflict(
        &self,
        target: &mut Combatant,
        infliction: StatusInfliction,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> bool {
        if target.status() != StatusType::Normal
            || !infliction.status.is_afflicted()
            || Self::is_immune(target.pokemon_type(), infliction.status)
        {
            return false;
        }
        if !rng.roll_percent(infliction.chance, "Status Infliction") {
            return false;
        }
        if target.set_status(infliction.status).is_err() {
            return false;
        }
        debug!(target = target.name(), status = %infliction.status, "status inflicted");
        bus.push(BattleEvent::StatusApplied {
            target: target.name().to_string(),
            status: infliction.status,
        });
        true
    }

    /// Recovery roll followed by the blocking roll for whatever status remains.
    pub fn start_of_action(
        &self,
        actor: &mut Combatant,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> ActionCheck {
        let status = actor.status();
        if !status.recovers_over_time() {
            return ActionCheck::Proceed;
        }

        if rng.roll_percent(Self::recovery_chance(status), "Status Recovery")
            && actor.set_status(StatusType::Normal).is_ok()
        {
            bus.push(BattleEvent::StatusRemoved {
                target: actor.name().to_string(),
                status,
            });
            return ActionCheck::Proceed;
        }

        match status {
            StatusType::Freeze => ActionCheck::Blocked(ActionFailureReason::IsFrozen),
            StatusType::Sleep => ActionCheck::Blocked(ActionFailureReason::IsAsleep),
            StatusType::Bound => ActionCheck::Blocked(ActionFailureReason::IsBound),
            StatusType::Paralysis => {
                if rng.roll_percent(PARALYSIS_BLOCK_CHANCE, "Paralysis Check") {
                    ActionCheck::Blocked(ActionFailureReason::IsParalyzed)
                } else {
                    ActionCheck::Proceed
                }
            }
            StatusType::Confusion => {
                if rng.roll_percent(CONFUSION_SELF_HIT_CHANCE, "Confusion Check") {
                    ActionCheck::HurtItself
                } else {
                    ActionCheck::Proceed
                }
            }
            _ => ActionCheck::Proceed,
        }
    }

    /// HP lost to a damaging status at the end of a round.
    pub fn tick_damage(status: StatusType, max_hp: i32) -> i32 {
        match status {
            StatusType::Burn => (max_hp / BURN_DIVISOR).max(1),
            StatusType::Poison => (max_hp / POISON_DIVISOR).max(1),
            _ => 0,
        }
    }

    /// Apply end-of-round burn or poison damage. Returns true if it fainted the combatant.
    pub fn end_of_turn(&self, combatant: &mut Combatant, bus: &mut EventBus) -> bool {
        let status = combatant.status();
        if !status.ticks_damage() {
            return false;
        }

        let damage = Self::tick_damage(status, combatant.max_hp());
        let change = combatant.add_hp(-damage);
        bus.push(BattleEvent::StatusDamage {
            target: combatant.name().to_string(),
            status,
            damage: change.amount(),
            remaining_hp: change.current,
        });

        if combatant.is_fainted() {
            bus.push(BattleEvent::PokemonFainted {
                pokemon: combatant.name().to_string(),
            });
            return true;
        }
        false
    }
}
