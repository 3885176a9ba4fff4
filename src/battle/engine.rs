use crate::battle::calculators::{
    calculate_damage, choose_move, confusion_damage, struggle_recoil, MoveChoice,
};
use crate::battle::state::{
    BattleEvent, BattleFailure, BattlePair, BattleResult, EventBus, RemovalDirective, TurnRng,
};
use crate::battle::stats::{effective_speed, move_hits, move_is_critical};
use crate::battle::status::{ActionCheck, StatusEngine};
use crate::errors::{BattleEngineError, BattleEngineResult};
use crate::pokemon::Combatant;
use crate::progression::RewardCalculator;
use crate::validation::{OfficerJenny, Verdict};
use schema::{Effectiveness, ItemEffect, MoveData, StatusType};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ROUNDS: u32 = 200;

/// Resolves a pair of combatants into a winner, one round at a time.
#[derive(Debug, Clone, Copy)]
pub struct BattleEngine {
    max_rounds: u32,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl BattleEngine {
    pub fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Fight until one combatant faints.
    ///
    /// Both combatants must be conscious and pass inspection. On any failure
    /// the pair is handed back inside the `BattleFailure`.
    pub fn resolve(
        &self,
        mut pair: BattlePair,
        rng: &mut TurnRng,
    ) -> Result<BattleResult, BattleFailure> {
        let mut bus = EventBus::new();

        if let Err(error) = self.check_preconditions(&pair) {
            warn!(%error, "battle refused");
            return Err(BattleFailure {
                error,
                pair,
                events: bus,
            });
        }

        info!(
            first = pair.first.name(),
            second = pair.second.name(),
            "battle started"
        );
        bus.push(BattleEvent::BattleStarted {
            first: pair.first.name().to_string(),
            second: pair.second.name().to_string(),
        });

        let mut round = 0;
        let loser_index = loop {
            if round >= self.max_rounds {
                warn!(rounds = round, "battle hit the round limit");
                pair.first.reset_after_battle();
                pair.second.reset_after_battle();
                return Err(BattleFailure {
                    error: BattleEngineError::Stalemate(self.max_rounds),
                    pair,
                    events: bus,
                });
            }
            round += 1;
            if let Some(loser) = self.resolve_round(round, &mut pair, rng, &mut bus) {
                break loser;
            }
        };

        Ok(self.finalize_battle(pair, loser_index, round, bus))
    }

    fn check_preconditions(&self, pair: &BattlePair) -> BattleEngineResult<()> {
        let jenny = OfficerJenny;
        for combatant in [&pair.first, &pair.second] {
            if combatant.is_fainted() {
                return Err(BattleEngineError::AlreadyFainted(
                    combatant.name().to_string(),
                ));
            }
            if let Verdict::Disqualify(reason) = jenny.inspect(combatant) {
                return Err(BattleEngineError::FailedInspection {
                    name: combatant.name().to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Run one round. Returns the index of the first combatant to faint.
    fn resolve_round(
        &self,
        round: u32,
        pair: &mut BattlePair,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> Option<usize> {
        debug!(round, "round started");
        bus.push(BattleEvent::RoundStarted { round });

        let order = determine_action_order(pair);

        for actor in order {
            if pair.get(actor).is_fainted() {
                continue;
            }
            execute_action(actor, pair, rng, bus);
            if let Some(fainted) = first_fainted(pair, order) {
                return Some(fainted);
            }
        }

        // End-of-round ticks run in action order and stop at the first faint
        let status_engine = StatusEngine;
        for index in order {
            let (combatant, _) = pair.split(index);
            if status_engine.end_of_turn(combatant, bus) {
                return Some(index);
            }
        }

        bus.push(BattleEvent::RoundEnded);
        None
    }

    fn finalize_battle(
        &self,
        pair: BattlePair,
        loser_index: usize,
        rounds: u32,
        mut bus: EventBus,
    ) -> BattleResult {
        let (first, second) = pair.into_inner();
        let (mut winner, mut loser) = if loser_index == 0 {
            (second, first)
        } else {
            (first, second)
        };

        let rewards = RewardCalculator;
        let exp_awarded = rewards.experience_award(loser.level(), loser.base_stat_total());
        award_experience(&mut winner, exp_awarded, &rewards, &mut bus);

        winner.record_win();
        winner.reset_after_battle();
        loser.reset_after_battle();
        if winner.status().is_afflicted() {
            if let Err(error) = winner.set_status(StatusType::Normal) {
                warn!(%error, "could not clear winner status");
            }
        }

        info!(
            winner = winner.name(),
            loser = loser.name(),
            rounds,
            exp_awarded,
            "battle ended"
        );
        bus.push(BattleEvent::BattleEnded {
            winner: winner.name().to_string(),
            loser: loser.name().to_string(),
            rounds,
        });

        let removal = RemovalDirective::Fainted { id: loser.id() };
        BattleResult {
            winner,
            loser,
            exp_awarded,
            removal,
            rounds,
            events: bus,
        }
    }
}

/// Higher effective speed acts first; ties keep pair order.
pub fn determine_action_order(pair: &BattlePair) -> [usize; 2] {
    if effective_speed(&pair.second) > effective_speed(&pair.first) {
        [1, 0]
    } else {
        [0, 1]
    }
}

fn first_fainted(pair: &BattlePair, order: [usize; 2]) -> Option<usize> {
    order.into_iter().find(|&index| pair.get(index).is_fainted())
}

fn execute_action(actor: usize, pair: &mut BattlePair, rng: &mut TurnRng, bus: &mut EventBus) {
    let (attacker, defender) = pair.split(actor);

    match StatusEngine.start_of_action(attacker, rng, bus) {
        ActionCheck::Blocked(reason) => {
            bus.push(BattleEvent::ActionFailed {
                pokemon: attacker.name().to_string(),
                reason,
            });
            return;
        }
        ActionCheck::HurtItself => {
            let change = attacker.add_hp(-confusion_damage(attacker));
            bus.push(BattleEvent::ConfusionSelfHit {
                target: attacker.name().to_string(),
                damage: change.amount(),
                remaining_hp: change.current,
            });
            push_if_fainted(attacker, bus);
            return;
        }
        ActionCheck::Proceed => {}
    }

    if let Some(slot) = attacker.selected_item() {
        execute_item(attacker, slot, bus);
        return;
    }

    execute_move(attacker, defender, rng, bus);
}

fn execute_item(user: &mut Combatant, slot: usize, bus: &mut EventBus) {
    let item_name = match user.items().get(slot) {
        Some(item) => item.name.clone(),
        None => return,
    };
    user.clear_item_selection();
    let Some(effect) = user.use_item(slot) else {
        return;
    };

    bus.push(BattleEvent::ItemUsed {
        pokemon: user.name().to_string(),
        item: item_name,
    });

    match effect {
        ItemEffect::Heal(amount) => {
            let change = user.add_hp(amount as i32);
            bus.push(BattleEvent::PokemonHealed {
                target: user.name().to_string(),
                amount: change.amount(),
                new_hp: change.current,
            });
        }
        ItemEffect::Cure => {
            let status = user.status();
            if status.is_afflicted() && user.set_status(StatusType::Normal).is_ok() {
                bus.push(BattleEvent::StatusRemoved {
                    target: user.name().to_string(),
                    status,
                });
            }
        }
        ItemEffect::Boost { stat, amount } => {
            let new_value = user.boost_stat(stat, amount as i32);
            bus.push(BattleEvent::StatBoosted {
                target: user.name().to_string(),
                stat,
                new_value,
            });
        }
        ItemEffect::RestorePp(amount) => {
            user.moves_mut().restore_all_pp(amount);
            bus.push(BattleEvent::PpRestored {
                target: user.name().to_string(),
                amount,
            });
        }
    }
}

fn execute_move(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let choice = choose_move(attacker, defender);
    let move_data = match choice {
        MoveChoice::Slot(index) => match attacker.moves_mut().get_mut(index) {
            Some(mv) => {
                mv.use_pp();
                mv.data.clone()
            }
            None => MoveData::struggle(),
        },
        MoveChoice::Struggle => MoveData::struggle(),
    };

    bus.push(BattleEvent::MoveUsed {
        pokemon: attacker.name().to_string(),
        move_name: move_data.name.clone(),
    });

    if !move_hits(attacker, defender, &move_data, rng) {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker.name().to_string(),
            defender: defender.name().to_string(),
            move_name: move_data.name.clone(),
        });
        return;
    }

    if move_data.power > 0 {
        let critical = move_is_critical(attacker, rng);
        let outcome = calculate_damage(attacker, defender, &move_data, critical);

        if outcome.effectiveness != Effectiveness::Normal {
            bus.push(BattleEvent::AttackTypeEffectiveness {
                multiplier: outcome.effectiveness.multiplier(),
            });
        }
        if outcome.effectiveness == Effectiveness::Immune {
            return;
        }
        if critical {
            bus.push(BattleEvent::CriticalHit {
                attacker: attacker.name().to_string(),
                defender: defender.name().to_string(),
                move_name: move_data.name.clone(),
            });
        }

        let change = defender.add_hp(-outcome.damage);
        bus.push(BattleEvent::DamageDealt {
            target: defender.name().to_string(),
            damage: change.amount(),
            remaining_hp: change.current,
        });
        if push_if_fainted(defender, bus) {
            return;
        }

        if choice == MoveChoice::Struggle {
            let recoil = attacker.add_hp(-struggle_recoil(change.amount()));
            bus.push(BattleEvent::RecoilDamage {
                target: attacker.name().to_string(),
                damage: recoil.amount(),
                remaining_hp: recoil.current,
            });
            if push_if_fainted(attacker, bus) {
                return;
            }
        }
    }

    if let Some(infliction) = move_data.infliction {
        StatusEngine.try_inflict(defender, infliction, rng, bus);
    }
}

fn push_if_fainted(combatant: &Combatant, bus: &mut EventBus) -> bool {
    if combatant.is_fainted() {
        bus.push(BattleEvent::PokemonFainted {
            pokemon: combatant.name().to_string(),
        });
        return true;
    }
    false
}

fn award_experience(
    winner: &mut Combatant,
    amount: u32,
    rewards: &RewardCalculator,
    bus: &mut EventBus,
) {
    let change = match winner.add_exp(amount as i64) {
        Ok(change) => change,
        Err(error) => {
            warn!(%error, "experience award rejected");
            return;
        }
    };
    bus.push(BattleEvent::ExperienceGained {
        pokemon: winner.name().to_string(),
        amount,
    });
    if !change.leveled_up() {
        return;
    }
    bus.push(BattleEvent::LevelUp {
        pokemon: winner.name().to_string(),
        new_level: change.to,
    });

    match rewards.should_evolve(winner.species(), winner.level()) {
        Ok(Some(evolved)) => {
            let from = winner.name().to_string();
            match winner.evolve_into(&evolved) {
                Ok(()) => {
                    info!(from = %from, into = %evolved.name, "combatant evolved");
                    bus.push(BattleEvent::Evolved {
                        from,
                        into: evolved.name.clone(),
                    });
                }
                Err(error) => warn!(%error, "evolution failed"),
            }
        }
        Ok(None) => {}
        Err(error) => debug!(%error, "no species data for evolution check"),
    }
}
