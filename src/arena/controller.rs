use crate::arena::roster::{Position, RosterEntry, Velocity};
use crate::arena::scene::{SceneObserver, SceneTransition};
use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleFailure, BattlePair, BattleResult, EventBus, TurnRng};
use crate::config::ArenaConfig;
use crate::errors::{ArenaError, ArenaResult, ValidationError};
use crate::pokemon::Combatant;
use crate::validation::{OfficerJenny, Verdict};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArenaState {
    #[default]
    Roaming,
    BattleTransition,
}

/// Result of `begin_battle`.
#[derive(Debug)]
pub enum BattleStart {
    Ready(BattlePair),
    /// Inspection dropped at least one fighter. Survivors are back on the roster.
    Cancelled {
        disqualified: Vec<(u32, ValidationError)>,
    },
}

#[derive(Debug)]
pub enum BattleOutcome {
    Won {
        winner: u32,
        loser: u32,
        rounds: u32,
        events: EventBus,
    },
    Disqualified {
        ids: Vec<u32>,
    },
    /// The engine refused or could not finish. Fighters that are still
    /// conscious and pass inspection are back where they left the roster.
    Failed {
        ids: [u32; 2],
        returned: Vec<u32>,
        reason: String,
        events: EventBus,
    },
}

#[derive(Debug, Default)]
pub struct TickReport {
    pub culled: Vec<u32>,
    pub battle: Option<BattleOutcome>,
}

#[derive(Debug, Clone, Copy)]
struct Departure {
    id: u32,
    position: Position,
    velocity: Velocity,
}

/// Owns the roaming roster and turns collisions into battles.
///
/// Everything happens inside `tick`: movement, the boundary cull, and at most
/// one battle, resolved to completion before the call returns.
pub struct ArenaController {
    config: ArenaConfig,
    roster: Vec<RosterEntry>,
    state: ArenaState,
    engine: BattleEngine,
    rng: TurnRng,
    jenny: OfficerJenny,
    in_battle: Option<[Departure; 2]>,
}

impl ArenaController {
    pub fn new(config: ArenaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => TurnRng::new_seeded(seed),
            None => TurnRng::new_random(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: ArenaConfig, rng: TurnRng) -> Self {
        Self {
            engine: BattleEngine::new(config.max_rounds),
            config,
            roster: Vec::new(),
            state: ArenaState::Roaming,
            rng,
            jenny: OfficerJenny,
            in_battle: None,
        }
    }

    pub fn state(&self) -> ArenaState {
        self.state
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn entry(&self, id: u32) -> Option<&RosterEntry> {
        self.roster.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn add_entity<O: SceneObserver>(
        &mut self,
        combatant: Combatant,
        position: Position,
        velocity: Velocity,
        observer: &mut O,
    ) -> ArenaResult<()> {
        let id = combatant.id();
        let fighting = self
            .in_battle
            .is_some_and(|departures| departures.iter().any(|d| d.id == id));
        if fighting || self.entry(id).is_some() {
            return Err(ArenaError::DuplicateEntity(id));
        }

        debug!(id, name = combatant.name(), x = position.x, y = position.y, "entity joined");
        observer.notify_entity_added(id, position.x, position.y);
        self.roster
            .push(RosterEntry::new(combatant, position, velocity));
        Ok(())
    }

    pub fn tick<O: SceneObserver>(&mut self, observer: &mut O) -> TickReport {
        for entry in &mut self.roster {
            entry.advance();
        }
        let culled = self.cull_out_of_bounds(observer);

        let battle = match self.find_intersecting_pair() {
            Some((first, second)) => self.run_battle(first, second, observer),
            None => None,
        };

        TickReport { culled, battle }
    }

    /// Run every roster member past inspection and drop the disqualified.
    pub fn inspect_roster<O: SceneObserver>(
        &mut self,
        observer: &mut O,
    ) -> Vec<(u32, ValidationError)> {
        let failures = self
            .jenny
            .inspect_all(self.roster.iter().map(|entry| &entry.combatant));

        self.roster
            .retain(|entry| !failures.iter().any(|(id, _)| *id == entry.id()));
        for (id, _) in &failures {
            observer.notify_entity_removed(*id);
        }

        info!(
            inspected = self.roster.len() + failures.len(),
            dropped = failures.len(),
            "roster inspected"
        );
        failures
    }

    /// Pull two entities out of the roam pool and get them ready to fight.
    pub fn begin_battle<O: SceneObserver>(
        &mut self,
        first_id: u32,
        second_id: u32,
        observer: &mut O,
    ) -> ArenaResult<BattleStart> {
        if self.state == ArenaState::BattleTransition {
            return Err(ArenaError::BattleInProgress);
        }
        if first_id == second_id {
            return Err(ArenaError::SelfBattle(first_id));
        }
        let first_index = self
            .index_of(first_id)
            .ok_or(ArenaError::UnknownEntity(first_id))?;
        let second_index = self
            .index_of(second_id)
            .ok_or(ArenaError::UnknownEntity(second_id))?;

        // Remove the later index first so the earlier one stays valid
        let (first, second) = if first_index > second_index {
            let first = self.roster.remove(first_index);
            (first, self.roster.remove(second_index))
        } else {
            let second = self.roster.remove(second_index);
            (self.roster.remove(first_index), second)
        };

        self.state = ArenaState::BattleTransition;
        observer.notify_entity_removed(first_id);
        observer.notify_entity_removed(second_id);
        observer.notify_scene_transition(SceneTransition::Battle, &[first_id, second_id]);
        info!(
            first = first.combatant.name(),
            second = second.combatant.name(),
            "entering battle"
        );

        let verdicts = [
            self.jenny.inspect(&first.combatant),
            self.jenny.inspect(&second.combatant),
        ];
        if verdicts.iter().all(Verdict::is_pass) {
            self.in_battle = Some([departure(&first), departure(&second)]);
            return Ok(BattleStart::Ready(BattlePair::new(
                first.combatant,
                second.combatant,
            )));
        }

        let mut disqualified = Vec::new();
        let mut survivors = Vec::new();
        for (entry, verdict) in [first, second].into_iter().zip(verdicts) {
            match verdict {
                Verdict::Pass => survivors.push(entry.id()),
                Verdict::Disqualify(reason) => {
                    disqualified.push((entry.id(), reason));
                    continue;
                }
            }
            observer.notify_entity_added(entry.id(), entry.position.x, entry.position.y);
            self.roster.push(entry);
        }

        self.state = ArenaState::Roaming;
        observer.notify_scene_transition(SceneTransition::Roam, &survivors);
        Ok(BattleStart::Cancelled { disqualified })
    }

    /// Act on the engine's verdict and return to roaming.
    pub fn finish_battle<O: SceneObserver>(
        &mut self,
        resolution: Result<BattleResult, BattleFailure>,
        observer: &mut O,
    ) -> ArenaResult<BattleOutcome> {
        let departures = match (self.state, self.in_battle.take()) {
            (ArenaState::BattleTransition, Some(departures)) => departures,
            _ => return Err(ArenaError::NoBattleInProgress),
        };
        self.state = ArenaState::Roaming;

        match resolution {
            Ok(result) => {
                let winner = result.winner.id();
                let loser = result.removal.id();
                let velocity = departures
                    .iter()
                    .find(|d| d.id == winner)
                    .map(|d| d.velocity)
                    .unwrap_or_default();
                let reentry = self.config.reentry;

                info!(
                    winner = result.winner.name(),
                    loser = result.loser.name(),
                    rounds = result.rounds,
                    "winner rejoins the roam pool"
                );
                observer.notify_entity_added(winner, reentry.x, reentry.y);
                self.roster
                    .push(RosterEntry::new(result.winner, reentry, velocity));
                observer.notify_scene_transition(SceneTransition::Roam, &[winner]);

                Ok(BattleOutcome::Won {
                    winner,
                    loser,
                    rounds: result.rounds,
                    events: result.events,
                })
            }
            Err(failure) => {
                let ids = [failure.pair.first.id(), failure.pair.second.id()];
                let reason = failure.error.to_string();
                let (first, second) = failure.pair.into_inner();

                let mut returned = Vec::new();
                for combatant in [first, second] {
                    let id = combatant.id();
                    let fit = !combatant.is_fainted() && self.jenny.inspect(&combatant).is_pass();
                    match departures.iter().find(|d| d.id == id) {
                        Some(d) if fit => {
                            observer.notify_entity_added(id, d.position.x, d.position.y);
                            self.roster
                                .push(RosterEntry::new(combatant, d.position, d.velocity));
                            returned.push(id);
                        }
                        _ => debug!(id, "combatant dropped after failed battle"),
                    }
                }

                warn!(?ids, ?returned, %reason, "battle failed");
                observer.notify_scene_transition(SceneTransition::Roam, &returned);

                Ok(BattleOutcome::Failed {
                    ids,
                    returned,
                    reason,
                    events: failure.events,
                })
            }
        }
    }

    fn run_battle<O: SceneObserver>(
        &mut self,
        first: u32,
        second: u32,
        observer: &mut O,
    ) -> Option<BattleOutcome> {
        let pair = match self.begin_battle(first, second, observer) {
            Ok(BattleStart::Ready(pair)) => pair,
            Ok(BattleStart::Cancelled { disqualified }) => {
                return Some(BattleOutcome::Disqualified {
                    ids: disqualified.into_iter().map(|(id, _)| id).collect(),
                })
            }
            Err(error) => {
                warn!(%error, "could not start battle");
                return None;
            }
        };

        let resolution = self.engine.resolve(pair, &mut self.rng);
        match self.finish_battle(resolution, observer) {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                warn!(%error, "could not finish battle");
                None
            }
        }
    }

    fn cull_out_of_bounds<O: SceneObserver>(&mut self, observer: &mut O) -> Vec<u32> {
        let bounds = self.config.bounds;
        let mut culled = Vec::new();
        self.roster.retain(|entry| {
            let inside = bounds.contains(&entry.position);
            if !inside {
                culled.push(entry.id());
            }
            inside
        });

        for id in &culled {
            debug!(id, "culled out of bounds");
            observer.notify_entity_removed(*id);
        }
        culled
    }

    /// The first intersecting pair in roster order.
    fn find_intersecting_pair(&self) -> Option<(u32, u32)> {
        let radius = self.config.entity_radius;
        self.roster.iter().enumerate().find_map(|(i, first)| {
            self.roster[i + 1..]
                .iter()
                .find(|second| first.intersects(second, radius))
                .map(|second| (first.id(), second.id()))
        })
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.roster.iter().position(|entry| entry.id() == id)
    }
}

fn departure(entry: &RosterEntry) -> Departure {
    Departure {
        id: entry.id(),
        position: entry.position,
        velocity: entry.velocity,
    }
}
