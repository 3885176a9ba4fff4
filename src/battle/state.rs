use crate::errors::BattleEngineError;
use crate::pokemon::Combatant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{StatType, StatusType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Round management
    BattleStarted {
        first: String,
        second: String,
    },
    RoundStarted {
        round: u32,
    },
    RoundEnded,

    // Actions
    MoveUsed {
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
        defender: String,
        move_name: String,
    },
    CriticalHit {
        attacker: String,
        defender: String,
        move_name: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        damage: i32,
        remaining_hp: i32,
    },
    RecoilDamage {
        target: String,
        damage: i32,
        remaining_hp: i32,
    },
    ConfusionSelfHit {
        target: String,
        damage: i32,
        remaining_hp: i32,
    },
    PokemonFainted {
        pokemon: String,
    },
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Items
    ItemUsed {
        pokemon: String,
        item: String,
    },
    PokemonHealed {
        target: String,
        amount: i32,
        new_hp: i32,
    },
    StatBoosted {
        target: String,
        stat: StatType,
        new_value: i32,
    },
    PpRestored {
        target: String,
        amount: u8,
    },

    // Status conditions
    StatusApplied {
        target: String,
        status: StatusType,
    },
    StatusRemoved {
        target: String,
        status: StatusType,
    },
    StatusDamage {
        target: String,
        status: StatusType,
        damage: i32,
        remaining_hp: i32,
    },

    // Rewards
    ExperienceGained {
        pokemon: String,
        amount: u32,
    },
    LevelUp {
        pokemon: String,
        new_level: u8,
    },
    Evolved {
        from: String,
        into: String,
    },

    BattleEnded {
        winner: String,
        loser: String,
        rounds: u32,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { first, second } => {
                Some(format!("{} and {} square off!", first, second))
            }
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::RoundEnded => None,

            BattleEvent::MoveUsed { pokemon, move_name } => {
                Some(format!("{} used {}!", pokemon, move_name))
            }
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::RecoilDamage { target, damage, .. } => {
                Some(format!("{} is hit with {} recoil!", target, damage))
            }
            BattleEvent::ConfusionSelfHit { target, damage, .. } => Some(format!(
                "{} hurt itself in its confusion for {} damage!",
                target, damage
            )),
            BattleEvent::PokemonFainted { pokemon } => Some(format!("{} fainted!", pokemon)),
            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(reason)
            )),

            BattleEvent::ItemUsed { pokemon, item } => {
                Some(format!("{} used a {}!", pokemon, item))
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::StatBoosted { target, stat, .. } => {
                Some(format!("{}'s {} rose!", target, stat))
            }
            BattleEvent::PpRestored { target, amount } => {
                Some(format!("{}'s moves regained {} PP!", target, amount))
            }

            BattleEvent::StatusApplied { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_applied(*status)
            )),
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_removed(*status)
            )),
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {} for {} damage!",
                target, status, damage
            )),

            BattleEvent::ExperienceGained { pokemon, amount } => {
                Some(format!("{} gained {} experience!", pokemon, amount))
            }
            BattleEvent::LevelUp { pokemon, new_level } => {
                Some(format!("{} grew to level {}!", pokemon, new_level))
            }
            BattleEvent::Evolved { from, into } => {
                Some(format!("{} evolved into {}!", from, into))
            }
            BattleEvent::BattleEnded { winner, rounds, .. } => Some(format!(
                "{} won the battle after {} rounds!",
                winner, rounds
            )),
        }
    }

    fn format_status_applied(status: StatusType) -> &'static str {
        match status {
            StatusType::Burn => "was burned!",
            StatusType::Freeze => "was frozen solid!",
            StatusType::Paralysis => "is paralyzed! It may be unable to move!",
            StatusType::Poison => "was poisoned!",
            StatusType::Sleep => "fell asleep!",
            StatusType::Bound => "is trapped in a bind!",
            StatusType::Confusion => "became confused!",
            StatusType::Normal | StatusType::Fainted => "is unaffected.",
        }
    }

    fn format_status_removed(status: StatusType) -> &'static str {
        match status {
            StatusType::Freeze => "thawed out!",
            StatusType::Sleep => "woke up!",
            StatusType::Paralysis => "can move freely again!",
            StatusType::Bound => "broke free!",
            StatusType::Confusion => "snapped out of its confusion!",
            StatusType::Burn => "was cured of its burn!",
            StatusType::Poison => "was cured of its poison!",
            StatusType::Normal | StatusType::Fainted => "is back to normal.",
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep.",
            ActionFailureReason::IsFrozen => "is frozen solid!",
            ActionFailureReason::IsParalyzed => "is fully paralyzed!",
            ActionFailureReason::IsBound => "can't move while bound!",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsBound,
}

/// Event bus for collecting the battle log.
///
/// ```rust,ignore
/// event_bus.print_debug();                             // Debug format
/// event_bus.print_formatted_with_message("Battle log:"); // Human-readable
/// println!("{}", event_bus);                            // Display trait
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text.
    /// Falls back to debug format for silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn print_formatted_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_formatted();
    }

    /// Formatted lines for every non-silent event.
    pub fn formatted_lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum RollSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// Every random decision of a battle, as percentile rolls in 1..=100.
///
/// A seeded source reproduces a battle exactly. A scripted source replays the
/// given outcomes in order and wraps around when it runs out.
#[derive(Debug)]
pub struct TurnRng {
    source: RollSource,
}

impl TurnRng {
    /// Replay `outcomes` in order. An empty script always rolls 100.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RollSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_seeded(seed: u64) -> Self {
        Self {
            source: RollSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RollSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RollSource::Seeded(rng) => rng.random_range(1..=100),
            RollSource::Scripted { outcomes, index } => {
                if outcomes.is_empty() {
                    100
                } else {
                    let outcome = outcomes[*index % outcomes.len()];
                    *index += 1;
                    outcome
                }
            }
        };
        trace!(outcome, reason, "rng consumed");
        outcome
    }

    /// Roll against a percent chance: succeeds when the outcome is at most `chance`.
    pub fn roll_percent(&mut self, chance: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= chance
    }
}

/// The two combatants of one battle, in roster order.
#[derive(Debug)]
pub struct BattlePair {
    pub first: Combatant,
    pub second: Combatant,
}

impl BattlePair {
    pub fn new(first: Combatant, second: Combatant) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (Combatant, Combatant) {
        (self.first, self.second)
    }

    pub(crate) fn get(&self, index: usize) -> &Combatant {
        if index == 0 {
            &self.first
        } else {
            &self.second
        }
    }

    /// The combatant at `index` and its opponent.
    pub(crate) fn split(&mut self, index: usize) -> (&mut Combatant, &mut Combatant) {
        if index == 0 {
            (&mut self.first, &mut self.second)
        } else {
            (&mut self.second, &mut self.first)
        }
    }
}

/// What the arena must do with a combatant leaving the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalDirective {
    Fainted { id: u32 },
    Disqualified { id: u32, reason: String },
}

impl RemovalDirective {
    pub fn id(&self) -> u32 {
        match self {
            RemovalDirective::Fainted { id } | RemovalDirective::Disqualified { id, .. } => *id,
        }
    }
}

#[derive(Debug)]
pub struct BattleResult {
    pub winner: Combatant,
    pub loser: Combatant,
    pub exp_awarded: u32,
    pub removal: RemovalDirective,
    pub rounds: u32,
    pub events: EventBus,
}

/// A battle that could not be resolved. The combatants are handed back.
#[derive(Debug, Error)]
#[error("battle between {} and {} failed: {error}", .pair.first.name(), .pair.second.name())]
pub struct BattleFailure {
    #[source]
    pub error: BattleEngineError,
    pub pair: BattlePair,
    pub events: EventBus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_silent_events_return_none() {
        let silent_events = vec![
            BattleEvent::RoundEnded,
            BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
        ];

        for event in silent_events {
            assert!(
                event.format().is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_event_text_samples() {
        assert_eq!(
            BattleEvent::RoundStarted { round: 5 }.format(),
            Some("=== Round 5 ===".to_string())
        );
        assert_eq!(
            BattleEvent::AttackTypeEffectiveness { multiplier: 0.5 }.format(),
            Some("It's not very effective...".to_string())
        );
        assert_eq!(
            BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 }.format(),
            Some("It had no effect!".to_string())
        );
        assert_eq!(
            BattleEvent::StatusApplied {
                target: "Pikachu".to_string(),
                status: StatusType::Sleep
            }
            .format(),
            Some("Pikachu fell asleep!".to_string())
        );
        assert_eq!(
            BattleEvent::ActionFailed {
                pokemon: "Onix".to_string(),
                reason: ActionFailureReason::IsBound
            }
            .format(),
            Some("Onix can't move while bound!".to_string())
        );
    }

    #[test]
    fn test_event_bus_basics() {
        let mut event_bus = EventBus::new();
        assert!(event_bus.is_empty());

        event_bus.push(BattleEvent::RoundStarted { round: 1 });
        event_bus.push(BattleEvent::RoundEnded);
        event_bus.push(BattleEvent::PokemonFainted {
            pokemon: "Geodude".to_string(),
        });

        assert_eq!(event_bus.len(), 3);
        assert_eq!(
            event_bus.formatted_lines(),
            vec!["=== Round 1 ===".to_string(), "Geodude fainted!".to_string()]
        );

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("RoundStarted"));
        assert!(display_output.contains("PokemonFainted"));
    }

    #[test]
    fn test_scripted_rng_wraps_around() {
        let mut rng = TurnRng::new_for_test(vec![10, 90]);
        let rolls: Vec<u8> = (0..5).map(|_| rng.next_outcome("test")).collect();
        assert_eq!(rolls, vec![10, 90, 10, 90, 10]);

        let mut empty = TurnRng::new_for_test(vec![]);
        assert_eq!(empty.next_outcome("test"), 100);
        assert!(!empty.roll_percent(99, "test"));
        assert!(empty.roll_percent(100, "test"));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = TurnRng::new_seeded(42);
        let mut b = TurnRng::new_seeded(42);
        for _ in 0..50 {
            let roll = a.next_outcome("a");
            assert!((1..=100).contains(&roll));
            assert_eq!(roll, b.next_outcome("b"));
        }
    }
}
