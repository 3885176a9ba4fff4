use crate::errors::{DataResult, ValidationError, ValidationResult};
use crate::species::get_species_data;
use schema::SpeciesDescriptor;
use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 100;

// Constants for reward calculations
const EXP_PER_LOSER_LEVEL: u32 = 12;
const BASE_TOTAL_DIVISOR: u32 = 8;

/// Total experience needed to reach `level` on the cube curve.
/// Level 1 is the floor and needs nothing.
pub fn exp_for_level(level: u8) -> u32 {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL) as u32;
    if level == MIN_LEVEL as u32 {
        0
    } else {
        level * level * level
    }
}

/// Largest level in [1, 100] whose threshold is covered by `total`.
pub fn level_for_exp(total: u32) -> u8 {
    (MIN_LEVEL..=MAX_LEVEL)
        .rev()
        .find(|&level| exp_for_level(level) <= total)
        .unwrap_or(MIN_LEVEL)
}

/// Level before and after an experience change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub from: u8,
    pub to: u8,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.to > self.from
    }
}

/// Experience bookkeeping. The level is always derived from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    total: u32,
    level: u8,
}

impl Experience {
    pub fn new(total: u32) -> Self {
        Experience {
            total,
            level: level_for_exp(total),
        }
    }

    /// Experience sitting exactly at the threshold of `level`.
    pub fn at_level(level: u8) -> Self {
        Experience::new(exp_for_level(level))
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Experience earned since the current level was reached.
    pub fn into_level(&self) -> u32 {
        self.total.saturating_sub(exp_for_level(self.level))
    }

    /// Experience still missing for the next level, `None` at the cap.
    pub fn to_next_level(&self) -> Option<u32> {
        if self.level >= MAX_LEVEL {
            return None;
        }
        Some(exp_for_level(self.level + 1).saturating_sub(self.total))
    }

    /// Add experience. A negative amount fails and leaves the total untouched.
    pub fn add(&mut self, amount: i64) -> ValidationResult<LevelChange> {
        if amount < 0 {
            return Err(ValidationError::InvalidExp(format!(
                "cannot add negative experience ({})",
                amount
            )));
        }
        let gained = u32::try_from(amount).unwrap_or(u32::MAX);
        let from = self.level;
        *self = Experience::new(self.total.saturating_add(gained));
        Ok(LevelChange {
            from,
            to: self.level,
        })
    }

    /// Overwrite the total. Negative values and decreases are rejected.
    pub fn set_total(&mut self, value: i64) -> ValidationResult<LevelChange> {
        if value < 0 {
            return Err(ValidationError::InvalidExp(format!(
                "total experience cannot be negative ({})",
                value
            )));
        }
        if value < self.total as i64 {
            return Err(ValidationError::InvalidExp(format!(
                "total experience cannot decrease from {} to {}",
                self.total, value
            )));
        }
        let from = self.level;
        *self = Experience::new(u32::try_from(value).unwrap_or(u32::MAX));
        Ok(LevelChange {
            from,
            to: self.level,
        })
    }

    #[cfg(test)]
    pub(crate) fn force_level(&mut self, level: u8) {
        self.level = level;
    }

    /// True when the stored level matches the curve.
    pub fn is_consistent(&self) -> bool {
        self.level == level_for_exp(self.total)
    }
}

impl Default for Experience {
    fn default() -> Self {
        Experience::at_level(MIN_LEVEL)
    }
}

/// Calculator for battle rewards and evolution checks
pub struct RewardCalculator;

impl RewardCalculator {
    /// Experience a winner earns for defeating a combatant.
    /// Formula: loser level × 12 + loser base stat total / 8
    pub fn experience_award(&self, loser_level: u8, loser_base_total: i64) -> u32 {
        let base_total = u32::try_from(loser_base_total.max(0)).unwrap_or(u32::MAX);
        (loser_level as u32 * EXP_PER_LOSER_LEVEL).saturating_add(base_total / BASE_TOTAL_DIVISOR)
    }

    /// Check if a species should evolve at the given level.
    /// Returns the evolved species, or None if no evolution applies.
    pub fn should_evolve(
        &self,
        species: &str,
        level: u8,
    ) -> DataResult<Option<SpeciesDescriptor>> {
        let species_data = get_species_data(species)?;

        match &species_data.evolution {
            Some(evolution) if level >= evolution.level => {
                Ok(Some(get_species_data(&evolution.evolves_into)?))
            }
            _ => Ok(None),
        }
    }
}
