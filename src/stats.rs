use crate::errors::{ValidationError, ValidationResult};
use schema::StatType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CRIT_RATIO: f64 = 0.0625;
pub const DEFAULT_ACCURACY: i32 = 100;
pub const DEFAULT_EVASION: i32 = 100;

/// Outcome of an HP change after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpChange {
    pub previous: i32,
    pub current: i32,
}

impl HpChange {
    /// Absolute HP actually gained or lost.
    pub fn amount(&self) -> i32 {
        (self.current - self.previous).abs()
    }

    pub fn reached_zero(&self) -> bool {
        self.previous > 0 && self.current == 0
    }
}

/// Base and current values for the eight stats plus the critical-hit ratio.
///
/// Values are stored signed so that snapshots loaded from outside can be
/// audited; every setter rejects negatives. The base HP value is the max HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    base: [i32; 8],
    current: [i32; 8],
    base_crit_ratio: f64,
    crit_ratio: f64,
}

impl StatBlock {
    /// Build a stat block whose current values start at base.
    pub fn new(base: [i32; 8], crit_ratio: f64) -> ValidationResult<Self> {
        for stat in StatType::ALL {
            check_non_negative(stat, base[stat.index()])?;
        }
        if base[StatType::Hp.index()] == 0 {
            return Err(ValidationError::InvalidPokemonValues(
                "max HP must be positive".to_string(),
            ));
        }
        check_ratio(crit_ratio)?;

        Ok(StatBlock {
            base,
            current: base,
            base_crit_ratio: crit_ratio,
            crit_ratio,
        })
    }

    pub fn base(&self, stat: StatType) -> i32 {
        self.base[stat.index()]
    }

    pub fn current(&self, stat: StatType) -> i32 {
        self.current[stat.index()]
    }

    pub fn max_hp(&self) -> i32 {
        self.base(StatType::Hp)
    }

    pub fn current_hp(&self) -> i32 {
        self.current(StatType::Hp)
    }

    pub fn crit_ratio(&self) -> f64 {
        self.crit_ratio
    }

    pub fn base_crit_ratio(&self) -> f64 {
        self.base_crit_ratio
    }

    /// Set a base value. Lowering max HP pulls current HP down with it.
    pub fn set_base(&mut self, stat: StatType, value: i32) -> ValidationResult<()> {
        check_non_negative(stat, value)?;
        if stat == StatType::Hp {
            if value == 0 {
                return Err(ValidationError::InvalidPokemonValues(
                    "max HP must be positive".to_string(),
                ));
            }
            let hp = self.current_hp().min(value);
            self.current[StatType::Hp.index()] = hp;
        }
        self.base[stat.index()] = value;
        Ok(())
    }

    /// Set a current value. Current HP may not exceed max HP.
    pub fn set_current(&mut self, stat: StatType, value: i32) -> ValidationResult<()> {
        check_non_negative(stat, value)?;
        if stat == StatType::Hp && value > self.max_hp() {
            return Err(ValidationError::InvalidPokemonValues(format!(
                "current HP {} exceeds max HP {}",
                value,
                self.max_hp()
            )));
        }
        self.current[stat.index()] = value;
        Ok(())
    }

    pub fn set_crit_ratio(&mut self, ratio: f64) -> ValidationResult<()> {
        check_ratio(ratio)?;
        self.crit_ratio = ratio;
        Ok(())
    }

    pub fn set_base_crit_ratio(&mut self, ratio: f64) -> ValidationResult<()> {
        check_ratio(ratio)?;
        self.base_crit_ratio = ratio;
        Ok(())
    }

    /// Add (or with a negative delta, remove) HP, clamped to [0, max].
    pub fn add_hp(&mut self, delta: i32) -> HpChange {
        let previous = self.current_hp();
        let current = previous.saturating_add(delta).clamp(0, self.max_hp());
        self.current[StatType::Hp.index()] = current;
        HpChange { previous, current }
    }

    /// Raise a current stat by `amount`, saturating. HP is capped at max.
    pub fn raise_current(&mut self, stat: StatType, amount: i32) -> i32 {
        if stat == StatType::Hp {
            return self.add_hp(amount).current;
        }
        let raised = self.current(stat).saturating_add(amount).max(0);
        self.current[stat.index()] = raised;
        raised
    }

    /// Restore every battle-modified value except HP to its base.
    pub fn reset_battle_stats(&mut self) {
        for stat in StatType::ALL {
            if stat != StatType::Hp {
                self.current[stat.index()] = self.base[stat.index()];
            }
        }
        self.crit_ratio = self.base_crit_ratio;
    }

    /// Sum of the six base battle stats (HP through Speed).
    pub fn base_total(&self) -> i64 {
        [
            StatType::Hp,
            StatType::Attack,
            StatType::Defense,
            StatType::SpecialAttack,
            StatType::SpecialDefense,
            StatType::Speed,
        ]
        .iter()
        .map(|&stat| self.base(stat).max(0) as i64)
        .sum()
    }

    #[cfg(test)]
    pub(crate) fn force_base(&mut self, stat: StatType, value: i32) {
        self.base[stat.index()] = value;
    }

    #[cfg(test)]
    pub(crate) fn force_current(&mut self, stat: StatType, value: i32) {
        self.current[stat.index()] = value;
    }

    #[cfg(test)]
    pub(crate) fn force_crit_ratio(&mut self, ratio: f64) {
        self.crit_ratio = ratio;
    }

    /// First stat (base or current) holding a negative value, if any.
    pub fn first_negative(&self) -> Option<(StatType, i32)> {
        StatType::ALL.iter().find_map(|&stat| {
            let base = self.base(stat);
            let current = self.current(stat);
            if base < 0 {
                Some((stat, base))
            } else if current < 0 {
                Some((stat, current))
            } else {
                None
            }
        })
    }
}

fn check_non_negative(stat: StatType, value: i32) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::InvalidPokemonValues(format!(
            "{} cannot be negative (got {})",
            stat, value
        )));
    }
    Ok(())
}

fn check_ratio(ratio: f64) -> ValidationResult<()> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ValidationError::InvalidPokemonValues(format!(
            "critical-hit ratio {} is outside [0, 1]",
            ratio
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block() -> StatBlock {
        StatBlock::new([100, 80, 70, 60, 50, 90, 100, 100], DEFAULT_CRIT_RATIO).unwrap()
    }

    #[test]
    fn test_current_starts_at_base() {
        let stats = block();
        for stat in StatType::ALL {
            assert_eq!(stats.current(stat), stats.base(stat));
        }
        assert_eq!(stats.max_hp(), 100);
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut stats = block();
        assert!(matches!(
            stats.set_base(StatType::Attack, -1),
            Err(ValidationError::InvalidPokemonValues(_))
        ));
        assert!(matches!(
            stats.set_current(StatType::Speed, -5),
            Err(ValidationError::InvalidPokemonValues(_))
        ));
        assert_eq!(stats.base(StatType::Attack), 80);
        assert_eq!(stats.current(StatType::Speed), 90);

        assert!(StatBlock::new([100, -1, 0, 0, 0, 0, 0, 0], 0.0).is_err());
        assert!(StatBlock::new([0, 1, 1, 1, 1, 1, 1, 1], 0.0).is_err());
    }

    #[test]
    fn test_current_hp_cannot_exceed_max() {
        let mut stats = block();
        assert!(stats.set_current(StatType::Hp, 101).is_err());
        assert!(stats.set_current(StatType::Hp, 100).is_ok());
    }

    #[test]
    fn test_lowering_max_hp_clamps_current() {
        let mut stats = block();
        stats.set_base(StatType::Hp, 40).unwrap();
        assert_eq!(stats.current_hp(), 40);
    }

    #[test]
    fn test_add_hp_clamps() {
        let mut stats = block();
        let change = stats.add_hp(-30);
        assert_eq!(change, HpChange { previous: 100, current: 70 });
        assert_eq!(change.amount(), 30);

        let change = stats.add_hp(500);
        assert_eq!(change.current, 100);
        assert_eq!(change.amount(), 30);

        let change = stats.add_hp(-1000);
        assert_eq!(change.current, 0);
        assert!(change.reached_zero());

        let change = stats.add_hp(-10);
        assert!(!change.reached_zero());
    }

    #[test]
    fn test_crit_ratio_bounds() {
        let mut stats = block();
        assert!(stats.set_crit_ratio(1.5).is_err());
        assert!(stats.set_crit_ratio(-0.1).is_err());
        assert!(stats.set_crit_ratio(f64::NAN).is_err());
        stats.set_crit_ratio(0.5).unwrap();
        assert_eq!(stats.crit_ratio(), 0.5);
        assert!(StatBlock::new([1; 8], 2.0).is_err());
    }

    #[test]
    fn test_reset_battle_stats_keeps_hp() {
        let mut stats = block();
        stats.add_hp(-25);
        stats.raise_current(StatType::Attack, 20);
        stats.set_crit_ratio(0.5).unwrap();

        stats.reset_battle_stats();

        assert_eq!(stats.current(StatType::Attack), 80);
        assert_eq!(stats.crit_ratio(), DEFAULT_CRIT_RATIO);
        assert_eq!(stats.current_hp(), 75);
    }

    #[test]
    fn test_base_total() {
        assert_eq!(block().base_total(), 100 + 80 + 70 + 60 + 50 + 90);
    }
}
