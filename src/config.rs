use crate::arena::roster::{Bounds, Position};
use crate::battle::engine::DEFAULT_MAX_ROUNDS;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub bounds: Bounds,
    /// Collision radius shared by every entity.
    pub entity_radius: f32,
    /// Where battle winners rejoin the roam pool.
    pub reentry: Position,
    pub max_rounds: u32,
    /// Fixed seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            bounds: Bounds::new(800.0, 600.0),
            entity_radius: 16.0,
            reentry: Position::new(400.0, 300.0),
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&source)?;
        info!(path = %path.display(), "loaded arena config");
        Ok(config)
    }

    /// Apply `ARENA_SEED`, `ARENA_WIDTH`, `ARENA_HEIGHT` and `ARENA_MAX_ROUNDS`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("ARENA_SEED") {
            self.seed = Some(parse_value("ARENA_SEED", &seed)?);
        }
        if let Some(width) = lookup("ARENA_WIDTH") {
            self.bounds.width = parse_value("ARENA_WIDTH", &width)?;
        }
        if let Some(height) = lookup("ARENA_HEIGHT") {
            self.bounds.height = parse_value("ARENA_HEIGHT", &height)?;
        }
        if let Some(max_rounds) = lookup("ARENA_MAX_ROUNDS") {
            self.max_rounds = parse_value("ARENA_MAX_ROUNDS", &max_rounds)?;
        }
        self.validate()?;

        info!(
            width = self.bounds.width,
            height = self.bounds.height,
            radius = self.entity_radius,
            max_rounds = self.max_rounds,
            seed = ?self.seed,
            "arena config ready"
        );
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.bounds.width) || !positive(self.bounds.height) {
            return Err(ConfigError::InvalidValue(format!(
                "scene bounds must be positive, got {}x{}",
                self.bounds.width, self.bounds.height
            )));
        }
        if self.entity_radius.is_nan() || self.entity_radius < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "entity radius must be non-negative, got {}",
                self.entity_radius
            )));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidValue(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if !self.bounds.contains(&self.reentry) {
            return Err(ConfigError::InvalidValue(format!(
                "reentry point ({}, {}) lies outside the scene",
                self.reentry.x, self.reentry.y
            )));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{}={:?} could not be parsed", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ArenaConfig::default()
            .apply_overrides(lookup_from(&[
                ("ARENA_SEED", "7"),
                ("ARENA_WIDTH", "1024"),
                ("ARENA_MAX_ROUNDS", " 50 "),
            ]))
            .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bounds.width, 1024.0);
        assert_eq!(config.bounds.height, 600.0);
        assert_eq!(config.max_rounds, 50);
    }

    #[test]
    fn test_bad_override_rejected() {
        let result = ArenaConfig::default().apply_overrides(lookup_from(&[("ARENA_SEED", "abc")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));

        let result =
            ArenaConfig::default().apply_overrides(lookup_from(&[("ARENA_MAX_ROUNDS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = ArenaConfig::from_ron_str("(entity_radius: 4.0, seed: Some(99))").unwrap();

        assert_eq!(config.entity_radius, 4.0);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.bounds, Bounds::new(800.0, 600.0));
        assert_eq!(config.max_rounds, DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn test_reentry_outside_scene_rejected() {
        let result = ArenaConfig::from_ron_str("(reentry: (x: 900.0, y: 10.0))");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            ArenaConfig::from_ron_str("(entity_radius: )"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ArenaConfig::from_ron_file("does/not/exist.ron"),
            Err(ConfigError::Io { .. })
        ));
    }
}
