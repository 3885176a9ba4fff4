use crate::errors::{DataResult, ValidationError, ValidationResult};
use crate::items::ItemSet;
use crate::moves::{MoveInstance, MoveSet, MAX_MOVES};
use crate::progression::{exp_for_level, level_for_exp, Experience, LevelChange};
use crate::species::get_species_data;
use crate::stats::{HpChange, StatBlock, DEFAULT_ACCURACY, DEFAULT_CRIT_RATIO, DEFAULT_EVASION};
use schema::{BaseStats, ItemData, ItemEffect, PokemonType, SpeciesDescriptor, StatType, StatusType};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

fn default_accuracy() -> i32 {
    DEFAULT_ACCURACY
}

fn default_evasion() -> i32 {
    DEFAULT_EVASION
}

fn default_crit_ratio() -> f64 {
    DEFAULT_CRIT_RATIO
}

/// Named values for the eight stats, as they appear in a construction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValues {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub special_attack: i32,
    pub special_defense: i32,
    pub speed: i32,
    #[serde(default = "default_evasion")]
    pub evasion: i32,
    #[serde(default = "default_accuracy")]
    pub accuracy: i32,
}

impl StatValues {
    pub fn to_array(self) -> [i32; 8] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
            self.evasion,
            self.accuracy,
        ]
    }

    fn from_fn(get: impl Fn(StatType) -> i32) -> Self {
        StatValues {
            hp: get(StatType::Hp),
            attack: get(StatType::Attack),
            defense: get(StatType::Defense),
            special_attack: get(StatType::SpecialAttack),
            special_defense: get(StatType::SpecialDefense),
            speed: get(StatType::Speed),
            evasion: get(StatType::Evasion),
            accuracy: get(StatType::Accuracy),
        }
    }

    /// Battle stats of a species at `level`.
    /// HP = (2 × Base × Level) / 100 + Level + 10; others = (2 × Base × Level) / 100 + 5
    pub fn for_species_level(base_stats: &BaseStats, level: u8) -> Self {
        let level = level as i32;
        let other = |base: u16| (2 * base as i32 * level) / 100 + 5;
        StatValues {
            hp: (2 * base_stats.hp as i32 * level) / 100 + level + 10,
            attack: other(base_stats.attack),
            defense: other(base_stats.defense),
            special_attack: other(base_stats.sp_attack),
            special_defense: other(base_stats.sp_defense),
            speed: other(base_stats.speed),
            evasion: DEFAULT_EVASION,
            accuracy: DEFAULT_ACCURACY,
        }
    }
}

/// Construction record for a combatant. Round-trips through RON and JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub name: String,
    pub species: String,
    /// Type name, parsed case-insensitively.
    pub pokemon_type: String,
    pub level: u8,
    /// Defaults to the curve threshold of `level`.
    #[serde(default)]
    pub total_exp: Option<u32>,
    pub base_stats: StatValues,
    /// Defaults to `base_stats`.
    #[serde(default)]
    pub current_stats: Option<StatValues>,
    #[serde(default)]
    pub status: StatusType,
    #[serde(default)]
    pub total_wins: u32,
    #[serde(default)]
    pub total_evolutions: u32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub description: String,
    pub id: u32,
    #[serde(default = "default_crit_ratio")]
    pub crit_ratio: f64,
    pub moves: Vec<MoveInstance>,
    #[serde(default)]
    pub items: Vec<ItemData>,
    #[serde(default)]
    pub sprite: String,
    #[serde(default)]
    pub cry: String,
}

impl CombatantConfig {
    /// A record for a wild combatant of `species` at `level`, knowing the last
    /// moves of its move pool.
    pub fn from_species(species: &str, level: u8, id: u32) -> DataResult<Self> {
        let data = get_species_data(species)?;
        let skip = data.move_pool.len().saturating_sub(MAX_MOVES);
        let moves = data
            .move_pool
            .iter()
            .skip(skip)
            .map(|name| MoveInstance::from_name(name))
            .collect::<DataResult<Vec<_>>>()?;

        Ok(CombatantConfig {
            name: data.name.clone(),
            species: data.name.clone(),
            pokemon_type: data.pokemon_type.to_string(),
            level,
            total_exp: None,
            base_stats: StatValues::for_species_level(&data.base_stats, level),
            current_stats: None,
            status: StatusType::Normal,
            total_wins: 0,
            total_evolutions: 0,
            height: data.height,
            weight: data.weight,
            description: data.description,
            id,
            crit_ratio: DEFAULT_CRIT_RATIO,
            moves,
            items: Vec::new(),
            sprite: data.sprite,
            cry: data.cry,
        })
    }
}

/// A single battling creature. Owned by exactly one holder at a time.
///
/// The persisted form is the `CombatantConfig` record, so deserializing
/// runs the same validation as `Combatant::new`.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(try_from = "CombatantConfig")]
pub struct Combatant {
    name: String,
    species: String,
    pokemon_type: PokemonType,
    stats: StatBlock,
    status: StatusType,
    experience: Experience,
    total_wins: u32,
    total_evolutions: u32,
    height: f32,
    weight: f32,
    description: String,
    id: u32,
    moves: MoveSet,
    items: ItemSet,
    sprite: String,
    cry: String,
}

impl Combatant {
    /// Validating constructor. Any violated invariant aborts construction.
    pub fn new(config: CombatantConfig) -> ValidationResult<Self> {
        let pokemon_type: PokemonType = config.pokemon_type.parse().map_err(|_| {
            ValidationError::InvalidType(format!("unknown type '{}'", config.pokemon_type))
        })?;

        let moves = MoveSet::new(config.moves, pokemon_type)?;

        let mut stats = StatBlock::new(config.base_stats.to_array(), config.crit_ratio)?;
        if let Some(current) = config.current_stats {
            let values = current.to_array();
            for stat in StatType::ALL {
                stats.set_current(stat, values[stat.index()])?;
            }
        }

        let fainted_by_hp = stats.current_hp() == 0;
        if fainted_by_hp != (config.status == StatusType::Fainted) {
            return Err(ValidationError::InvalidPokemonValues(format!(
                "HP {} is inconsistent with status {}",
                stats.current_hp(),
                config.status
            )));
        }

        let total_exp = config.total_exp.unwrap_or_else(|| exp_for_level(config.level));
        let experience = Experience::new(total_exp);
        if experience.level() != config.level {
            return Err(ValidationError::InvalidExp(format!(
                "{} experience means level {}, not {}",
                total_exp,
                experience.level(),
                config.level
            )));
        }

        let items = ItemSet::new(config.items)?;

        Ok(Combatant {
            name: config.name,
            species: config.species,
            pokemon_type,
            stats,
            status: config.status,
            experience,
            total_wins: config.total_wins,
            total_evolutions: config.total_evolutions,
            height: config.height,
            weight: config.weight,
            description: config.description,
            id: config.id,
            moves,
            items,
            sprite: config.sprite,
            cry: config.cry,
        })
    }

    /// Snapshot the combatant back into a construction record.
    pub fn to_config(&self) -> CombatantConfig {
        CombatantConfig {
            name: self.name.clone(),
            species: self.species.clone(),
            pokemon_type: self.pokemon_type.to_string(),
            level: self.level(),
            total_exp: Some(self.total_exp()),
            base_stats: StatValues::from_fn(|stat| self.stats.base(stat)),
            current_stats: Some(StatValues::from_fn(|stat| self.stats.current(stat))),
            status: self.status,
            total_wins: self.total_wins,
            total_evolutions: self.total_evolutions,
            height: self.height,
            weight: self.weight,
            description: self.description.clone(),
            id: self.id,
            crit_ratio: self.stats.base_crit_ratio(),
            moves: self.moves.iter().cloned().collect(),
            items: self.items.iter().cloned().collect(),
            sprite: self.sprite.clone(),
            cry: self.cry.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn pokemon_type(&self) -> PokemonType {
        self.pokemon_type
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sprite(&self) -> &str {
        &self.sprite
    }

    pub fn cry(&self) -> &str {
        &self.cry
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    pub fn is_fainted(&self) -> bool {
        self.status == StatusType::Fainted
    }

    pub fn current_hp(&self) -> i32 {
        self.stats.current_hp()
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp()
    }

    pub fn set_base_stat(&mut self, stat: StatType, value: i32) -> ValidationResult<()> {
        self.stats.set_base(stat, value)
    }

    /// Set a current stat. Setting HP to 0 faints the combatant; a fainted
    /// combatant cannot have its HP raised.
    pub fn set_current_stat(&mut self, stat: StatType, value: i32) -> ValidationResult<()> {
        if stat == StatType::Hp && self.is_fainted() && value > 0 {
            return Err(ValidationError::InvalidPokemonValues(format!(
                "{} has fainted and cannot regain HP",
                self.name
            )));
        }
        self.stats.set_current(stat, value)?;
        if stat == StatType::Hp && value == 0 {
            self.status = StatusType::Fainted;
        }
        Ok(())
    }

    /// Apply an HP delta. Reaching 0 faints; a fainted combatant is unaffected.
    pub fn add_hp(&mut self, delta: i32) -> HpChange {
        if self.is_fainted() {
            let hp = self.current_hp();
            return HpChange {
                previous: hp,
                current: hp,
            };
        }
        let change = self.stats.add_hp(delta);
        if change.current == 0 {
            self.status = StatusType::Fainted;
        }
        change
    }

    /// Replace the status. Fainting goes through HP, and fainted is terminal.
    pub fn set_status(&mut self, status: StatusType) -> ValidationResult<()> {
        if self.is_fainted() {
            return Err(ValidationError::InvalidPokemonValues(format!(
                "{} has fainted",
                self.name
            )));
        }
        if status == StatusType::Fainted {
            return Err(ValidationError::InvalidPokemonValues(
                "fainting happens when HP reaches 0".to_string(),
            ));
        }
        self.status = status;
        Ok(())
    }

    /// Raise a current stat for the rest of the battle.
    pub fn boost_stat(&mut self, stat: StatType, amount: i32) -> i32 {
        if stat == StatType::Hp {
            return self.add_hp(amount).current;
        }
        self.stats.raise_current(stat, amount)
    }

    pub fn crit_ratio(&self) -> f64 {
        self.stats.crit_ratio()
    }

    pub fn set_crit_ratio(&mut self, ratio: f64) -> ValidationResult<()> {
        self.stats.set_crit_ratio(ratio)
    }

    pub fn set_base_crit_ratio(&mut self, ratio: f64) -> ValidationResult<()> {
        self.stats.set_base_crit_ratio(ratio)
    }

    pub fn level(&self) -> u8 {
        self.experience.level()
    }

    pub fn total_exp(&self) -> u32 {
        self.experience.total()
    }

    pub fn exp_into_level(&self) -> u32 {
        self.experience.into_level()
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn add_exp(&mut self, amount: i64) -> ValidationResult<LevelChange> {
        self.experience.add(amount)
    }

    pub fn set_total_exp(&mut self, value: i64) -> ValidationResult<LevelChange> {
        self.experience.set_total(value)
    }

    pub fn total_wins(&self) -> u32 {
        self.total_wins
    }

    pub fn record_win(&mut self) {
        self.total_wins = self.total_wins.saturating_add(1);
    }

    pub fn total_evolutions(&self) -> u32 {
        self.total_evolutions
    }

    /// Become `evolved`: take its name and stats at the current level, and
    /// its type when every known move stays learnable. Current HP rises by
    /// the max HP gained.
    pub fn evolve_into(&mut self, evolved: &SpeciesDescriptor) -> ValidationResult<()> {
        let values = StatValues::for_species_level(&evolved.base_stats, self.level()).to_array();
        let hp_gain = values[StatType::Hp.index()] - self.max_hp();

        for stat in StatType::ALL {
            self.stats.set_base(stat, values[stat.index()])?;
        }
        self.stats.reset_battle_stats();
        self.stats.add_hp(hp_gain.max(0));

        if self
            .moves
            .iter()
            .all(|mv| evolved.pokemon_type.can_learn(mv.data.move_type))
        {
            self.pokemon_type = evolved.pokemon_type;
        }
        self.name = evolved.name.clone();
        self.species = evolved.name.clone();
        self.total_evolutions = self.total_evolutions.saturating_add(1);
        Ok(())
    }

    /// Sum of base HP through Speed.
    pub fn base_stat_total(&self) -> i64 {
        self.stats.base_total()
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub(crate) fn moves_mut(&mut self) -> &mut MoveSet {
        &mut self.moves
    }

    /// Raw access for building combatants that fail inspection.
    #[cfg(test)]
    pub(crate) fn stats_mut_unchecked(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    #[cfg(test)]
    pub(crate) fn experience_mut_unchecked(&mut self) -> &mut Experience {
        &mut self.experience
    }

    #[cfg(test)]
    pub(crate) fn set_type_unchecked(&mut self, pokemon_type: PokemonType) {
        self.pokemon_type = pokemon_type;
    }

    pub fn add_move(&mut self, mv: MoveInstance) -> ValidationResult<()> {
        self.moves.add_move(mv, self.pokemon_type)
    }

    pub fn delete_move_by_name(&mut self, name: &str) -> ValidationResult<bool> {
        self.moves.delete_move_by_name(name)
    }

    pub fn delete_move_by_index(&mut self, index: usize) -> ValidationResult<bool> {
        self.moves.delete_move_by_index(index)
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn add_item(&mut self, item: ItemData) -> ValidationResult<()> {
        self.items.add_item(item)
    }

    pub fn remove_item(&mut self, name: &str) -> bool {
        self.items.remove_item(name)
    }

    pub fn use_item(&mut self, index: usize) -> Option<ItemEffect> {
        self.items.use_item(index)
    }

    pub fn select_move(&mut self, index: usize) -> ValidationResult<()> {
        self.moves.select(index)
    }

    pub fn select_item(&mut self, index: usize) -> ValidationResult<()> {
        self.items.select(index)
    }

    pub fn selected_move(&self) -> Option<usize> {
        self.moves.selected()
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.items.selected()
    }

    pub fn clear_item_selection(&mut self) {
        self.items.clear_selection();
    }

    pub fn clear_selections(&mut self) {
        self.moves.clear_selection();
        self.items.clear_selection();
    }

    /// Put every battle-only value back to base and drop selections.
    pub fn reset_after_battle(&mut self) {
        self.stats.reset_battle_stats();
        self.clear_selections();
    }

    /// True when the stored level matches the curve for the stored total.
    pub fn level_matches_exp(&self) -> bool {
        self.experience.is_consistent() && self.level() == level_for_exp(self.total_exp())
    }
}

impl TryFrom<CombatantConfig> for Combatant {
    type Error = ValidationError;

    fn try_from(config: CombatantConfig) -> ValidationResult<Self> {
        Combatant::new(config)
    }
}

impl Serialize for Combatant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_config().serialize(serializer)
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}, {} Lv.{}) HP {}/{} [{}]",
            self.name,
            self.id,
            self.pokemon_type,
            self.level(),
            self.current_hp(),
            self.max_hp(),
            self.status
        )
    }
}
