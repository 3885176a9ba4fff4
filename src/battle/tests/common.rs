use crate::battle::state::{BattlePair, TurnRng};
use crate::move_data::{get_item_data, get_move_data};
use crate::moves::MoveInstance;
use crate::pokemon::{Combatant, CombatantConfig, StatValues};
use schema::{MoveCategory, MoveData, PokemonType, StatType, StatusType};

/// A builder for creating test combatants with flat, predictable stats.
///
/// # Example
/// ```ignore
/// let pokemon = TestCombatantBuilder::new("Sparky", PokemonType::Electric)
///     .with_stat(StatType::Speed, 90)
///     .with_moves(&["Thunder Shock", "Tackle"])
///     .with_status(StatusType::Paralysis)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    pokemon_type: PokemonType,
    level: u8,
    stats: StatValues,
    moves: Vec<MoveInstance>,
    items: Vec<String>,
    status: Option<StatusType>,
    current_hp: Option<i32>,
    crit_ratio: f64,
    id: u32,
}

impl TestCombatantBuilder {
    /// Level 50, every stat 100, no critical hits, Tackle and Scratch.
    pub fn new(name: &str, pokemon_type: PokemonType) -> Self {
        Self {
            name: name.to_string(),
            pokemon_type,
            level: 50,
            stats: StatValues {
                hp: 100,
                attack: 100,
                defense: 100,
                special_attack: 100,
                special_defense: 100,
                speed: 100,
                evasion: 100,
                accuracy: 100,
            },
            moves: vec![move_named("Tackle"), move_named("Scratch")],
            items: Vec::new(),
            status: None,
            current_hp: None,
            crit_ratio: 0.0,
            id: 1,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_stat(mut self, stat: StatType, value: i32) -> Self {
        match stat {
            StatType::Hp => self.stats.hp = value,
            StatType::Attack => self.stats.attack = value,
            StatType::Defense => self.stats.defense = value,
            StatType::SpecialAttack => self.stats.special_attack = value,
            StatType::SpecialDefense => self.stats.special_defense = value,
            StatType::Speed => self.stats.speed = value,
            StatType::Evasion => self.stats.evasion = value,
            StatType::Accuracy => self.stats.accuracy = value,
        }
        self
    }

    /// Replace the move list with catalogue moves.
    pub fn with_moves(mut self, names: &[&str]) -> Self {
        self.moves = names.iter().map(|name| move_named(name)).collect();
        self
    }

    /// Replace the move list with hand-made moves.
    pub fn with_move_data(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = moves.into_iter().map(MoveInstance::new).collect();
        self
    }

    /// Set the remaining PP of every move.
    pub fn with_move_pp(mut self, pp: u8) -> Self {
        for mv in &mut self.moves {
            mv.pp = pp;
        }
        self
    }

    pub fn with_items(mut self, names: &[&str]) -> Self {
        self.items = names.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: StatusType) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_crit_ratio(mut self, ratio: f64) -> Self {
        self.crit_ratio = ratio;
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn config(&self) -> CombatantConfig {
        let mut current = self.stats;
        if let Some(hp) = self.current_hp {
            current.hp = hp;
        }
        CombatantConfig {
            name: self.name.clone(),
            species: self.name.clone(),
            pokemon_type: self.pokemon_type.to_string(),
            level: self.level,
            total_exp: None,
            base_stats: self.stats,
            current_stats: Some(current),
            status: if current.hp == 0 {
                StatusType::Fainted
            } else {
                StatusType::Normal
            },
            total_wins: 0,
            total_evolutions: 0,
            height: 1.0,
            weight: 10.0,
            description: String::new(),
            id: self.id,
            crit_ratio: self.crit_ratio,
            moves: self.moves.clone(),
            items: self
                .items
                .iter()
                .map(|name| {
                    get_item_data(name).unwrap_or_else(|e| panic!("unknown item {}: {}", name, e))
                })
                .collect(),
            sprite: String::new(),
            cry: String::new(),
        }
    }

    pub fn build(self) -> Combatant {
        let mut combatant = match Combatant::new(self.config()) {
            Ok(combatant) => combatant,
            Err(err) => panic!("Failed to build test combatant {}: {}", self.name, err),
        };
        if let Some(status) = self.status {
            combatant
                .set_status(status)
                .unwrap_or_else(|e| panic!("Failed to set status: {}", e));
        }
        combatant
    }
}

pub fn move_named(name: &str) -> MoveInstance {
    match get_move_data(name) {
        Ok(data) => MoveInstance::new(data),
        Err(err) => panic!("Failed to load move {}: {}", name, err),
    }
}

/// A typeless-looking Normal move with fixed power and perfect accuracy.
pub fn strike(power: u16) -> MoveData {
    MoveData {
        name: format!("Strike {}", power),
        move_type: PokemonType::Normal,
        category: MoveCategory::Physical,
        power,
        accuracy: 100,
        max_pp: 30,
        infliction: None,
        sound: String::new(),
    }
}

pub fn create_test_pair(first: Combatant, second: Combatant) -> BattlePair {
    BattlePair::new(first, second)
}

/// A `TurnRng` that always rolls 50: every 100%-accuracy move hits, no
/// critical hits at the default ratio, and 50% status checks pass.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50])
}
