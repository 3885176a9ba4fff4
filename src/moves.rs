use crate::errors::{DataResult, ValidationError, ValidationResult};
use crate::move_data::get_move_data;
use schema::{MoveData, PokemonType};
use serde::{Deserialize, Serialize};

pub const MIN_MOVES: usize = 2;
pub const MAX_MOVES: usize = 4;

/// A learned move: its static data plus remaining PP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// A freshly learned move with full PP.
    pub fn new(data: MoveData) -> Self {
        let pp = data.max_pp;
        MoveInstance { data, pp }
    }

    /// Look a move up in the catalogue by name.
    pub fn from_name(name: &str) -> DataResult<Self> {
        Ok(MoveInstance::new(get_move_data(name)?))
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    /// Spend one PP. Returns false if none was left.
    pub fn use_pp(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }

    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.data.max_pp);
    }
}

/// Ordered, bounded list of moves with an optional selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveSet {
    moves: Vec<MoveInstance>,
    #[serde(default)]
    selected: Option<usize>,
}

impl MoveSet {
    /// Build a move set for an owner of `owner_type`, validating size and types.
    pub fn new(moves: Vec<MoveInstance>, owner_type: PokemonType) -> ValidationResult<Self> {
        if !(MIN_MOVES..=MAX_MOVES).contains(&moves.len()) {
            return Err(ValidationError::InvalidMoveTotal(format!(
                "a combatant needs between {} and {} moves, got {}",
                MIN_MOVES,
                MAX_MOVES,
                moves.len()
            )));
        }
        let mut set = MoveSet::default();
        for mv in moves {
            set.add_move(mv, owner_type)?;
        }
        Ok(set)
    }

    /// Append a move. Full sets and type mismatches are rejected unchanged.
    pub fn add_move(&mut self, mv: MoveInstance, owner_type: PokemonType) -> ValidationResult<()> {
        if self.moves.len() >= MAX_MOVES {
            return Err(ValidationError::InvalidPokemonPoints(format!(
                "cannot learn {}: already knows {} moves",
                mv.name(),
                MAX_MOVES
            )));
        }
        if !owner_type.can_learn(mv.data.move_type) {
            return Err(ValidationError::InvalidType(format!(
                "a {} type cannot learn the {} move {}",
                owner_type,
                mv.data.move_type,
                mv.name()
            )));
        }
        if self.find(mv.name()).is_some() {
            return Err(ValidationError::InvalidPokemonPoints(format!(
                "{} is already known",
                mv.name()
            )));
        }
        self.moves.push(mv);
        Ok(())
    }

    /// Remove the named move. `Ok(false)` when no move has that name.
    pub fn delete_move_by_name(&mut self, name: &str) -> ValidationResult<bool> {
        match self.find(name) {
            Some(index) => self.delete_move_by_index(index),
            None => Ok(false),
        }
    }

    /// Remove the move at `index`. `Ok(false)` when the index is out of range.
    pub fn delete_move_by_index(&mut self, index: usize) -> ValidationResult<bool> {
        if index >= self.moves.len() {
            return Ok(false);
        }
        if self.moves.len() <= MIN_MOVES {
            return Err(ValidationError::InvalidMoveTotal(format!(
                "cannot forget {}: a combatant must keep at least {} moves",
                self.moves[index].name(),
                MIN_MOVES
            )));
        }
        self.moves.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(true)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.moves
            .iter()
            .position(|mv| mv.name().eq_ignore_ascii_case(name))
    }

    pub fn get(&self, index: usize) -> Option<&MoveInstance> {
        self.moves.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MoveInstance> {
        self.moves.get_mut(index)
    }

    pub fn move_pp(&self, name: &str) -> Option<u8> {
        self.find(name).and_then(|index| self.move_pp_at(index))
    }

    pub fn current_move_pp(&self, name: &str) -> Option<u8> {
        self.find(name).and_then(|index| self.current_move_pp_at(index))
    }

    pub fn move_pp_at(&self, index: usize) -> Option<u8> {
        self.moves.get(index).map(MoveInstance::max_pp)
    }

    pub fn current_move_pp_at(&self, index: usize) -> Option<u8> {
        self.moves.get(index).map(|mv| mv.pp)
    }

    pub fn select(&mut self, index: usize) -> ValidationResult<()> {
        if index >= self.moves.len() {
            return Err(ValidationError::InvalidPokemonPoints(format!(
                "no move in slot {}",
                index
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop moves past `len` without the minimum-count check.
    #[cfg(test)]
    pub(crate) fn truncate_unchecked(&mut self, len: usize) {
        self.moves.truncate(len);
    }

    pub fn has_usable_pp(&self) -> bool {
        self.moves.iter().any(|mv| mv.pp > 0)
    }

    pub fn restore_all_pp(&mut self, amount: u8) {
        for mv in &mut self.moves {
            mv.restore_pp(amount);
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveInstance> {
        self.moves.iter()
    }
}
