use crate::errors::{ItemResult, ValidationError, ValidationResult};
use crate::move_data::get_item_data;
use schema::{ItemData, ItemEffect};
use serde::{Deserialize, Serialize};

pub const MAX_ITEMS: usize = 6;

/// Ordered, bounded bag of held items with an optional selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemSet {
    items: Vec<ItemData>,
    #[serde(default)]
    selected: Option<usize>,
}

impl ItemSet {
    pub fn new(items: Vec<ItemData>) -> ValidationResult<Self> {
        let mut set = ItemSet::default();
        for item in items {
            set.add_item(item)?;
        }
        Ok(set)
    }

    pub fn add_item(&mut self, item: ItemData) -> ValidationResult<()> {
        if self.items.len() >= MAX_ITEMS {
            return Err(ValidationError::InvalidPokemonPoints(format!(
                "cannot carry {}: already holding {} items",
                item.name, MAX_ITEMS
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// Add a catalogue item by name.
    pub fn add_item_by_name(&mut self, name: &str) -> ItemResult<()> {
        let item = get_item_data(name)?;
        self.add_item(item)?;
        Ok(())
    }

    /// Use the item at `index`, returning its effect. Single-use items are consumed.
    pub fn use_item(&mut self, index: usize) -> Option<ItemEffect> {
        let item = self.items.get(index)?;
        let effect = item.effect;
        if !item.reusable {
            self.remove_at(index);
        }
        Some(effect)
    }

    /// Remove the first item with this name. Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        match self.find(name) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    fn remove_at(&mut self, index: usize) {
        self.items.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, index: usize) -> Option<&ItemData> {
        self.items.get(index)
    }

    pub fn select(&mut self, index: usize) -> ValidationResult<()> {
        if index >= self.items.len() {
            return Err(ValidationError::InvalidPokemonPoints(format!(
                "no item in slot {}",
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

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemData> {
        self.items.iter()
    }
}
