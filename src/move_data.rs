use crate::errors::{DataError, DataResult};
use schema::{ItemData, MoveData};
use std::collections::HashMap;
use std::sync::LazyLock;

const MOVES_RON: &str = include_str!("../data/moves.ron");
const ITEMS_RON: &str = include_str!("../data/items.ron");

// Global catalogues - parsed once on first access, keyed by lowercase name
static MOVE_DATA: LazyLock<DataResult<HashMap<String, MoveData>>> =
    LazyLock::new(|| load_catalogue(MOVES_RON, |data: &MoveData| data.name.clone()));

static ITEM_DATA: LazyLock<DataResult<HashMap<String, ItemData>>> =
    LazyLock::new(|| load_catalogue(ITEMS_RON, |data: &ItemData| data.name.clone()));

fn load_catalogue<T, F>(source: &str, key: F) -> DataResult<HashMap<String, T>>
where
    T: serde::de::DeserializeOwned,
    F: Fn(&T) -> String,
{
    let entries: Vec<T> =
        ron::from_str(source).map_err(|e| DataError::MalformedData(e.to_string()))?;
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        let name = key(&entry).to_lowercase();
        if map.insert(name.clone(), entry).is_some() {
            return Err(DataError::MalformedData(format!(
                "duplicate catalogue entry '{}'",
                name
            )));
        }
    }
    Ok(map)
}

fn catalogue<T>(
    store: &'static DataResult<HashMap<String, T>>,
) -> DataResult<&'static HashMap<String, T>> {
    store.as_ref().map_err(Clone::clone)
}

/// Get move data for a move by name (case-insensitive)
pub fn get_move_data(name: &str) -> DataResult<MoveData> {
    catalogue(&MOVE_DATA)?
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| DataError::MoveNotFound(name.to_string()))
}

/// Get item data for an item by name (case-insensitive)
pub fn get_item_data(name: &str) -> DataResult<ItemData> {
    catalogue(&ITEM_DATA)?
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| DataError::ItemNotFound(name.to_string()))
}

/// All known move names, sorted.
pub fn move_names() -> DataResult<Vec<String>> {
    let mut names: Vec<String> = catalogue(&MOVE_DATA)?
        .values()
        .map(|data| data.name.clone())
        .collect();
    names.sort();
    Ok(names)
}
