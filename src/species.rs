use crate::errors::{DataError, DataResult};
use schema::SpeciesDescriptor;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

const SPECIES_RON: &str = include_str!("../data/species.ron");

static SPECIES_DATA: LazyLock<DataResult<HashMap<String, SpeciesDescriptor>>> =
    LazyLock::new(|| {
        let entries: Vec<SpeciesDescriptor> = ron::from_str(SPECIES_RON)
            .map_err(|e| DataError::MalformedData(e.to_string()))?;
        Ok(entries
            .into_iter()
            .map(|species| (species.name.to_lowercase(), species))
            .collect())
    });

/// Get species data by name (case-insensitive)
pub fn get_species_data(name: &str) -> DataResult<SpeciesDescriptor> {
    let species_map = SPECIES_DATA.as_ref().map_err(Clone::clone)?;
    species_map
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| DataError::SpeciesNotFound(name.to_string()))
}

/// All species in the catalogue sorted by pokedex number
pub fn all_species() -> DataResult<Vec<SpeciesDescriptor>> {
    let species_map = SPECIES_DATA.as_ref().map_err(Clone::clone)?;
    let mut species: Vec<SpeciesDescriptor> = species_map.values().cloned().collect();
    species.sort_by_key(|s| s.pokedex_number);
    Ok(species)
}

/// Compact one-line summary of a species, used by the demo binary's roster listing
pub struct SpeciesSummary<'a>(pub &'a SpeciesDescriptor);

impl fmt::Display for SpeciesSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let species = self.0;
        write!(
            f,
            "#{:03} {} [{}] HP:{} ATK:{} DEF:{} SP.ATK:{} SP.DEF:{} SPD:{}",
            species.pokedex_number,
            species.name,
            species.pokemon_type,
            species.base_stats.hp,
            species.base_stats.attack,
            species.base_stats.defense,
            species.base_stats.sp_attack,
            species.base_stats.sp_defense,
            species.base_stats.speed
        )
    }
}
