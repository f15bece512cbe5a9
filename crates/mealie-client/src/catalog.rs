//! Catalog resolution — find-or-create foods and units by name.
//!
//! The caches live for one formalization run and are never shared across
//! tool invocations. Creation has no upstream dedup guard: two concurrent
//! runs can still create duplicate entries. Within a single run the call
//! chain is strictly sequential, so the run-local cache is enough.

use std::collections::HashMap;

use crate::client::MealieApi;
use crate::types::{IngredientFood, IngredientUnit, MealieResult};

/// Page size for the heuristic cache prefetch.
const PRELOAD_PAGE_SIZE: u32 = 250;

/// Page size for targeted food searches on a cache miss.
const SEARCH_PAGE_SIZE: u32 = 25;

pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Per-run find-or-create resolver over the food and unit catalogs.
///
/// Foods are keyed by normalized name; units are keyed by both normalized
/// name and normalized abbreviation. All matching is case-insensitive.
pub struct CatalogResolver<'a, A: MealieApi + ?Sized> {
    api: &'a A,
    foods: HashMap<String, IngredientFood>,
    units: HashMap<String, IngredientUnit>,
    created_foods: usize,
    created_units: usize,
}

impl<'a, A: MealieApi + ?Sized> CatalogResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            foods: HashMap::new(),
            units: HashMap::new(),
            created_foods: 0,
            created_units: 0,
        }
    }

    /// Number of foods created upstream by this resolver.
    pub fn created_foods(&self) -> usize {
        self.created_foods
    }

    /// Number of units created upstream by this resolver.
    pub fn created_units(&self) -> usize {
        self.created_units
    }

    /// Prefetch the first page of each catalog into the caches.
    ///
    /// This is a heuristic to avoid one search round trip per ingredient;
    /// names beyond the first page still resolve through `resolve_food`'s
    /// targeted search.
    pub async fn preload(&mut self) -> MealieResult<()> {
        let foods = self.api.get_foods(1, PRELOAD_PAGE_SIZE, None).await?;
        for food in foods.items {
            let key = normalize(&food.name);
            if !key.is_empty() {
                self.foods.insert(key, food);
            }
        }

        let units = self.api.get_units(1, PRELOAD_PAGE_SIZE).await?;
        for unit in units.items {
            self.cache_unit(unit);
        }

        tracing::debug!(
            foods = self.foods.len(),
            units = self.units.len(),
            "catalog cache preloaded"
        );
        Ok(())
    }

    fn cache_unit(&mut self, unit: IngredientUnit) {
        let name_key = normalize(&unit.name);
        let abbr_key = unit.abbreviation.as_deref().map(normalize);
        if let Some(abbr_key) = abbr_key.filter(|k| !k.is_empty()) {
            self.units.insert(abbr_key, unit.clone());
        }
        if !name_key.is_empty() {
            self.units.insert(name_key, unit);
        }
    }

    /// Resolve a food by name: cache, then exact-match upstream search,
    /// then optional creation. Returns `None` when the name is empty or
    /// nothing matched and creation is disabled.
    pub async fn resolve_food(
        &mut self,
        name: &str,
        create_if_missing: bool,
    ) -> MealieResult<Option<IngredientFood>> {
        let key = normalize(name);
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(food) = self.foods.get(&key) {
            return Ok(Some(food.clone()));
        }

        // The search endpoint returns superset matches; keep only an exact
        // case-insensitive name hit.
        let search = self.api.get_foods(1, SEARCH_PAGE_SIZE, Some(name)).await?;
        if let Some(hit) = search
            .items
            .into_iter()
            .find(|candidate| normalize(&candidate.name) == key)
        {
            self.foods.insert(key, hit.clone());
            return Ok(Some(hit));
        }

        if create_if_missing {
            let created = self.api.create_food(name, "").await?;
            tracing::info!(name, id = %created.id, "created food");
            self.foods.insert(key, created.clone());
            self.created_foods += 1;
            return Ok(Some(created));
        }

        Ok(None)
    }

    /// Resolve a unit by name or abbreviation (first non-empty wins as the
    /// lookup key). There is no upstream unit search; misses fall through
    /// to optional creation, which requires a name.
    pub async fn resolve_unit(
        &mut self,
        name: &str,
        abbreviation: &str,
        create_if_missing: bool,
    ) -> MealieResult<Option<IngredientUnit>> {
        let lookup = if name.trim().is_empty() {
            abbreviation
        } else {
            name
        };
        let key = normalize(lookup);
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(unit) = self.units.get(&key) {
            return Ok(Some(unit.clone()));
        }

        if create_if_missing && !name.trim().is_empty() {
            let created = self.api.create_unit(name, abbreviation, true).await?;
            tracing::info!(name, id = %created.id, "created unit");
            self.cache_unit(created.clone());
            self.created_units += 1;
            return Ok(Some(created));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Flour "), "flour");
        assert_eq!(normalize("TSP"), "tsp");
        assert_eq!(normalize("   "), "");
    }
}
