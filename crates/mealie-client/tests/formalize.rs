//! Formalization scenarios against a fake upstream API.

use std::sync::Mutex;

use async_trait::async_trait;

use mealie_client::{
    formalize, FormalizeOptions, FormalizeStatus, IngredientFood, IngredientUnit, MealieApi,
    MealieError, MealieResult, Page, ParsedEntry, ParsedFood, ParsedIngredient, ParsedUnit,
    Recipe, RecipeIngredient, RecipePatch, RecipeStep,
};

// ─────────────────────── fake upstream ───────────────────────

#[derive(Default)]
struct FakeState {
    recipe: Recipe,
    foods: Vec<IngredientFood>,
    /// Foods only discoverable through a search query, simulating catalog
    /// entries beyond the preloaded first page.
    unlisted_foods: Vec<IngredientFood>,
    units: Vec<IngredientUnit>,
    parsed: Vec<ParsedIngredient>,
    calls: Vec<String>,
    next_id: u32,
    ingredient_patches: Vec<Vec<RecipeIngredient>>,
    instruction_patches: Vec<Vec<RecipeStep>>,
}

#[derive(Default)]
struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn with_state(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn last_ingredient_patch(&self) -> Vec<RecipeIngredient> {
        self.state
            .lock()
            .unwrap()
            .ingredient_patches
            .last()
            .cloned()
            .expect("no ingredient patch was written")
    }

    fn last_instruction_patch(&self) -> Vec<RecipeStep> {
        self.state
            .lock()
            .unwrap()
            .instruction_patches
            .last()
            .cloned()
            .expect("no instruction patch was written")
    }
}

#[async_trait]
impl MealieApi for FakeApi {
    async fn get_recipe(&self, _slug: &str) -> MealieResult<Recipe> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_recipe".to_string());
        Ok(state.recipe.clone())
    }

    async fn patch_recipe(&self, _slug: &str, patch: &RecipePatch) -> MealieResult<Recipe> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("patch_recipe".to_string());
        if let Some(ingredients) = &patch.recipe_ingredient {
            state.ingredient_patches.push(ingredients.clone());
            state.recipe.recipe_ingredient = ingredients.clone();
        }
        if let Some(steps) = &patch.recipe_instructions {
            state.instruction_patches.push(steps.clone());
            state.recipe.recipe_instructions = steps.clone();
        }
        Ok(state.recipe.clone())
    }

    async fn get_foods(
        &self,
        _page: u32,
        _per_page: u32,
        search: Option<&str>,
    ) -> MealieResult<Page<IngredientFood>> {
        let mut state = self.state.lock().unwrap();
        let items = match search {
            None => {
                state.calls.push("get_foods".to_string());
                state.foods.clone()
            }
            Some(query) => {
                state.calls.push(format!("search_foods:{query}"));
                let needle = query.to_lowercase();
                state
                    .foods
                    .iter()
                    .chain(state.unlisted_foods.iter())
                    .filter(|food| food.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        };
        Ok(Page {
            total: items.len() as u64,
            items,
            ..Default::default()
        })
    }

    async fn create_food(&self, name: &str, _description: &str) -> MealieResult<IngredientFood> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create_food:{name}"));
        state.next_id += 1;
        let food = IngredientFood {
            id: format!("food-{}", state.next_id),
            name: name.to_string(),
            ..Default::default()
        };
        state.foods.push(food.clone());
        Ok(food)
    }

    async fn get_units(&self, _page: u32, _per_page: u32) -> MealieResult<Page<IngredientUnit>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_units".to_string());
        Ok(Page {
            total: state.units.len() as u64,
            items: state.units.clone(),
            ..Default::default()
        })
    }

    async fn create_unit(
        &self,
        name: &str,
        abbreviation: &str,
        _fraction: bool,
    ) -> MealieResult<IngredientUnit> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create_unit:{name}"));
        state.next_id += 1;
        let unit = IngredientUnit {
            id: format!("unit-{}", state.next_id),
            name: name.to_string(),
            abbreviation: Some(abbreviation.to_string()),
            ..Default::default()
        };
        state.units.push(unit.clone());
        Ok(unit)
    }

    async fn parse_ingredients(&self, texts: &[String]) -> MealieResult<Vec<ParsedIngredient>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("parse_ingredients:{}", texts.len()));
        Ok(state.parsed.clone())
    }
}

// ─────────────────────── fixtures ───────────────────────

fn ingredient(note: &str, reference_id: &str) -> RecipeIngredient {
    RecipeIngredient {
        note: Some(note.to_string()),
        reference_id: Some(reference_id.to_string()),
        ..Default::default()
    }
}

fn parsed(quantity: f64, unit: &str, food: &str) -> ParsedIngredient {
    ParsedIngredient {
        ingredient: ParsedEntry {
            quantity: Some(quantity),
            unit: Some(ParsedUnit {
                name: Some(unit.to_string()),
                abbreviation: Some(unit.to_string()),
            }),
            food: Some(ParsedFood {
                name: Some(food.to_string()),
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn food(id: &str, name: &str) -> IngredientFood {
    IngredientFood {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

fn recipe(slug: &str, ingredients: Vec<RecipeIngredient>, steps: Vec<RecipeStep>) -> Recipe {
    Recipe {
        slug: slug.to_string(),
        recipe_ingredient: ingredients,
        recipe_instructions: steps,
        ..Default::default()
    }
}

fn create_all() -> FormalizeOptions {
    FormalizeOptions {
        create_missing_foods: true,
        create_missing_units: true,
        link_steps: false,
    }
}

// ─────────────────────── scenarios ───────────────────────

#[tokio::test]
async fn creates_missing_foods_and_units() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe(
            "pancakes",
            vec![
                ingredient("2 cups flour", "ref-a"),
                ingredient("1 tsp salt", "ref-b"),
            ],
            vec![],
        ),
        parsed: vec![parsed(2.0, "cup", "flour"), parsed(1.0, "tsp", "salt")],
        ..Default::default()
    });

    let report = formalize(&api, "pancakes", &create_all()).await.unwrap();

    assert_eq!(report.updated_ingredients, 2);
    assert_eq!(report.created_foods, 2);
    assert_eq!(report.created_units, 2);
    assert_eq!(report.status, FormalizeStatus::Ok);

    let patched = api.last_ingredient_patch();
    assert_eq!(patched[0].quantity, Some(2.0));
    assert_eq!(patched[0].food.as_ref().unwrap().name, "flour");
    assert_eq!(
        patched[0].food_id.as_deref(),
        Some(patched[0].food.as_ref().unwrap().id.as_str())
    );
    assert_eq!(patched[0].unit.as_ref().unwrap().name, "cup");
    assert_eq!(patched[1].food.as_ref().unwrap().name, "salt");
    assert_eq!(patched[1].unit.as_ref().unwrap().name, "tsp");
}

#[tokio::test]
async fn report_status_serializes_kebab_case() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe("empty", vec![], vec![]),
        ..Default::default()
    });
    let report = formalize(&api, "empty", &create_all()).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["status"], "no-ingredients");
}

#[tokio::test]
async fn zero_ingredients_issues_no_parser_or_catalog_calls() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe("empty", vec![], vec![]),
        ..Default::default()
    });

    let report = formalize(&api, "empty", &FormalizeOptions::default())
        .await
        .unwrap();

    assert_eq!(report.status, FormalizeStatus::NoIngredients);
    assert_eq!(report.updated_ingredients, 0);
    assert_eq!(report.created_foods, 0);
    assert_eq!(report.created_units, 0);
    assert_eq!(report.linked_steps, 0);
    assert_eq!(api.calls(), vec!["get_recipe".to_string()]);
}

#[tokio::test]
async fn unresolved_food_is_left_untouched_when_creation_disabled() {
    let mut original = ingredient("2 cups flour", "ref-a");
    original.food = Some(food("orig-food", "Leftover"));
    original.food_id = Some("orig-food".to_string());

    let api = FakeApi::with_state(FakeState {
        recipe: recipe("pie", vec![original], vec![]),
        parsed: vec![parsed(2.0, "cup", "flour")],
        ..Default::default()
    });

    let options = FormalizeOptions {
        create_missing_foods: false,
        create_missing_units: false,
        link_steps: false,
    };
    let report = formalize(&api, "pie", &options).await.unwrap();

    assert_eq!(report.created_foods, 0);
    assert_eq!(report.created_units, 0);

    let patched = api.last_ingredient_patch();
    assert_eq!(patched[0].food_id.as_deref(), Some("orig-food"));
    assert_eq!(patched[0].food.as_ref().unwrap().name, "Leftover");
    assert!(patched[0].unit.is_none());
}

#[tokio::test]
async fn second_run_finds_what_the_first_created() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe(
            "pancakes",
            vec![
                ingredient("2 cups flour", "ref-a"),
                ingredient("1 tsp salt", "ref-b"),
            ],
            vec![],
        ),
        parsed: vec![parsed(2.0, "cup", "flour"), parsed(1.0, "tsp", "salt")],
        ..Default::default()
    });

    let first = formalize(&api, "pancakes", &create_all()).await.unwrap();
    assert_eq!(first.created_foods, 2);
    let first_patch = api.last_ingredient_patch();

    let second = formalize(&api, "pancakes", &create_all()).await.unwrap();
    assert_eq!(second.created_foods, 0);
    assert_eq!(second.created_units, 0);

    let second_patch = api.last_ingredient_patch();
    assert_eq!(
        first_patch[0].food_id, second_patch[0].food_id,
        "food assignment must be stable across runs"
    );
    assert_eq!(first_patch[1].unit_id, second_patch[1].unit_id);
}

#[tokio::test]
async fn resolution_is_case_insensitive() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe(
            "bread",
            vec![
                ingredient("500g Flour", "ref-a"),
                ingredient("more flour for dusting", "ref-b"),
            ],
            vec![],
        ),
        foods: vec![food("f-1", "Flour")],
        parsed: vec![
            ParsedIngredient {
                ingredient: ParsedEntry {
                    food: Some(ParsedFood {
                        name: Some("Flour".to_string()),
                    }),
                    ..Default::default()
                },
                ..Default::default()
            },
            ParsedIngredient {
                ingredient: ParsedEntry {
                    food: Some(ParsedFood {
                        name: Some("flour".to_string()),
                    }),
                    ..Default::default()
                },
                ..Default::default()
            },
        ],
        ..Default::default()
    });

    let options = FormalizeOptions {
        create_missing_foods: false,
        create_missing_units: false,
        link_steps: false,
    };
    let report = formalize(&api, "bread", &options).await.unwrap();

    assert_eq!(report.created_foods, 0);
    let patched = api.last_ingredient_patch();
    assert_eq!(patched[0].food_id.as_deref(), Some("f-1"));
    assert_eq!(patched[1].food_id.as_deref(), Some("f-1"));
}

#[tokio::test]
async fn search_resolves_foods_missing_from_the_preload_page() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe("curry", vec![ingredient("2 star anise", "ref-a")], vec![]),
        unlisted_foods: vec![food("f-77", "star anise")],
        parsed: vec![ParsedIngredient {
            ingredient: ParsedEntry {
                food: Some(ParsedFood {
                    name: Some("Star Anise".to_string()),
                }),
                ..Default::default()
            },
            ..Default::default()
        }],
        ..Default::default()
    });

    let report = formalize(&api, "curry", &create_all()).await.unwrap();

    assert_eq!(report.created_foods, 0, "search hit must win over creation");
    let patched = api.last_ingredient_patch();
    assert_eq!(patched[0].food_id.as_deref(), Some("f-77"));
    assert!(api
        .calls()
        .iter()
        .any(|call| call.starts_with("search_foods:")));
}

#[tokio::test]
async fn parser_length_mismatch_is_a_hard_error() {
    let api = FakeApi::with_state(FakeState {
        recipe: recipe(
            "pancakes",
            vec![
                ingredient("2 cups flour", "ref-a"),
                ingredient("1 tsp salt", "ref-b"),
            ],
            vec![],
        ),
        parsed: vec![parsed(2.0, "cup", "flour")],
        ..Default::default()
    });

    let err = formalize(&api, "pancakes", &create_all()).await.unwrap_err();
    assert!(matches!(err, MealieError::UnexpectedShape(_)));
    // Nothing may have been written back.
    assert!(api.state.lock().unwrap().ingredient_patches.is_empty());
}

#[tokio::test]
async fn links_ingredients_to_steps_after_write_back() {
    let steps = vec![
        RecipeStep {
            text: Some("Mix the flour and salt together".to_string()),
            ..Default::default()
        },
        RecipeStep {
            text: Some("Bake until golden".to_string()),
            ..Default::default()
        },
    ];
    let api = FakeApi::with_state(FakeState {
        recipe: recipe(
            "pancakes",
            vec![
                ingredient("2 cups flour", "ref-a"),
                ingredient("1 tsp salt", "ref-b"),
            ],
            steps,
        ),
        parsed: vec![parsed(2.0, "cup", "flour"), parsed(1.0, "tsp", "salt")],
        ..Default::default()
    });

    let options = FormalizeOptions {
        create_missing_foods: true,
        create_missing_units: true,
        link_steps: true,
    };
    let report = formalize(&api, "pancakes", &options).await.unwrap();

    assert_eq!(report.linked_steps, 1);

    let steps = api.last_instruction_patch();
    let first_refs: Vec<&str> = steps[0]
        .ingredient_references
        .iter()
        .map(|r| r.reference_id.as_str())
        .collect();
    assert_eq!(first_refs, vec!["ref-a", "ref-b"]);
    assert!(steps[1].ingredient_references.is_empty());

    // The linker must have worked on a re-fetched recipe.
    let get_count = api
        .calls()
        .iter()
        .filter(|call| call.as_str() == "get_recipe")
        .count();
    assert_eq!(get_count, 2);
}
