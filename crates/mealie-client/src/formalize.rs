//! Ingredient formalization — parse free-text ingredient lines and rewrite
//! them as structured, catalog-linked fields.

use serde::Serialize;

use crate::catalog::CatalogResolver;
use crate::client::MealieApi;
use crate::link::{link_ingredient_references, LinkToken};
use crate::types::{MealieError, MealieResult, RecipePatch};

/// Knobs for one formalization run.
#[derive(Debug, Clone)]
pub struct FormalizeOptions {
    /// Create foods the catalog does not know yet.
    pub create_missing_foods: bool,
    /// Create units the catalog does not know yet.
    pub create_missing_units: bool,
    /// Cross-reference ingredients against instruction-step text afterwards.
    pub link_steps: bool,
}

impl Default for FormalizeOptions {
    fn default() -> Self {
        Self {
            create_missing_foods: true,
            create_missing_units: false,
            link_steps: true,
        }
    }
}

/// Outcome of a formalization run.
#[derive(Debug, Clone, Serialize)]
pub struct FormalizeReport {
    pub slug: String,
    pub updated_ingredients: usize,
    pub created_foods: usize,
    pub created_units: usize,
    pub linked_steps: usize,
    pub status: FormalizeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormalizeStatus {
    Ok,
    NoIngredients,
}

impl FormalizeReport {
    fn no_ingredients(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            updated_ingredients: 0,
            created_foods: 0,
            created_units: 0,
            linked_steps: 0,
            status: FormalizeStatus::NoIngredients,
        }
    }
}

/// Parse, resolve, and rewrite a recipe's ingredient list, then optionally
/// link ingredients to instruction steps.
///
/// The operation is not transactional: an upstream failure aborts the
/// remaining steps, and writes already committed stay committed.
pub async fn formalize<A: MealieApi + ?Sized>(
    api: &A,
    slug: &str,
    options: &FormalizeOptions,
) -> MealieResult<FormalizeReport> {
    let recipe = api.get_recipe(slug).await?;
    let ingredients = recipe.recipe_ingredient;
    if ingredients.is_empty() {
        return Ok(FormalizeReport::no_ingredients(slug));
    }

    let texts: Vec<String> = ingredients
        .iter()
        .map(|ingredient| ingredient.parser_text().to_string())
        .collect();
    let parsed = api.parse_ingredients(&texts).await?;
    // One result per input, same order. Padding or truncating here would
    // silently attach parsed data to the wrong ingredient.
    if parsed.len() != texts.len() {
        return Err(MealieError::UnexpectedShape(format!(
            "ingredient parser returned {} results for {} inputs",
            parsed.len(),
            texts.len()
        )));
    }

    let mut resolver = CatalogResolver::new(api);
    resolver.preload().await?;

    let mut updated = Vec::with_capacity(ingredients.len());
    let mut tokens: Vec<LinkToken> = Vec::new();

    for (mut ingredient, parsed_item) in ingredients.into_iter().zip(parsed) {
        let entry = parsed_item.ingredient;

        // Quantity and note are safe to normalize from parser output.
        if let Some(quantity) = entry.quantity {
            ingredient.quantity = Some(quantity);
        }
        if let Some(note) = entry.note.filter(|note| !note.is_empty()) {
            ingredient.note = Some(note);
        }

        let food_name = entry
            .food
            .as_ref()
            .and_then(|food| food.name.as_deref())
            .unwrap_or("");
        if let Some(food) = resolver
            .resolve_food(food_name, options.create_missing_foods)
            .await?
        {
            ingredient.food_id = Some(food.id.clone());
            ingredient.food = Some(food.embedded());
        }

        let unit_name = entry
            .unit
            .as_ref()
            .and_then(|unit| unit.name.as_deref())
            .unwrap_or("");
        let unit_abbr = entry
            .unit
            .as_ref()
            .and_then(|unit| unit.abbreviation.as_deref())
            .unwrap_or("");
        if let Some(unit) = resolver
            .resolve_unit(unit_name, unit_abbr, options.create_missing_units)
            .await?
        {
            ingredient.unit_id = Some(unit.id.clone());
            ingredient.unit = Some(unit.embedded());
        }

        // Link token: resolved food name, else the note, lower-cased.
        let token = ingredient
            .food
            .as_ref()
            .map(|food| food.name.trim())
            .filter(|name| !name.is_empty())
            .or_else(|| {
                ingredient
                    .note
                    .as_deref()
                    .map(str::trim)
                    .filter(|note| !note.is_empty())
            })
            .unwrap_or("")
            .to_lowercase();
        if let Some(reference_id) = ingredient
            .reference_id
            .clone()
            .filter(|id| !id.is_empty() && !token.is_empty())
        {
            tokens.push(LinkToken {
                token,
                reference_id,
            });
        }

        updated.push(ingredient);
    }

    let updated_count = updated.len();
    api.patch_recipe(
        slug,
        &RecipePatch {
            recipe_ingredient: Some(updated),
            ..Default::default()
        },
    )
    .await?;

    let mut linked_steps = 0;
    if options.link_steps {
        // Re-fetch: the ingredient write-back may have changed
        // server-computed fields on the instruction list.
        let fresh = api.get_recipe(slug).await?;
        let mut steps = fresh.recipe_instructions;
        linked_steps = link_ingredient_references(&mut steps, &tokens);
        api.patch_recipe(
            slug,
            &RecipePatch {
                recipe_instructions: Some(steps),
                ..Default::default()
            },
        )
        .await?;
    }

    tracing::info!(
        slug,
        updated_ingredients = updated_count,
        created_foods = resolver.created_foods(),
        created_units = resolver.created_units(),
        linked_steps,
        "formalized recipe ingredients"
    );

    Ok(FormalizeReport {
        slug: slug.to_string(),
        updated_ingredients: updated_count,
        created_foods: resolver.created_foods(),
        created_units: resolver.created_units(),
        linked_steps,
        status: FormalizeStatus::Ok,
    })
}
