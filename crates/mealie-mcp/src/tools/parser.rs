//! Ingredient parser tools, including recipe formalization.

use mealie_client::{formalize, FormalizeOptions, MealieClient};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn parse_ingredient_def() -> ToolDefinition {
    ToolDefinition {
        name: "parse_ingredient".to_string(),
        description: Some(
            "Parse an ingredient string into structured data. \
             Example: \"2 cups all-purpose flour\" -> {quantity: 2, unit: \"cup\", food: \"flour\"}"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "ingredient_text": { "type": "string" }
            },
            "required": ["ingredient_text"]
        }),
    }
}

pub async fn parse_ingredient(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        ingredient_text: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.parse_ingredient(&params.ingredient_text).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn parse_ingredients_def() -> ToolDefinition {
    ToolDefinition {
        name: "parse_ingredients".to_string(),
        description: Some("Parse multiple ingredient strings in one request".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "ingredients": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["ingredients"]
        }),
    }
}

pub async fn parse_ingredients(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        ingredients: Vec<String>,
    }
    let params: Params = parse_args(args)?;
    let result = client.parse_ingredients(&params.ingredients).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn formalize_recipe_ingredients_def() -> ToolDefinition {
    ToolDefinition {
        name: "formalize_recipe_ingredients".to_string(),
        description: Some(
            "Parse and formalize recipe ingredients into structured fields. \
             Resolves parser output to real Mealie food/unit records before writing, \
             and can link ingredient references to instruction steps"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" },
                "create_missing_foods": { "type": "boolean", "default": true },
                "create_missing_units": { "type": "boolean", "default": false },
                "link_ingredients_to_steps": { "type": "boolean", "default": true }
            },
            "required": ["slug"]
        }),
    }
}

pub async fn formalize_recipe_ingredients(
    args: Value,
    client: &MealieClient,
) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
        #[serde(default = "super::default_true")]
        create_missing_foods: bool,
        #[serde(default)]
        create_missing_units: bool,
        #[serde(default = "super::default_true")]
        link_ingredients_to_steps: bool,
    }
    let params: Params = parse_args(args)?;
    let options = FormalizeOptions {
        create_missing_foods: params.create_missing_foods,
        create_missing_units: params.create_missing_units,
        link_steps: params.link_ingredients_to_steps,
    };
    let report = formalize(client, &params.slug, &options).await?;
    Ok(ToolCallResult::json(&report))
}
