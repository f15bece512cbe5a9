//! Recipe tools: CRUD, import, scraping, suggestions.

use chrono::NaiveDate;
use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn get_recipes_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_recipes".to_string(),
        description: Some("Get a list of recipes. Use search to filter by name/description".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "search": { "type": "string", "description": "Search query" },
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 20, "maximum": 50 }
            }
        }),
    }
}

pub async fn get_recipes(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default)]
        search: Option<String>,
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page_small")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .get_recipes(
            params.page,
            params.per_page.min(50),
            params.search.as_deref(),
            &[],
            &[],
        )
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_recipe".to_string(),
        description: Some(
            "Get complete details for a recipe including ingredients and instructions".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string", "description": "Recipe slug or ID" }
            },
            "required": ["slug"]
        }),
    }
}

pub async fn get_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
    }
    let params: Params = parse_args(args)?;
    let recipe = client.get_recipe(&params.slug).await?;
    Ok(ToolCallResult::json(&recipe))
}

pub fn create_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_recipe".to_string(),
        description: Some("Create a new empty recipe. Returns the slug".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "description": { "type": "string", "default": "" }
            },
            "required": ["name"]
        }),
    }
}

pub async fn create_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        name: String,
        #[serde(default)]
        description: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .create_recipe(&json!({ "name": params.name, "description": params.description }))
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_recipe".to_string(),
        description: Some("Full update of a recipe. Requires complete recipe data".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" },
                "recipe_data": { "type": "object", "description": "Complete recipe object with all fields" }
            },
            "required": ["slug", "recipe_data"]
        }),
    }
}

pub async fn update_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
        recipe_data: Value,
    }
    let params: Params = parse_args(args)?;
    let result = client.update_recipe(&params.slug, &params.recipe_data).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn patch_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "patch_recipe".to_string(),
        description: Some("Partial update of a recipe. Only updates provided fields".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" },
                "updates": { "type": "object", "description": "Fields to update, e.g. {\"description\": \"New desc\"}" }
            },
            "required": ["slug", "updates"]
        }),
    }
}

pub async fn patch_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
        updates: Value,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .patch_recipe_fields(&params.slug, &params.updates)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_recipe".to_string(),
        description: Some("Delete a recipe by slug".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" }
            },
            "required": ["slug"]
        }),
    }
}

pub async fn delete_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_recipe(&params.slug).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "slug": params.slug })))
}

pub fn duplicate_recipe_def() -> ToolDefinition {
    ToolDefinition {
        name: "duplicate_recipe".to_string(),
        description: Some("Duplicate a recipe. Returns the new recipe's slug".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" }
            },
            "required": ["slug"]
        }),
    }
}

pub async fn duplicate_recipe(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
    }
    let params: Params = parse_args(args)?;
    let slug = client.duplicate_recipe(&params.slug).await?;
    Ok(ToolCallResult::json(&slug))
}

pub fn set_recipe_last_made_def() -> ToolDefinition {
    ToolDefinition {
        name: "set_recipe_last_made".to_string(),
        description: Some("Set when a recipe was last made. Date format: YYYY-MM-DD".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" },
                "date": { "type": "string", "description": "YYYY-MM-DD" }
            },
            "required": ["slug", "date"]
        }),
    }
}

pub async fn set_recipe_last_made(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
        date: String,
    }
    let params: Params = parse_args(args)?;
    if NaiveDate::parse_from_str(&params.date, "%Y-%m-%d").is_err() {
        return Err(McpError::InvalidParams(format!(
            "date must be YYYY-MM-DD, got {:?}",
            params.date
        )));
    }
    let result = client
        .set_recipe_last_made(&params.slug, &params.date)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn import_recipe_from_url_def() -> ToolDefinition {
    ToolDefinition {
        name: "import_recipe_from_url".to_string(),
        description: Some(
            "Import a recipe from a website URL. Returns the slug of the created recipe".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" },
                "include_tags": { "type": "boolean", "default": false }
            },
            "required": ["url"]
        }),
    }
}

pub async fn import_recipe_from_url(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        url: String,
        #[serde(default)]
        include_tags: bool,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .import_recipe_from_url(&params.url, params.include_tags)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn import_or_get_recipe_from_url_def() -> ToolDefinition {
    ToolDefinition {
        name: "import_or_get_recipe_from_url".to_string(),
        description: Some(
            "Import a recipe from URL, or return the existing recipe when its orgURL already matches"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" },
                "include_tags": { "type": "boolean", "default": false },
                "dedupe_by_org_url": { "type": "boolean", "default": true },
                "import_as_name": { "type": "string", "description": "Rename the recipe after import" }
            },
            "required": ["url"]
        }),
    }
}

pub async fn import_or_get_recipe_from_url(
    args: Value,
    client: &MealieClient,
) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        url: String,
        #[serde(default)]
        include_tags: bool,
        #[serde(default = "super::default_true")]
        dedupe_by_org_url: bool,
        #[serde(default)]
        import_as_name: Option<String>,
    }
    let params: Params = parse_args(args)?;
    let normalized = params.url.trim().to_string();

    if params.dedupe_by_org_url {
        let mut page = 1;
        loop {
            let batch = client.get_recipes(page, 50, None, &[], &[]).await?;
            let items = batch
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if items.is_empty() {
                break;
            }

            for item in &items {
                let Some(slug) = item.get("slug").and_then(Value::as_str) else {
                    continue;
                };
                // A single unreadable recipe must not abort the scan.
                let Ok(recipe) = client.get_recipe(slug).await else {
                    continue;
                };
                let org_url = recipe
                    .extra
                    .get("orgURL")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .trim();
                if !org_url.is_empty() && org_url == normalized {
                    return Ok(ToolCallResult::json(&json!({
                        "status": "existing",
                        "slug": slug,
                    })));
                }
            }

            if items.len() < 50 {
                break;
            }
            page += 1;
        }
    }

    let slug = client
        .import_recipe_from_url(&normalized, params.include_tags)
        .await?;
    if let (Some(name), Some(slug_str)) = (&params.import_as_name, slug.as_str()) {
        client
            .patch_recipe_fields(slug_str, &json!({ "name": name }))
            .await?;
    }
    Ok(ToolCallResult::json(&json!({
        "status": "imported",
        "slug": slug,
    })))
}

pub fn test_scrape_url_def() -> ToolDefinition {
    ToolDefinition {
        name: "test_scrape_url".to_string(),
        description: Some(
            "Test scraping a recipe URL without saving. Useful to preview before import".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" }
            },
            "required": ["url"]
        }),
    }
}

pub async fn test_scrape_url(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        url: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.test_scrape_url(&params.url).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn suggest_recipes_def() -> ToolDefinition {
    ToolDefinition {
        name: "suggest_recipes".to_string(),
        description: Some("Get recipe suggestions based on mealplan rules".to_string()),
        input_schema: json!({ "type": "object", "properties": {} }),
    }
}

pub async fn suggest_recipes(_args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let result = client.get_recipe_suggestions().await?;
    Ok(ToolCallResult::json(&result))
}
