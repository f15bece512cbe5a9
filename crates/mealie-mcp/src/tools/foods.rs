//! Food database tools.

use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn get_foods_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_foods".to_string(),
        description: Some(
            "Get foods/ingredients from the database. Optionally search by name".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "search": { "type": "string" },
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 50 }
            }
        }),
    }
}

pub async fn get_foods(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default)]
        search: Option<String>,
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .get_foods(params.page, params.per_page, params.search.as_deref())
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_food_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_food".to_string(),
        description: Some("Get a specific food by ID".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "food_id": { "type": "string" }
            },
            "required": ["food_id"]
        }),
    }
}

pub async fn get_food(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        food_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_food(&params.food_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_food_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_food".to_string(),
        description: Some("Create a new food/ingredient".to_string()),
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

pub async fn create_food(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        name: String,
        #[serde(default)]
        description: String,
    }
    let params: Params = parse_args(args)?;
    let food = client.create_food(&params.name, &params.description).await?;
    Ok(ToolCallResult::json(&food))
}

pub fn update_food_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_food".to_string(),
        description: Some("Update a food's name or description".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "food_id": { "type": "string" },
                "name": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["food_id"]
        }),
    }
}

pub async fn update_food(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        food_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
    }
    let params: Params = parse_args(args)?;
    let mut data = client.get_food(&params.food_id).await?;
    if let Some(name) = params.name {
        data["name"] = Value::String(name);
    }
    if let Some(description) = params.description {
        data["description"] = Value::String(description);
    }
    let result = client.update_food(&params.food_id, &data).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_food_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_food".to_string(),
        description: Some("Delete a food".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "food_id": { "type": "string" }
            },
            "required": ["food_id"]
        }),
    }
}

pub async fn delete_food(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        food_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_food(&params.food_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.food_id })))
}

pub fn merge_foods_def() -> ToolDefinition {
    ToolDefinition {
        name: "merge_foods".to_string(),
        description: Some(
            "Merge one food into another. All references to from_food become to_food".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "from_food_id": { "type": "string" },
                "to_food_id": { "type": "string" }
            },
            "required": ["from_food_id", "to_food_id"]
        }),
    }
}

pub async fn merge_foods(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        from_food_id: String,
        to_food_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .merge_foods(&params.from_food_id, &params.to_food_id)
        .await?;
    Ok(ToolCallResult::json(&result))
}
