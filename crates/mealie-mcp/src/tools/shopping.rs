//! Shopping list and shopping item tools.

use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn get_shopping_lists_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_shopping_lists".to_string(),
        description: Some("Get all shopping lists".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 20 }
            }
        }),
    }
}

pub async fn get_shopping_lists(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page_small")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_shopping_lists(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_shopping_list".to_string(),
        description: Some("Get a shopping list with all its items".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "list_id": { "type": "string" }
            },
            "required": ["list_id"]
        }),
    }
}

pub async fn get_shopping_list(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        list_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_shopping_list(&params.list_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_shopping_list".to_string(),
        description: Some("Create a new shopping list".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        }),
    }
}

pub async fn create_shopping_list(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        name: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.create_shopping_list(&params.name).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_shopping_list".to_string(),
        description: Some("Update a shopping list's name".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "list_id": { "type": "string" },
                "name": { "type": "string" }
            },
            "required": ["list_id", "name"]
        }),
    }
}

pub async fn update_shopping_list(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        list_id: String,
        name: String,
    }
    let params: Params = parse_args(args)?;
    // The upstream update is a full PUT; read-modify-write the name.
    let mut current = client.get_shopping_list(&params.list_id).await?;
    current["name"] = Value::String(params.name);
    let result = client
        .update_shopping_list(&params.list_id, &current)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_shopping_list".to_string(),
        description: Some("Delete a shopping list".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "list_id": { "type": "string" }
            },
            "required": ["list_id"]
        }),
    }
}

pub async fn delete_shopping_list(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        list_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_shopping_list(&params.list_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.list_id })))
}

pub fn add_recipe_to_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "add_recipe_to_shopping_list".to_string(),
        description: Some("Add all ingredients from a recipe to a shopping list".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "list_id": { "type": "string" },
                "recipe_id": { "type": "string" },
                "scale": { "type": "number", "default": 1.0 }
            },
            "required": ["list_id", "recipe_id"]
        }),
    }
}

pub async fn add_recipe_to_shopping_list(
    args: Value,
    client: &MealieClient,
) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        list_id: String,
        recipe_id: String,
        #[serde(default = "super::default_scale")]
        scale: f64,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .add_recipe_to_shopping_list(&params.list_id, &params.recipe_id, params.scale)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn remove_recipe_from_shopping_list_def() -> ToolDefinition {
    ToolDefinition {
        name: "remove_recipe_from_shopping_list".to_string(),
        description: Some("Remove a recipe's ingredients from a shopping list".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "list_id": { "type": "string" },
                "recipe_id": { "type": "string" }
            },
            "required": ["list_id", "recipe_id"]
        }),
    }
}

pub async fn remove_recipe_from_shopping_list(
    args: Value,
    client: &MealieClient,
) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        list_id: String,
        recipe_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .remove_recipe_from_shopping_list(&params.list_id, &params.recipe_id)
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_shopping_items_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_shopping_items".to_string(),
        description: Some("Get all shopping items across lists".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 50 }
            }
        }),
    }
}

pub async fn get_shopping_items(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_shopping_items(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_shopping_item_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_shopping_item".to_string(),
        description: Some("Get a specific shopping item by ID".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "item_id": { "type": "string" }
            },
            "required": ["item_id"]
        }),
    }
}

pub async fn get_shopping_item(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        item_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_shopping_item(&params.item_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn add_shopping_item_def() -> ToolDefinition {
    ToolDefinition {
        name: "add_shopping_item".to_string(),
        description: Some("Add an item to a shopping list".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "shopping_list_id": { "type": "string" },
                "note": { "type": "string" },
                "quantity": { "type": "number", "default": 1 },
                "unit": { "type": "string" },
                "checked": { "type": "boolean", "default": false }
            },
            "required": ["shopping_list_id", "note"]
        }),
    }
}

pub async fn add_shopping_item(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        shopping_list_id: String,
        note: String,
        #[serde(default = "super::default_quantity")]
        quantity: f64,
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        checked: bool,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .add_shopping_item(
            &params.shopping_list_id,
            &params.note,
            params.quantity,
            params.unit.as_deref(),
            None,
            params.checked,
        )
        .await?;
    // Mealie returns a change-set wrapper; surface the created item directly
    // when there is exactly one.
    if let Some(created) = result.get("createdItems").and_then(Value::as_array) {
        if created.len() == 1 {
            return Ok(ToolCallResult::json(&created[0]));
        }
    }
    Ok(ToolCallResult::json(&result))
}

pub fn add_shopping_items_bulk_def() -> ToolDefinition {
    ToolDefinition {
        name: "add_shopping_items_bulk".to_string(),
        description: Some("Add multiple shopping items in one request".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": { "type": "object" },
                    "description": "Shopping item objects, each with at least shoppingListId and note"
                }
            },
            "required": ["items"]
        }),
    }
}

pub async fn add_shopping_items_bulk(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        items: Value,
    }
    let params: Params = parse_args(args)?;
    let result = client.add_shopping_items_bulk(&params.items).await?;
    // Normalize the change-set response to the created item list.
    if let Some(created) = result.get("createdItems").and_then(Value::as_array) {
        return Ok(ToolCallResult::json(created));
    }
    Ok(ToolCallResult::json(&result))
}

pub fn update_shopping_item_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_shopping_item".to_string(),
        description: Some("Update a shopping item (mark as checked, change note, etc.)".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "item_id": { "type": "string" },
                "checked": { "type": "boolean" },
                "note": { "type": "string" }
            },
            "required": ["item_id"]
        }),
    }
}

pub async fn update_shopping_item(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        item_id: String,
        #[serde(default)]
        checked: Option<bool>,
        #[serde(default)]
        note: Option<String>,
    }
    let params: Params = parse_args(args)?;
    let mut data = client.get_shopping_item(&params.item_id).await?;
    if let Some(checked) = params.checked {
        data["checked"] = Value::Bool(checked);
    }
    if let Some(note) = params.note {
        data["note"] = Value::String(note);
    }
    let result = client.update_shopping_item(&params.item_id, &data).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_shopping_item_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_shopping_item".to_string(),
        description: Some("Delete a shopping item".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "item_id": { "type": "string" }
            },
            "required": ["item_id"]
        }),
    }
}

pub async fn delete_shopping_item(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        item_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_shopping_item(&params.item_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.item_id })))
}
