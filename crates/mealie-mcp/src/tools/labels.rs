//! Multi-purpose label tools (full profile only).

use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn get_labels_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_labels".to_string(),
        description: Some("Get all multi-purpose labels".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 50 }
            }
        }),
    }
}

pub async fn get_labels(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_labels(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_label_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_label".to_string(),
        description: Some("Get a specific label by ID".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "label_id": { "type": "string" }
            },
            "required": ["label_id"]
        }),
    }
}

pub async fn get_label(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        label_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_label(&params.label_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_label_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_label".to_string(),
        description: Some("Create a new label with optional color (hex format)".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "color": { "type": "string", "default": "#E0E0E0" }
            },
            "required": ["name"]
        }),
    }
}

pub async fn create_label(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        name: String,
        #[serde(default = "super::default_label_color")]
        color: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.create_label(&params.name, &params.color).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_label_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_label".to_string(),
        description: Some("Update a label's name or color".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "label_id": { "type": "string" },
                "name": { "type": "string" },
                "color": { "type": "string" }
            },
            "required": ["label_id"]
        }),
    }
}

pub async fn update_label(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        label_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<String>,
    }
    let params: Params = parse_args(args)?;
    let mut data = client.get_label(&params.label_id).await?;
    if let Some(name) = params.name {
        data["name"] = Value::String(name);
    }
    if let Some(color) = params.color {
        data["color"] = Value::String(color);
    }
    let result = client.update_label(&params.label_id, &data).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_label_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_label".to_string(),
        description: Some("Delete a label".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "label_id": { "type": "string" }
            },
            "required": ["label_id"]
        }),
    }
}

pub async fn delete_label(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        label_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_label(&params.label_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.label_id })))
}
