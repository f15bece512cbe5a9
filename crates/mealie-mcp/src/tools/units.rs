//! Measurement unit tools.

use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

pub fn get_units_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_units".to_string(),
        description: Some("Get all measurement units".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer", "default": 1 },
                "per_page": { "type": "integer", "default": 50 }
            }
        }),
    }
}

pub async fn get_units(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        #[serde(default = "super::default_page")]
        page: u32,
        #[serde(default = "super::default_per_page")]
        per_page: u32,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_units(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_unit_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_unit".to_string(),
        description: Some("Get a specific unit by ID".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "unit_id": { "type": "string" }
            },
            "required": ["unit_id"]
        }),
    }
}

pub async fn get_unit(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        unit_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_unit(&params.unit_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_unit_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_unit".to_string(),
        description: Some("Create a new measurement unit".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "abbreviation": { "type": "string", "default": "" },
                "fraction": { "type": "boolean", "default": true }
            },
            "required": ["name"]
        }),
    }
}

pub async fn create_unit(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        name: String,
        #[serde(default)]
        abbreviation: String,
        #[serde(default = "super::default_true")]
        fraction: bool,
    }
    let params: Params = parse_args(args)?;
    let unit = client
        .create_unit(&params.name, &params.abbreviation, params.fraction)
        .await?;
    Ok(ToolCallResult::json(&unit))
}

pub fn update_unit_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_unit".to_string(),
        description: Some("Update a unit's name or abbreviation".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "unit_id": { "type": "string" },
                "name": { "type": "string" },
                "abbreviation": { "type": "string" }
            },
            "required": ["unit_id"]
        }),
    }
}

pub async fn update_unit(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        unit_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        abbreviation: Option<String>,
    }
    let params: Params = parse_args(args)?;
    let mut data = client.get_unit(&params.unit_id).await?;
    if let Some(name) = params.name {
        data["name"] = Value::String(name);
    }
    if let Some(abbreviation) = params.abbreviation {
        data["abbreviation"] = Value::String(abbreviation);
    }
    let result = client.update_unit(&params.unit_id, &data).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_unit_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_unit".to_string(),
        description: Some("Delete a unit".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "unit_id": { "type": "string" }
            },
            "required": ["unit_id"]
        }),
    }
}

pub async fn delete_unit(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        unit_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_unit(&params.unit_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.unit_id })))
}

pub fn merge_units_def() -> ToolDefinition {
    ToolDefinition {
        name: "merge_units".to_string(),
        description: Some(
            "Merge one unit into another. All references to from_unit become to_unit".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "from_unit_id": { "type": "string" },
                "to_unit_id": { "type": "string" }
            },
            "required": ["from_unit_id", "to_unit_id"]
        }),
    }
}

pub async fn merge_units(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        from_unit_id: String,
        to_unit_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .merge_units(&params.from_unit_id, &params.to_unit_id)
        .await?;
    Ok(ToolCallResult::json(&result))
}
