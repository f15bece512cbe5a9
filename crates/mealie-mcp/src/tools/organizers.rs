//! Organizer tools: categories, tags, and kitchen equipment.

use std::collections::{HashMap, HashSet};

use mealie_client::MealieClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::parse_args;

fn listing_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page": { "type": "integer", "default": 1 },
            "per_page": { "type": "integer", "default": 50 }
        }
    })
}

fn id_schema(field: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: { "type": "string" }
        },
        "required": [field]
    })
}

fn named_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" }
        },
        "required": ["name"]
    })
}

fn rename_schema(field: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: { "type": "string" },
            "name": { "type": "string" }
        },
        "required": [field, "name"]
    })
}

#[derive(Deserialize)]
struct ListingParams {
    #[serde(default = "super::default_page")]
    page: u32,
    #[serde(default = "super::default_per_page")]
    per_page: u32,
}

#[derive(Deserialize)]
struct SlugParams {
    slug: String,
}

#[derive(Deserialize)]
struct NamedParams {
    name: String,
}

// ------------------------------------------------------------------
// Categories
// ------------------------------------------------------------------

pub fn get_categories_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_categories".to_string(),
        description: Some("Get all recipe categories".to_string()),
        input_schema: listing_schema(),
    }
}

pub async fn get_categories(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: ListingParams = parse_args(args)?;
    let result = client.get_categories(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_category_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_category".to_string(),
        description: Some("Get a specific category by ID".to_string()),
        input_schema: id_schema("category_id"),
    }
}

pub async fn get_category(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        category_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_category(&params.category_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_category_by_slug_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_category_by_slug".to_string(),
        description: Some("Get a category by slug".to_string()),
        input_schema: id_schema("slug"),
    }
}

pub async fn get_category_by_slug(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: SlugParams = parse_args(args)?;
    let result = client.get_category_by_slug(&params.slug).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_empty_categories_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_empty_categories".to_string(),
        description: Some("Get categories that currently have no recipes".to_string()),
        input_schema: json!({ "type": "object", "properties": {} }),
    }
}

pub async fn get_empty_categories(_args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let result = client.get_empty_categories().await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_category_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_category".to_string(),
        description: Some("Create a new recipe category".to_string()),
        input_schema: named_schema(),
    }
}

pub async fn create_category(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: NamedParams = parse_args(args)?;
    let result = client.create_category(&params.name).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_category_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_category".to_string(),
        description: Some("Update a category's name".to_string()),
        input_schema: rename_schema("category_id"),
    }
}

pub async fn update_category(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        category_id: String,
        name: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .update_category(&params.category_id, &json!({ "name": params.name }))
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_category_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_category".to_string(),
        description: Some("Delete a category".to_string()),
        input_schema: id_schema("category_id"),
    }
}

pub async fn delete_category(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        category_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_category(&params.category_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.category_id })))
}

// ------------------------------------------------------------------
// Tags
// ------------------------------------------------------------------

pub fn get_tags_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tags".to_string(),
        description: Some("Get all recipe tags".to_string()),
        input_schema: listing_schema(),
    }
}

pub async fn get_tags(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: ListingParams = parse_args(args)?;
    let result = client.get_tags(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_tag_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tag".to_string(),
        description: Some("Get a specific tag by ID".to_string()),
        input_schema: id_schema("tag_id"),
    }
}

pub async fn get_tag(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tag_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_tag(&params.tag_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_tag_by_slug_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tag_by_slug".to_string(),
        description: Some("Get a tag by slug".to_string()),
        input_schema: id_schema("slug"),
    }
}

pub async fn get_tag_by_slug(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: SlugParams = parse_args(args)?;
    let result = client.get_tag_by_slug(&params.slug).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_empty_tags_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_empty_tags".to_string(),
        description: Some("Get tags that currently have no recipes".to_string()),
        input_schema: json!({ "type": "object", "properties": {} }),
    }
}

pub async fn get_empty_tags(_args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let result = client.get_empty_tags().await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_tag_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_tag".to_string(),
        description: Some("Create a new recipe tag".to_string()),
        input_schema: named_schema(),
    }
}

pub async fn create_tag(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: NamedParams = parse_args(args)?;
    let result = client.create_tag(&params.name).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_tag_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_tag".to_string(),
        description: Some("Update a tag's name".to_string()),
        input_schema: rename_schema("tag_id"),
    }
}

pub async fn update_tag(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tag_id: String,
        name: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .update_tag(&params.tag_id, &json!({ "name": params.name }))
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_tag_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_tag".to_string(),
        description: Some("Delete a tag".to_string()),
        input_schema: id_schema("tag_id"),
    }
}

pub async fn delete_tag(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tag_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_tag(&params.tag_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.tag_id })))
}

// ------------------------------------------------------------------
// Kitchen tools
// ------------------------------------------------------------------

pub fn get_tools_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tools".to_string(),
        description: Some("Get all kitchen tools/equipment".to_string()),
        input_schema: listing_schema(),
    }
}

pub async fn get_tools(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: ListingParams = parse_args(args)?;
    let result = client.get_tools(params.page, params.per_page).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn get_tool_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tool".to_string(),
        description: Some("Get a specific tool by ID".to_string()),
        input_schema: id_schema("tool_id"),
    }
}

pub async fn get_tool(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tool_id: String,
    }
    let params: Params = parse_args(args)?;
    let result = client.get_tool(&params.tool_id).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn create_tool_def() -> ToolDefinition {
    ToolDefinition {
        name: "create_tool".to_string(),
        description: Some("Create a new kitchen tool".to_string()),
        input_schema: named_schema(),
    }
}

pub async fn create_tool(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: NamedParams = parse_args(args)?;
    let result = client.create_tool(&params.name).await?;
    Ok(ToolCallResult::json(&result))
}

pub fn update_tool_def() -> ToolDefinition {
    ToolDefinition {
        name: "update_tool".to_string(),
        description: Some("Update a tool's name".to_string()),
        input_schema: rename_schema("tool_id"),
    }
}

pub async fn update_tool(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tool_id: String,
        name: String,
    }
    let params: Params = parse_args(args)?;
    let result = client
        .update_tool(&params.tool_id, &json!({ "name": params.name }))
        .await?;
    Ok(ToolCallResult::json(&result))
}

pub fn delete_tool_def() -> ToolDefinition {
    ToolDefinition {
        name: "delete_tool".to_string(),
        description: Some("Delete a tool".to_string()),
        input_schema: id_schema("tool_id"),
    }
}

pub async fn delete_tool(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        tool_id: String,
    }
    let params: Params = parse_args(args)?;
    client.delete_tool(&params.tool_id).await?;
    Ok(ToolCallResult::json(&json!({ "status": "deleted", "id": params.tool_id })))
}

pub fn set_recipe_tools_def() -> ToolDefinition {
    ToolDefinition {
        name: "set_recipe_tools".to_string(),
        description: Some(
            "Set recipe tools using IDs and/or names, handling Mealie's full-tool-object requirement"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "slug": { "type": "string" },
                "tool_ids": { "type": "array", "items": { "type": "string" } },
                "tool_names": { "type": "array", "items": { "type": "string" } },
                "create_missing_tools": { "type": "boolean", "default": false }
            },
            "required": ["slug"]
        }),
    }
}

pub async fn set_recipe_tools(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    #[derive(Deserialize)]
    struct Params {
        slug: String,
        #[serde(default)]
        tool_ids: Vec<String>,
        #[serde(default)]
        tool_names: Vec<String>,
        #[serde(default)]
        create_missing_tools: bool,
    }
    let params: Params = parse_args(args)?;

    fn tool_payload(tool: &Value) -> Value {
        json!({
            "id": tool.get("id"),
            "name": tool.get("name"),
            "slug": tool.get("slug"),
            "groupId": tool.get("groupId"),
        })
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut selected: Vec<Value> = Vec::new();

    for tool_id in &params.tool_ids {
        let tool = client.get_tool(tool_id).await?;
        if let Some(id) = tool.get("id").and_then(Value::as_str) {
            if seen.insert(id.to_string()) {
                selected.push(tool_payload(&tool));
            }
        }
    }

    if !params.tool_names.is_empty() {
        let tools_page = client.get_tools(1, 250).await?;
        let mut by_name: HashMap<String, Value> = HashMap::new();
        for tool in tools_page
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
        {
            let name = tool
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_lowercase();
            if !name.is_empty() {
                by_name.insert(name, tool);
            }
        }

        for raw_name in &params.tool_names {
            let trimmed = raw_name.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = trimmed.to_lowercase();
            let tool = match by_name.get(&key) {
                Some(tool) => Some(tool.clone()),
                None if params.create_missing_tools => {
                    let created = client.create_tool(trimmed).await?;
                    by_name.insert(key, created.clone());
                    Some(created)
                }
                None => None,
            };
            if let Some(tool) = tool {
                if let Some(id) = tool.get("id").and_then(Value::as_str) {
                    if seen.insert(id.to_string()) {
                        selected.push(tool_payload(&tool));
                    }
                }
            }
        }
    }

    let tool_count = selected.len();
    client
        .patch_recipe_fields(&params.slug, &json!({ "tools": selected }))
        .await?;
    Ok(ToolCallResult::json(&json!({
        "status": "ok",
        "slug": params.slug,
        "tool_count": tool_count,
    })))
}

pub fn get_tool_by_slug_def() -> ToolDefinition {
    ToolDefinition {
        name: "get_tool_by_slug".to_string(),
        description: Some("Get a tool by slug".to_string()),
        input_schema: id_schema("slug"),
    }
}

pub async fn get_tool_by_slug(args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    let params: SlugParams = parse_args(args)?;
    let result = client.get_tool_by_slug(&params.slug).await?;
    Ok(ToolCallResult::json(&result))
}
