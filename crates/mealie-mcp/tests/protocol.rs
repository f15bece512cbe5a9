//! Protocol-level integration tests: handshake, listing, dispatch, and
//! profile gating. No network — nothing here reaches a live instance.

use std::sync::Arc;

use serde_json::{json, Value};

use mealie_client::MealieClient;
use mealie_mcp::config::Profile;
use mealie_mcp::protocol::ProtocolHandler;
use mealie_mcp::tools::registry::TOOLS;
use mealie_mcp::tools::ToolRegistry;
use mealie_mcp::transport::framing;
use mealie_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

fn handler(profile: Profile) -> ProtocolHandler {
    // The URL is never contacted by these tests.
    let client = MealieClient::new("http://localhost:9", "test-token").unwrap();
    ProtocolHandler::new(ToolRegistry::new(Arc::new(client), profile))
}

fn request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn init_request() -> Value {
    request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }),
    )
}

async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

fn error_code(response: &Value) -> i64 {
    response["error"]["code"].as_i64().expect("expected error")
}

fn listed_tool_names(response: &Value) -> Vec<String> {
    response["result"]["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────── handshake ───────────────────────

#[tokio::test]
async fn initialize_reports_server_info() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(&handler, init_request()).await;

    assert_eq!(response["result"]["serverInfo"]["name"], "mealie-mcp");
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert!(response["result"]["instructions"]
        .as_str()
        .unwrap()
        .contains("Mealie"));
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn initialize_tolerates_version_mismatch() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        request(
            1,
            "initialize",
            json!({
                "protocolVersion": "1999-01-01",
                "capabilities": {},
                "clientInfo": { "name": "old-client", "version": "0.1" }
            }),
        ),
    )
    .await;

    // The server answers with its own version rather than failing.
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn initialize_without_params_is_invalid() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }),
    )
    .await;
    assert_eq!(error_code(&response), -32602);
}

#[tokio::test]
async fn initialized_notification_produces_no_response() {
    let handler = handler(Profile::Full);
    let none = send(
        &handler,
        json!({ "jsonrpc": "2.0", "method": "initialized" }),
    )
    .await;
    assert!(none.is_none());
}

#[tokio::test]
async fn ping_returns_empty_object() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(&handler, request(7, "ping", json!({}))).await;
    assert_eq!(response["result"], json!({}));
}

// ─────────────────────── listing & profiles ───────────────────────

#[tokio::test]
async fn full_profile_lists_every_registered_tool() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(&handler, request(2, "tools/list", json!({}))).await;

    let names = listed_tool_names(&response);
    assert_eq!(names.len(), TOOLS.len());
    assert!(names.contains(&"formalize_recipe_ingredients".to_string()));
    assert!(names.contains(&"get_labels".to_string()));
}

#[tokio::test]
async fn core_profile_hides_labels_and_helper_lookups() {
    let handler = handler(Profile::Core);
    let response = send_unwrap(&handler, request(2, "tools/list", json!({}))).await;

    let names = listed_tool_names(&response);
    assert!(names.len() < TOOLS.len());
    assert!(!names.contains(&"get_labels".to_string()));
    assert!(!names.contains(&"get_empty_categories".to_string()));
    assert!(names.contains(&"formalize_recipe_ingredients".to_string()));
    assert!(names.contains(&"get_recipes".to_string()));
}

#[tokio::test]
async fn gated_tool_is_not_found_under_core() {
    let handler = handler(Profile::Core);
    let response = send_unwrap(
        &handler,
        request(
            3,
            "tools/call",
            json!({ "name": "get_labels", "arguments": {} }),
        ),
    )
    .await;
    assert_eq!(error_code(&response), -32803);
}

// ─────────────────────── dispatch errors ───────────────────────

#[tokio::test]
async fn unknown_method_is_rejected() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(&handler, request(4, "resources/list", json!({}))).await;
    assert_eq!(error_code(&response), -32601);
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_rejected() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        json!({ "jsonrpc": "1.0", "id": 5, "method": "ping" }),
    )
    .await;
    assert_eq!(error_code(&response), -32600);
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        request(
            6,
            "tools/call",
            json!({ "name": "launch_missiles", "arguments": {} }),
        ),
    )
    .await;
    assert_eq!(error_code(&response), -32803);
}

#[tokio::test]
async fn missing_required_arguments_are_invalid_params() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        request(
            8,
            "tools/call",
            json!({ "name": "parse_ingredient", "arguments": {} }),
        ),
    )
    .await;
    assert_eq!(error_code(&response), -32602);
}

#[tokio::test]
async fn malformed_date_is_invalid_params() {
    let handler = handler(Profile::Full);
    let response = send_unwrap(
        &handler,
        request(
            9,
            "tools/call",
            json!({
                "name": "set_recipe_last_made",
                "arguments": { "slug": "pie", "date": "last tuesday" }
            }),
        ),
    )
    .await;
    assert_eq!(error_code(&response), -32602);
}

// ─────────────────────── framing ───────────────────────

#[test]
fn malformed_json_is_a_parse_error() {
    let err = framing::parse_message(r#"{"broken":"#).unwrap_err();
    assert_eq!(err.code(), -32700);
}

#[test]
fn empty_line_is_a_parse_error() {
    let err = framing::parse_message("   ").unwrap_err();
    assert_eq!(err.code(), -32700);
}

#[test]
fn frame_message_appends_newline() {
    let framed = framing::frame_message(&json!({ "ok": true })).unwrap();
    assert!(framed.ends_with('\n'));
    let reparsed: Value = serde_json::from_str(framed.trim()).unwrap();
    assert_eq!(reparsed["ok"], true);
}
