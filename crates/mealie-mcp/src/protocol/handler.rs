//! Request dispatcher — routes incoming JSON-RPC messages to handlers.

use tokio::sync::Mutex;

use serde_json::Value;

use crate::tools::ToolRegistry;
use crate::types::*;

#[derive(Default)]
struct Handshake {
    client_info: Option<Implementation>,
    initialized: bool,
}

/// Dispatches incoming JSON-RPC messages for one server instance.
pub struct ProtocolHandler {
    registry: ToolRegistry,
    handshake: Mutex<Handshake>,
}

impl ProtocolHandler {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            handshake: Mutex::new(Handshake::default()),
        }
    }

    /// Handle one message. Requests produce a response value; notifications
    /// and anything unexpected produce none.
    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(request) => Some(self.handle_request(request).await),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification).await;
                None
            }
            _ => {
                tracing::warn!("Received unexpected message type from client");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        if let Err(e) = validate_request(&request) {
            return serde_json::to_value(e.to_json_rpc_error(request.id)).unwrap_or_default();
        }

        let id = request.id.clone();
        match self.dispatch_request(&request).await {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)).unwrap_or_default(),
            Err(e) => serde_json::to_value(e.to_json_rpc_error(id)).unwrap_or_default(),
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params.clone()).await,
            "shutdown" => {
                tracing::info!("Shutdown requested");
                Ok(Value::Object(serde_json::Map::new()))
            }
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params.clone()).await,
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" | "notifications/initialized" => {
                let mut handshake = self.handshake.lock().await;
                handshake.initialized = true;
                tracing::info!("MCP handshake complete");
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                // No cancellation propagation: in-flight calls run to completion.
                tracing::info!("Received cancellation notification");
            }
            other => {
                tracing::debug!("Unknown notification: {other}");
            }
        }
    }

    async fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let init_params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::InvalidParams(e.to_string()))?
            .ok_or_else(|| McpError::InvalidParams("Initialize params required".to_string()))?;

        if init_params.protocol_version != MCP_VERSION {
            tracing::warn!(
                "Client requested protocol version {}, server supports {MCP_VERSION}. \
                 Proceeding with server version.",
                init_params.protocol_version
            );
        }
        tracing::info!(
            "Initializing for client: {} v{}",
            init_params.client_info.name,
            init_params.client_info.version
        );

        let mut handshake = self.handshake.lock().await;
        handshake.client_info = Some(init_params.client_info);

        serde_json::to_value(InitializeResult::default_result())
            .map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::InvalidParams(e.to_string()))?
            .ok_or_else(|| McpError::InvalidParams("Tool call params required".to_string()))?;

        tracing::debug!(tool = %call_params.name, "tool call");
        let result = self
            .registry
            .call(&call_params.name, call_params.arguments)
            .await?;

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}

/// Validate that a request is well-formed JSON-RPC 2.0.
fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }
    if request.method.is_empty() {
        return Err(McpError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }
    Ok(())
}
