//! MCP tool implementations, grouped by upstream domain.

pub mod foods;
pub mod labels;
pub mod organizers;
pub mod parser;
pub mod recipes;
pub mod registry;
pub mod shopping;
pub mod units;

pub use registry::ToolRegistry;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{McpError, McpResult};

/// Deserialize tool-call arguments, mapping failures to invalid-params.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> McpResult<T> {
    serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page_small() -> u32 {
    20
}

pub(crate) fn default_per_page() -> u32 {
    50
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_scale() -> f64 {
    1.0
}

pub(crate) fn default_quantity() -> f64 {
    1.0
}

pub(crate) fn default_label_color() -> String {
    "#E0E0E0".to_string()
}
