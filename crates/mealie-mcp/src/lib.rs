//! Mealie MCP Server — recipe management tools for AI agents.

pub mod config;
pub mod protocol;
pub mod repl;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::Profile;
pub use protocol::ProtocolHandler;
pub use tools::ToolRegistry;
pub use transport::StdioTransport;
