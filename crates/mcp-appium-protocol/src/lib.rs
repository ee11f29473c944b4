pub mod error_codes;
pub mod jsonrpc;
pub mod schema;
pub mod tool;

pub use error_codes::{ErrorCode, ErrorResponse};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
pub use tool::{Content, ToolCallResult, ToolInfo};

/// MCP protocol revision spoken by both the server and the CLI client.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
