//! JSON-RPC method dispatch shared by the stdio and HTTP transports.

use super::server::{McpAppiumServer, ToolRequest};
use mcp_appium_protocol::{
    ErrorCode, ErrorResponse, JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    ToolInfo,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const SERVER_NAME: &str = "MCP Appium JSONWire";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Handles one raw JSON-RPC message. Returns `None` for notifications.
pub async fn handle_message(server: &McpAppiumServer, raw: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Discarding unparseable JSON-RPC message");
            return Some(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(ErrorCode::PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(server, request).await,
        Err(e) => Some(JsonRpcResponse::failure(
            id,
            JsonRpcError::new(ErrorCode::INVALID_REQUEST, format!("Invalid request: {}", e)),
        )),
    }
}

pub async fn handle_request(
    server: &McpAppiumServer,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    let Some(id) = request.id else {
        if request.method.starts_with("notifications/") {
            debug!(method = %request.method, "Notification received");
        } else {
            warn!(method = %request.method, "Request without an id dropped unanswered");
        }
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result()),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => match server.get_tool_schemas() {
            Ok(schemas) => {
                let tools: Vec<ToolInfo> = schemas.iter().map(ToolInfo::from).collect();
                JsonRpcResponse::success(id, json!({ "tools": tools }))
            }
            Err(e) => JsonRpcResponse::failure(id, ErrorResponse::from(e)),
        },
        "tools/call" => call_tool(server, id, request.params).await,
        other => JsonRpcResponse::failure(
            id,
            JsonRpcError::new(ErrorCode::METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        ),
    };

    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        },
        "capabilities": {
            "tools": {}
        }
    })
}

async fn call_tool(server: &McpAppiumServer, id: Value, params: Option<Value>) -> JsonRpcResponse {
    let params = match params.map(serde_json::from_value::<ToolCallParams>) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return JsonRpcResponse::failure(
                id,
                JsonRpcError::new(ErrorCode::INVALID_PARAMS, format!("Invalid params: {}", e)),
            );
        }
        None => {
            return JsonRpcResponse::failure(
                id,
                JsonRpcError::new(ErrorCode::INVALID_PARAMS, "Invalid params: params required"),
            );
        }
    };

    let request = ToolRequest {
        tool_name: params.name,
        params: params.arguments.unwrap_or_else(|| json!({})),
    };

    match server.call_tool(request).await {
        Ok(response) => {
            debug!(
                tool = %response.tool_name,
                is_error = response.outcome.is_error(),
                "Tool call finished"
            );
            match serde_json::to_value(response.into_result()) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(
                        ErrorCode::INTERNAL_ERROR,
                        format!("Failed to encode result: {}", e),
                    ),
                ),
            }
        }
        Err(e) => {
            warn!(error = %e, "Tool call rejected");
            JsonRpcResponse::failure(id, ErrorResponse::from(e))
        }
    }
}
