use crate::error::{CliError, Result};
use mcp_appium_protocol::{
    JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, ToolCallResult, ToolInfo,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// JSON-RPC client for an mcp-appium server on the HTTP transport.
#[derive(Debug)]
pub struct McpClient {
    client: Client,
    endpoint: String,
    request_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct ToolsListResult {
    tools: Vec<ToolInfo>,
}

impl McpClient {
    /// Connects and performs the `initialize` handshake.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let client = Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            request_id: AtomicU64::new(1),
        };

        let init = client
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "mcp-appium-cli",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })),
            )
            .await?;
        debug!(server = %init["serverInfo"]["name"], "MCP session initialized");

        client.notify("notifications/initialized").await?;
        Ok(client)
    }

    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let result = self.request("tools/list", Some(json!({}))).await?;
        let list: ToolsListResult = serde_json::from_value(result)?;
        Ok(list.tools)
    }

    pub async fn call_tool(&self, tool_name: &str, arguments: Value) -> Result<ToolCallResult> {
        debug!(tool = tool_name, arguments = %arguments, "Calling tool");
        let result = self
            .request(
                "tools/call",
                Some(json!({
                    "name": tool_name,
                    "arguments": arguments
                })),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new(id, method, params);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let response: JsonRpcResponse = response.json().await?;

        if let Some(error) = response.error {
            return Err(CliError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response.result.ok_or_else(|| {
            CliError::Protocol(format!("Response to '{}' carried no result", method))
        })
    }

    async fn notify(&self, method: &str) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .json(&JsonRpcRequest::notification(method))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
