use super::tools::{CloseSessionKit, StartSessionKit, SwipeKit, TapKit};
use crate::controller::SessionController;
use crate::outcome::ActionOutcome;
use crate::{Result, SessionError};
use async_trait::async_trait;
use jsonschema::Validator;
use mcp_appium_protocol::{ToolCallResult, ToolInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolRequest {
    pub tool_name: String,
    pub params: Value,
}

#[derive(Debug)]
pub struct ToolResponse {
    pub tool_name: String,
    pub outcome: ActionOutcome,
}

impl ToolResponse {
    /// Renders the outcome as MCP text content. Failures keep their text
    /// and additionally set `isError`.
    pub fn into_result(self) -> ToolCallResult {
        ToolCallResult::text(self.outcome.to_string(), self.outcome.is_error())
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// Runs the tool on arguments that already passed schema validation.
    async fn execute(&self, params: Value) -> Result<ActionOutcome>;
    fn schema(&self) -> &ToolSchema;
}

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ToolSchema> for ToolInfo {
    fn from(schema: &ToolSchema) -> Self {
        ToolInfo {
            name: schema.name.clone(),
            description: schema.description.clone(),
            input_schema: schema.parameters.clone(),
        }
    }
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    validator: Arc<Validator>,
}

/// Tool registry and dispatcher in front of a [`SessionController`].
pub struct McpAppiumServer {
    tools: Arc<RwLock<BTreeMap<String, RegisteredTool>>>,
}

impl std::fmt::Debug for McpAppiumServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpAppiumServer")
            .field("tools", &"<tools>")
            .finish()
    }
}

impl McpAppiumServer {
    pub fn new(controller: Arc<SessionController>) -> Result<Self> {
        let server = Self {
            tools: Arc::new(RwLock::new(BTreeMap::new())),
        };

        server.register_tool(Arc::new(StartSessionKit::new(controller.clone())))?;
        server.register_tool(Arc::new(TapKit::new(controller.clone())))?;
        server.register_tool(Arc::new(SwipeKit::new(controller.clone())))?;
        server.register_tool(Arc::new(CloseSessionKit::new(controller)))?;

        Ok(server)
    }

    pub fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<()> {
        let schema = tool.schema();
        let validator = jsonschema::validator_for(&schema.parameters).map_err(|e| {
            SessionError::Mcp(format!("Invalid input schema for tool '{}': {}", schema.name, e))
        })?;
        let name = schema.name.clone();

        let mut tools = self
            .tools
            .write()
            .map_err(|e| SessionError::Mcp(format!("Failed to acquire tool lock: {}", e)))?;
        tools.insert(
            name,
            RegisteredTool {
                tool,
                validator: Arc::new(validator),
            },
        );
        Ok(())
    }

    pub fn get_tool_schemas(&self) -> Result<Vec<ToolSchema>> {
        let tools = self
            .tools
            .read()
            .map_err(|e| SessionError::Mcp(format!("Failed to acquire tool lock: {}", e)))?;
        Ok(tools.values().map(|t| t.tool.schema().clone()).collect())
    }

    /// Validates the arguments against the tool's schema and runs it.
    ///
    /// Unknown tools and schema violations are errors; everything that
    /// happens against the automation server is reported inside the
    /// returned outcome.
    pub async fn call_tool(&self, request: ToolRequest) -> Result<ToolResponse> {
        let tool = {
            let tools = self
                .tools
                .read()
                .map_err(|e| SessionError::Mcp(format!("Failed to acquire tool lock: {}", e)))?;

            let registered = tools
                .get(&request.tool_name)
                .ok_or_else(|| SessionError::UnknownTool(request.tool_name.clone()))?;

            let violations: Vec<String> = registered
                .validator
                .iter_errors(&request.params)
                .map(|e| e.to_string())
                .collect();
            if !violations.is_empty() {
                return Err(SessionError::Validation(format!(
                    "Invalid arguments for '{}': {}",
                    request.tool_name,
                    violations.join("; ")
                )));
            }

            registered.tool.clone()
        };

        debug!(tool = %request.tool_name, "Executing tool");
        let outcome = tool.execute(request.params).await?;

        Ok(ToolResponse {
            tool_name: request.tool_name,
            outcome,
        })
    }
}
