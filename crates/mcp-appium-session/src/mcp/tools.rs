use super::server::{Tool, ToolSchema};
use crate::Result;
use crate::controller::SessionController;
use crate::model::{Capabilities, GestureSpec, Locator};
use crate::outcome::ActionOutcome;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct StartSessionKit {
    schema: ToolSchema,
    controller: Arc<SessionController>,
}

#[derive(Debug, Deserialize)]
struct StartSessionArgs {
    capabilities: Capabilities,
}

impl StartSessionKit {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            schema: ToolSchema {
                name: "start_session".to_string(),
                description: "Start Appium session with capabilities".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "capabilities": {
                            "type": "object",
                            "properties": {
                                "platformName": {"type": "string"},
                                "deviceName": {"type": "string"},
                                "app": {"type": "string"},
                                "automationName": {"type": "string"}
                            },
                            "required": ["platformName", "deviceName"]
                        }
                    },
                    "required": ["capabilities"]
                }),
            },
            controller,
        }
    }
}

#[async_trait]
impl Tool for StartSessionKit {
    async fn execute(&self, params: Value) -> Result<ActionOutcome> {
        let args: StartSessionArgs = serde_json::from_value(params)?;
        Ok(self.controller.start_session(&args.capabilities).await)
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct TapKit {
    schema: ToolSchema,
    controller: Arc<SessionController>,
}

impl TapKit {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            schema: ToolSchema {
                name: "tap".to_string(),
                description: "Tap element by locator".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "by": {
                            "type": "string",
                            "enum": ["id", "accessibility id", "xpath", "class name", "name"],
                            "description": "Locator strategy"
                        },
                        "value": {
                            "type": "string",
                            "description": "Locator value"
                        }
                    },
                    "required": ["by", "value"]
                }),
            },
            controller,
        }
    }
}

#[async_trait]
impl Tool for TapKit {
    async fn execute(&self, params: Value) -> Result<ActionOutcome> {
        let locator: Locator = serde_json::from_value(params)?;
        Ok(self.controller.tap(&locator).await)
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct SwipeKit {
    schema: ToolSchema,
    controller: Arc<SessionController>,
}

impl SwipeKit {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            schema: ToolSchema {
                name: "swipe".to_string(),
                description: "Swipe from start to end coordinates".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "startX": {"type": "number"},
                        "startY": {"type": "number"},
                        "endX": {"type": "number"},
                        "endY": {"type": "number"},
                        "duration": {
                            "type": "integer",
                            "minimum": 0,
                            "description": "Gesture duration in milliseconds (default 800)"
                        }
                    },
                    "required": ["startX", "startY", "endX", "endY"]
                }),
            },
            controller,
        }
    }
}

#[async_trait]
impl Tool for SwipeKit {
    async fn execute(&self, params: Value) -> Result<ActionOutcome> {
        let spec: GestureSpec = serde_json::from_value(params)?;
        Ok(self.controller.swipe(&spec).await)
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct CloseSessionKit {
    schema: ToolSchema,
    controller: Arc<SessionController>,
}

impl CloseSessionKit {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            schema: ToolSchema {
                name: "close_session".to_string(),
                description: "Close the current Appium session".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            controller,
        }
    }
}

#[async_trait]
impl Tool for CloseSessionKit {
    async fn execute(&self, _params: Value) -> Result<ActionOutcome> {
        Ok(self.controller.close_session().await)
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}
