use mcp_appium_protocol::{ErrorCode, ErrorResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply from the automation server.
    #[error("Request failed with status code {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("MCP error: {0}")]
    Mcp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

impl SessionError {
    /// Builds a status error, lifting `value.message` out of a WebDriver
    /// error body when the server sent one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("value")
                    .and_then(|value| value.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            });
        SessionError::Status { status, detail }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

impl From<SessionError> for ErrorResponse {
    fn from(error: SessionError) -> Self {
        match &error {
            SessionError::UnknownTool(_) => {
                ErrorResponse::new(ErrorCode::TOOL_NOT_FOUND, error.to_string())
            }
            SessionError::Validation(_) => {
                ErrorResponse::new(ErrorCode::INVALID_TOOL_PARAMS, error.to_string())
            }
            SessionError::Json(_) => {
                ErrorResponse::new(ErrorCode::INVALID_PARAMS, error.to_string())
            }
            SessionError::Http(_) | SessionError::Status { .. } | SessionError::Protocol(_) => {
                ErrorResponse::new(ErrorCode::TOOL_EXECUTION_FAILED, error.to_string())
            }
            _ => ErrorResponse::new(ErrorCode::INTERNAL_ERROR, error.to_string()),
        }
    }
}
