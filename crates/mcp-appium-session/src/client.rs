use crate::element::ElementReference;
use crate::gesture::TouchStep;
use crate::model::{Capabilities, Locator};
use crate::{Result, SessionError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// The wire requests the session controller needs from an automation server.
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    /// `POST /session`; returns the new session id.
    async fn create_session(&self, capabilities: &Capabilities) -> Result<String>;

    /// `POST /session/{id}/element`
    async fn find_element(&self, session_id: &str, locator: &Locator) -> Result<ElementReference>;

    /// `POST /session/{id}/element/{elementId}/click`
    async fn click_element(&self, session_id: &str, element: &ElementReference) -> Result<()>;

    /// `POST /session/{id}/touch/perform`
    async fn perform_touch(&self, session_id: &str, steps: &[TouchStep]) -> Result<()>;

    /// `DELETE /session/{id}`
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct FindElementRequest<'a> {
    using: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct TouchPerformRequest<'a> {
    actions: &'a [TouchStep],
}

#[derive(Debug, Deserialize)]
struct FindElementResponse {
    #[serde(default = "missing_element")]
    value: ElementReference,
}

fn missing_element() -> ElementReference {
    ElementReference::Missing
}

/// HTTP client for an Appium server speaking the JSON Wire / W3C protocol.
pub struct AppiumClient {
    client: Client,
    base_url: String,
}

impl AppiumClient {
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self> {
        reqwest::Url::parse(base_url).map_err(|e| {
            SessionError::Config(format!("Invalid automation server URL '{}': {}", base_url, e))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SessionError::from_status(status.as_u16(), &body))
}

/// Session id from a new-session reply: top level for JSON Wire servers,
/// under `value` for W3C servers.
fn session_id_from(body: &Value) -> Option<String> {
    body.get("sessionId")
        .or_else(|| body.get("value").and_then(|v| v.get("sessionId")))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AutomationBackend for AppiumClient {
    async fn create_session(&self, capabilities: &Capabilities) -> Result<String> {
        let payload = json!({
            "capabilities": {
                "firstMatch": [{}],
                "alwaysMatch": capabilities,
            }
        });

        debug!(
            platform = %capabilities.platform_name,
            device = %capabilities.device_name,
            "Creating session"
        );
        let response = self
            .client
            .post(self.url("/session"))
            .json(&payload)
            .send()
            .await?;
        let body: Value = check_status(response).await?.json().await?;

        session_id_from(&body).ok_or_else(|| {
            SessionError::Protocol("New session response did not contain a sessionId".to_string())
        })
    }

    async fn find_element(&self, session_id: &str, locator: &Locator) -> Result<ElementReference> {
        let request = FindElementRequest {
            using: locator.strategy.as_str(),
            value: &locator.value,
        };

        debug!(session_id, using = request.using, value = request.value, "Finding element");
        let response = self
            .client
            .post(self.url(&format!("/session/{}/element", session_id)))
            .json(&request)
            .send()
            .await?;
        let found: FindElementResponse = check_status(response).await?.json().await?;
        Ok(found.value)
    }

    async fn click_element(&self, session_id: &str, element: &ElementReference) -> Result<()> {
        debug!(session_id, element = element.path_segment(), "Clicking element");
        let response = self
            .client
            .post(self.url(&format!(
                "/session/{}/element/{}/click",
                session_id,
                element.path_segment()
            )))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn perform_touch(&self, session_id: &str, steps: &[TouchStep]) -> Result<()> {
        debug!(session_id, steps = steps.len(), "Performing touch action");
        let response = self
            .client
            .post(self.url(&format!("/session/{}/touch/perform", session_id)))
            .json(&TouchPerformRequest { actions: steps })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        debug!(session_id, "Deleting session");
        let response = self
            .client
            .delete(self.url(&format!("/session/{}", session_id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
