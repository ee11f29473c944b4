use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SWIPE_DURATION_MS: u64 = 800;

/// Desired capabilities for a new session, sent to the server as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub platform_name: String,
    pub device_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_name: Option<String>,
}

impl Capabilities {
    pub fn new(platform_name: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            device_name: device_name.into(),
            app: None,
            automation_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorStrategy {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "accessibility id")]
    AccessibilityId,
    #[serde(rename = "xpath")]
    XPath,
    #[serde(rename = "class name")]
    ClassName,
    #[serde(rename = "name")]
    Name,
}

impl LocatorStrategy {
    pub const ALL: [LocatorStrategy; 5] = [
        LocatorStrategy::Id,
        LocatorStrategy::AccessibilityId,
        LocatorStrategy::XPath,
        LocatorStrategy::ClassName,
        LocatorStrategy::Name,
    ];

    /// The `using` value on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorStrategy::Id => "id",
            LocatorStrategy::AccessibilityId => "accessibility id",
            LocatorStrategy::XPath => "xpath",
            LocatorStrategy::ClassName => "class name",
            LocatorStrategy::Name => "name",
        }
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocatorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocatorStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = LocatorStrategy::ALL.iter().map(|s| s.as_str()).collect();
                format!("invalid locator strategy '{}', expected one of: {}", s, allowed.join(", "))
            })
    }
}

/// Element lookup request, as passed to the `tap` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(rename = "by")]
    pub strategy: LocatorStrategy,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }
}

/// Linear swipe between two screen points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureSpec {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default = "default_duration", deserialize_with = "whole_millis")]
    pub duration: u64,
}

fn default_duration() -> u64 {
    DEFAULT_SWIPE_DURATION_MS
}

/// Accepts any non-negative integral JSON number, so `800.0` reads as 800.
fn whole_millis<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(ms) = number.as_u64() {
        return Ok(ms);
    }
    match number.as_f64() {
        Some(ms) if ms >= 0.0 && ms.fract() == 0.0 && ms <= u64::MAX as f64 => Ok(ms as u64),
        _ => Err(serde::de::Error::custom(format!(
            "invalid duration {}, expected a non-negative whole number of milliseconds",
            number
        ))),
    }
}

impl GestureSpec {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
            duration: DEFAULT_SWIPE_DURATION_MS,
        }
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }
}
