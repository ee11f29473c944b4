use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// JSON Wire Protocol element key.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";
/// W3C WebDriver element key.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Path segment used when the server returned no usable identifier.
pub const MISSING_ELEMENT_SEGMENT: &str = "undefined";

/// Element identifier from a find-element response.
///
/// Servers answer with either the legacy key or the W3C key. The legacy key
/// wins when both are present. A response with neither is not rejected here:
/// the follow-up request goes out with the `undefined` segment and the
/// server's refusal surfaces as an ordinary request error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementReference {
    Legacy(String),
    W3c(String),
    Missing,
}

impl ElementReference {
    pub fn from_value(value: &Value) -> Self {
        let lookup = |key: &str| match value.get(key)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        };

        if let Some(id) = lookup(LEGACY_ELEMENT_KEY) {
            ElementReference::Legacy(id)
        } else if let Some(id) = lookup(W3C_ELEMENT_KEY) {
            ElementReference::W3c(id)
        } else {
            ElementReference::Missing
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ElementReference::Legacy(id) | ElementReference::W3c(id) => Some(id),
            ElementReference::Missing => None,
        }
    }

    pub fn path_segment(&self) -> &str {
        self.id().unwrap_or(MISSING_ELEMENT_SEGMENT)
    }
}

impl<'de> Deserialize<'de> for ElementReference {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ElementReference::from_value(&value))
    }
}
