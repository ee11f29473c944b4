use crate::model::GestureSpec;
use serde::{Serialize, Serializer};

/// One step of a `touch/perform` action chain.
///
/// Serializes as `{"action": <name>, "options": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "options")]
pub enum TouchStep {
    #[serde(rename = "press")]
    Press {
        #[serde(serialize_with = "coordinate")]
        x: f64,
        #[serde(serialize_with = "coordinate")]
        y: f64,
    },
    #[serde(rename = "wait")]
    Wait { ms: u64 },
    #[serde(rename = "moveTo")]
    MoveTo {
        #[serde(serialize_with = "coordinate")]
        x: f64,
        #[serde(serialize_with = "coordinate")]
        y: f64,
    },
    #[serde(rename = "release")]
    Release {},
}

// Largest integer an f64 holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole coordinates go out as JSON integers (`100`, not `100.0`).
fn coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Gestures the controller knows how to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Swipe(GestureSpec),
}

impl Gesture {
    /// The ordered touch steps for this gesture. The server executes the
    /// timing; the chain is submitted in one request.
    pub fn steps(&self) -> Vec<TouchStep> {
        match self {
            Gesture::Swipe(spec) => vec![
                TouchStep::Press {
                    x: spec.start_x,
                    y: spec.start_y,
                },
                TouchStep::Wait { ms: spec.duration },
                TouchStep::MoveTo {
                    x: spec.end_x,
                    y: spec.end_y,
                },
                TouchStep::Release {},
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_swipe_choreography_order() {
        let gesture = Gesture::Swipe(GestureSpec::new(10.0, 20.0, 30.0, 40.0).with_duration(250));
        assert_eq!(
            gesture.steps(),
            vec![
                TouchStep::Press { x: 10.0, y: 20.0 },
                TouchStep::Wait { ms: 250 },
                TouchStep::MoveTo { x: 30.0, y: 40.0 },
                TouchStep::Release {},
            ]
        );
    }

    #[test]
    fn test_swipe_wire_encoding() {
        let steps = Gesture::Swipe(GestureSpec::new(100.0, 800.0, 100.0, 200.0)).steps();
        assert_eq!(
            serde_json::to_value(&steps).unwrap(),
            json!([
                {"action": "press", "options": {"x": 100, "y": 800}},
                {"action": "wait", "options": {"ms": 800}},
                {"action": "moveTo", "options": {"x": 100, "y": 200}},
                {"action": "release", "options": {}}
            ])
        );
        let encoded = serde_json::to_string(&steps[0]).unwrap();
        assert_eq!(encoded, r#"{"action":"press","options":{"x":100,"y":800}}"#);
    }

    #[test]
    fn test_fractional_coordinates_keep_their_fraction() {
        let steps = Gesture::Swipe(GestureSpec::new(10.5, -20.0, 30.25, 40.0)).steps();
        assert_eq!(
            serde_json::to_value(&steps[0]).unwrap(),
            json!({"action": "press", "options": {"x": 10.5, "y": -20}})
        );
        assert_eq!(
            serde_json::to_value(&steps[2]).unwrap(),
            json!({"action": "moveTo", "options": {"x": 30.25, "y": 40}})
        );
    }
}
