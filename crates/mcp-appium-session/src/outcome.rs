use std::fmt;

/// The four controller actions, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartSession,
    Tap,
    Swipe,
    CloseSession,
}

impl Action {
    fn error_prefix(&self) -> &'static str {
        match self {
            Action::StartSession => "Error starting session",
            Action::Tap => "Error tapping element",
            Action::Swipe => "Error swiping",
            Action::CloseSession => "Error closing session",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Result of a controller action.
///
/// `Display` gives the text callers see. `NoActiveSession` is a normal
/// result, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    SessionStarted { session_id: String },
    ElementTapped,
    Swiped { from: Point, to: Point },
    SessionClosed { session_id: String },
    NoActiveSession,
    Failed { action: Action, message: String },
}

impl ActionOutcome {
    pub fn failed(action: Action, error: impl fmt::Display) -> Self {
        ActionOutcome::Failed {
            action,
            message: error.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ActionOutcome::Failed { .. })
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::SessionStarted { session_id } => {
                write!(f, "Session started: {}", session_id)
            }
            ActionOutcome::ElementTapped => f.write_str("Element tapped"),
            ActionOutcome::Swiped { from, to } => write!(f, "Swiped from {} to {}", from, to),
            ActionOutcome::SessionClosed { session_id } => {
                write!(f, "Session {} closed", session_id)
            }
            ActionOutcome::NoActiveSession => f.write_str("No active session"),
            ActionOutcome::Failed { action, message } => {
                write!(f, "{}: {}", action.error_prefix(), message)
            }
        }
    }
}
