use crate::client::AutomationBackend;
use crate::gesture::Gesture;
use crate::model::{Capabilities, GestureSpec, Locator};
use crate::outcome::{Action, ActionOutcome, Point};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Owns the single active automation session and sequences the wire
/// requests behind each action.
///
/// The session slot is locked for the whole of an action, so concurrent
/// callers are serialized. Failures never escape as errors: every action
/// resolves to an [`ActionOutcome`].
pub struct SessionController {
    backend: Arc<dyn AutomationBackend>,
    session_id: Mutex<Option<String>>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self {
            backend,
            session_id: Mutex::new(None),
        }
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    /// Creates a session and stores its id, replacing any current one.
    /// The replaced session is not closed on the server.
    pub async fn start_session(&self, capabilities: &Capabilities) -> ActionOutcome {
        let mut slot = self.session_id.lock().await;

        match self.backend.create_session(capabilities).await {
            Ok(session_id) => {
                if let Some(previous) = slot.replace(session_id.clone()) {
                    warn!(
                        previous = %previous,
                        current = %session_id,
                        "Replacing active session without closing it"
                    );
                }
                info!(session_id = %session_id, "Session started");
                ActionOutcome::SessionStarted { session_id }
            }
            Err(e) => {
                warn!(error = %e, "Session creation failed");
                ActionOutcome::failed(Action::StartSession, e)
            }
        }
    }

    /// Finds an element, then clicks it. A failure at either step fails the
    /// whole tap.
    pub async fn tap(&self, locator: &Locator) -> ActionOutcome {
        let slot = self.session_id.lock().await;
        let Some(session_id) = slot.as_deref() else {
            return ActionOutcome::NoActiveSession;
        };

        let element = match self.backend.find_element(session_id, locator).await {
            Ok(element) => element,
            Err(e) => return ActionOutcome::failed(Action::Tap, e),
        };

        match self.backend.click_element(session_id, &element).await {
            Ok(()) => ActionOutcome::ElementTapped,
            Err(e) => ActionOutcome::failed(Action::Tap, e),
        }
    }

    pub async fn swipe(&self, spec: &GestureSpec) -> ActionOutcome {
        let slot = self.session_id.lock().await;
        let Some(session_id) = slot.as_deref() else {
            return ActionOutcome::NoActiveSession;
        };

        let steps = Gesture::Swipe(spec.clone()).steps();
        match self.backend.perform_touch(session_id, &steps).await {
            Ok(()) => ActionOutcome::Swiped {
                from: Point {
                    x: spec.start_x,
                    y: spec.start_y,
                },
                to: Point {
                    x: spec.end_x,
                    y: spec.end_y,
                },
            },
            Err(e) => ActionOutcome::failed(Action::Swipe, e),
        }
    }

    /// Deletes the current session; the slot is cleared only if the server
    /// accepted the deletion.
    pub async fn close_session(&self) -> ActionOutcome {
        let mut slot = self.session_id.lock().await;
        let Some(session_id) = slot.clone() else {
            return ActionOutcome::NoActiveSession;
        };

        match self.backend.delete_session(&session_id).await {
            Ok(()) => {
                *slot = None;
                info!(session_id = %session_id, "Session closed");
                ActionOutcome::SessionClosed { session_id }
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Session deletion failed");
                ActionOutcome::failed(Action::CloseSession, e)
            }
        }
    }
}
