//! Session-bound translation of MCP tool calls into Appium WebDriver requests.
//!
//! A [`SessionController`] owns the single active automation session and
//! sequences the wire requests behind each action; [`mcp`] exposes the
//! controller's actions as MCP tools over stdio or HTTP.

pub mod client;
pub mod config;
pub mod controller;
pub mod element;
pub mod error;
pub mod gesture;
pub mod mcp;
pub mod model;
pub mod outcome;

pub use client::{AppiumClient, AutomationBackend};
pub use config::{ServerConfig, TransportKind};
pub use controller::SessionController;
pub use element::ElementReference;
pub use error::{Result, SessionError};
pub use gesture::{Gesture, TouchStep};
pub use model::{Capabilities, GestureSpec, Locator, LocatorStrategy, DEFAULT_SWIPE_DURATION_MS};
pub use outcome::{Action, ActionOutcome, Point};
