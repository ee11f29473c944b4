use crate::{Result, SessionError};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_APPIUM_URL: &str = "http://127.0.0.1:4723/wd/hub";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportKind {
    /// Line-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// JSON-RPC over `POST /mcp`
    Http,
}

/// Server settings. Flags override environment variables, which override
/// the defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-appium-server")]
#[command(about = "MCP server exposing Appium session, tap and swipe tools")]
#[command(version)]
pub struct ServerConfig {
    /// Base URL of the Appium server
    #[arg(long, env = "APPIUM_URL", default_value = DEFAULT_APPIUM_URL)]
    pub appium_url: String,

    /// Transport the MCP server listens on
    #[arg(long, env = "MCP_APPIUM_TRANSPORT", value_enum, default_value_t = TransportKind::Stdio)]
    pub transport: TransportKind,

    /// Listen address for the HTTP transport
    #[arg(long, env = "MCP_APPIUM_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Per-request timeout towards the Appium server; no timeout when unset
    #[arg(long = "timeout-secs", env = "MCP_APPIUM_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            appium_url: DEFAULT_APPIUM_URL.to_string(),
            transport: TransportKind::default(),
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            SessionError::Config(format!("Invalid listen address '{}': {}", self.listen, e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.appium_url).map_err(|e| {
            SessionError::Config(format!("Invalid Appium URL '{}': {}", self.appium_url, e))
        })?;
        if self.transport == TransportKind::Http {
            self.listen_addr()?;
        }
        Ok(())
    }
}
