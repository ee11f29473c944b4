use clap::Parser;
use mcp_appium_session::mcp::server::McpAppiumServer;
use mcp_appium_session::mcp::transport::{http, stdio};
use mcp_appium_session::{AppiumClient, ServerConfig, SessionController, TransportKind};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // stdout carries JSON-RPC on the stdio transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    let backend = AppiumClient::new(&config.appium_url, config.request_timeout())?;
    info!(appium_url = %backend.base_url(), "Using Appium server");

    let controller = Arc::new(SessionController::new(Arc::new(backend)));
    let server = Arc::new(McpAppiumServer::new(controller)?);

    for schema in server.get_tool_schemas()? {
        info!(tool = %schema.name, "{}", schema.description);
    }

    match config.transport {
        TransportKind::Stdio => stdio::serve_stdio(&server).await?,
        TransportKind::Http => http::serve_http(server, config.listen_addr()?).await,
    }

    Ok(())
}
