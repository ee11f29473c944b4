use crate::mcp::rpc;
use crate::mcp::server::McpAppiumServer;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Reply};

/// `POST /mcp` with one JSON-RPC message per request body. Notifications
/// are acknowledged with `202 Accepted` and no body.
pub fn routes(
    server: Arc<McpAppiumServer>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path("mcp")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(warp::any().map(move || server.clone()))
        .and_then(handle_post)
}

async fn handle_post(
    body: Bytes,
    server: Arc<McpAppiumServer>,
) -> Result<warp::reply::Response, Infallible> {
    let raw = String::from_utf8_lossy(&body);
    let reply = match rpc::handle_message(&server, &raw).await {
        Some(response) => warp::reply::json(&response).into_response(),
        None => warp::reply::with_status(warp::reply(), StatusCode::ACCEPTED).into_response(),
    };
    Ok(reply)
}

pub async fn serve_http(server: Arc<McpAppiumServer>, addr: SocketAddr) {
    info!(%addr, "MCP server listening on http://{}/mcp", addr);
    warp::serve(routes(server)).run(addr).await;
}
