use crate::Result;
use crate::mcp::rpc;
use crate::mcp::server::McpAppiumServer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

/// Serves line-delimited JSON-RPC until the reader reaches EOF.
pub async fn serve<R, W>(server: &McpAppiumServer, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = rpc::handle_message(server, &line).await {
            let encoded = serde_json::to_string(&response)?;
            writer.write_all(encoded.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

pub async fn serve_stdio(server: &McpAppiumServer) -> Result<()> {
    info!("MCP server ready on stdio");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
