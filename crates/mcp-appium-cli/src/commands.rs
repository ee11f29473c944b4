use crate::args::Command;
use crate::error::Result;
use crate::mcp_client::McpClient;

/// Runs one command against the server and returns the text to print.
pub async fn execute(client: &McpClient, command: &Command) -> Result<String> {
    match command.tool_call() {
        Some((tool_name, arguments)) => {
            let result = client.call_tool(tool_name, arguments).await?;
            Ok(result.joined_text())
        }
        None => {
            let tools = client.list_tools().await?;
            Ok(tools
                .iter()
                .map(|t| format!("{:<14} {}", t.name, t.description))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
