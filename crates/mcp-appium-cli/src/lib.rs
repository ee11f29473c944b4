pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod mcp_client;

pub use args::{Cli, Command};
pub use error::{CliError, Result};
pub use mcp_client::McpClient;

/// Connects to the server named by `--url`, runs the command and prints the
/// result text on stdout.
pub async fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.verbose);

    let client = McpClient::connect(&cli.url).await?;
    let output = commands::execute(&client, &cli.command).await?;
    println!("{}", output);
    Ok(())
}
