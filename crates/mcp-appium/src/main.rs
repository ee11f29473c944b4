use clap::Parser;
use mcp_appium_cli::Cli;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = mcp_appium_cli::run(cli).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
