use clap::{Parser, Subcommand};
use mcp_appium_session::{
    Capabilities, DEFAULT_SWIPE_DURATION_MS, GestureSpec, Locator, LocatorStrategy,
};
use serde_json::{Value, json};

#[derive(Parser, Debug)]
#[command(name = "mcp-appium")]
#[command(about = "Drive an Appium session through the mcp-appium MCP server")]
#[command(version)]
pub struct Cli {
    /// MCP server endpoint, e.g. http://127.0.0.1:3000/mcp
    #[arg(short, long, env = "MCP_APPIUM_URL")]
    pub url: String,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start Appium session
    #[command(name = "start_session")]
    StartSession {
        #[arg(long = "platformName")]
        platform_name: String,
        #[arg(long = "deviceName")]
        device_name: String,
        #[arg(long)]
        app: Option<String>,
        #[arg(long = "automationName")]
        automation_name: Option<String>,
    },

    /// Tap element
    #[command(name = "tap")]
    Tap {
        /// id, accessibility id, xpath, class name or name
        by: LocatorStrategy,
        value: String,
    },

    /// Swipe gesture
    #[command(name = "swipe")]
    Swipe {
        #[arg(allow_negative_numbers = true)]
        start_x: f64,
        #[arg(allow_negative_numbers = true)]
        start_y: f64,
        #[arg(allow_negative_numbers = true)]
        end_x: f64,
        #[arg(allow_negative_numbers = true)]
        end_y: f64,
        #[arg(default_value_t = DEFAULT_SWIPE_DURATION_MS)]
        duration: u64,
    },

    /// Close the current Appium session
    #[command(name = "close_session")]
    CloseSession,

    /// List the tools the server exposes
    #[command(name = "list_tools")]
    ListTools,
}

impl Command {
    /// Tool name and arguments for commands that map onto a tool call.
    pub fn tool_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Command::StartSession {
                platform_name,
                device_name,
                app,
                automation_name,
            } => {
                let capabilities = Capabilities {
                    platform_name: platform_name.clone(),
                    device_name: device_name.clone(),
                    app: app.clone(),
                    automation_name: automation_name.clone(),
                };
                ("start_session", json!({ "capabilities": capabilities }))
            }
            Command::Tap { by, value } => ("tap", json!(Locator::new(*by, value.clone()))),
            Command::Swipe {
                start_x,
                start_y,
                end_x,
                end_y,
                duration,
            } => {
                let spec = GestureSpec::new(*start_x, *start_y, *end_x, *end_y)
                    .with_duration(*duration);
                ("swipe", json!(spec))
            }
            Command::CloseSession => ("close_session", json!({})),
            Command::ListTools => return None,
        };
        Some(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mcp-appium").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_start_session_flags() {
        let cli = parse(&[
            "--url",
            "http://localhost:3000/mcp",
            "start_session",
            "--platformName",
            "Android",
            "--deviceName",
            "emulator-5554",
        ]);
        let (name, args) = cli.command.tool_call().unwrap();
        assert_eq!(name, "start_session");
        assert_eq!(
            args,
            json!({"capabilities": {"platformName": "Android", "deviceName": "emulator-5554"}})
        );
    }

    #[test]
    fn test_tap_positionals() {
        let cli = parse(&["-u", "http://localhost:3000/mcp", "tap", "accessibility id", "Login"]);
        assert_eq!(
            cli.command,
            Command::Tap {
                by: LocatorStrategy::AccessibilityId,
                value: "Login".to_string()
            }
        );
        let (_, args) = cli.command.tool_call().unwrap();
        assert_eq!(args, json!({"by": "accessibility id", "value": "Login"}));
    }

    #[test]
    fn test_swipe_default_duration() {
        let cli = parse(&["--url", "http://x/mcp", "swipe", "100", "800", "100", "200"]);
        let (name, args) = cli.command.tool_call().unwrap();
        assert_eq!(name, "swipe");
        assert_eq!(args["duration"], 800);
        assert_eq!(args["startY"], 800.0);
    }

    #[test]
    fn test_usage_errors() {
        assert!(Cli::try_parse_from(["mcp-appium", "--url", "http://x/mcp", "pinch"]).is_err());
        assert!(
            Cli::try_parse_from(["mcp-appium", "--url", "http://x/mcp", "tap", "css", "#a"]).is_err()
        );
        assert!(
            Cli::try_parse_from([
                "mcp-appium",
                "--url",
                "http://x/mcp",
                "start_session",
                "--platformName",
                "iOS"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_list_tools_is_not_a_tool_call() {
        let cli = parse(&["--url", "http://x/mcp", "list_tools"]);
        assert!(cli.command.tool_call().is_none());
    }
}
