// src/cli/mod.rs — CLI definition (clap derive)

pub mod fetch;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "retail-chat",
    about = "Chat with retail sell-through data",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    /// Address to bind the web UI to (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port for the web UI (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the chat web UI (default)
    Serve,
    /// Call the report service once and print the payload as JSON
    Fetch {
        /// SBS value (defaults to the configured default)
        #[arg(long)]
        sbs: Option<String>,
        /// Logged user ID (defaults to the configured default)
        #[arg(long)]
        logged_user_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["retail-chat"]);
        assert!(cli.command.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from(["retail-chat", "fetch", "--sbs", "3", "--logged-user-id", "7"]);
        match cli.command {
            Some(Commands::Fetch {
                sbs,
                logged_user_id,
            }) => {
                assert_eq!(sbs.as_deref(), Some("3"));
                assert_eq!(logged_user_id.as_deref(), Some("7"));
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["retail-chat", "--port", "9000", "--bind", "0.0.0.0", "serve"]);
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0"));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }
}
