// src/main.rs — retail-chat entry point

use clap::Parser;

use retail_chat::cli::{Cli, Commands};
use retail_chat::infra::config::Config;
use retail_chat::infra::{env, logger};

#[tokio::main]
async fn main() {
    // Credentials may live in a local .env file; load it before RUST_LOG is read
    let dotenv = env::load_dotenv();

    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    match dotenv {
        Ok(Some(path)) => tracing::debug!("loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("ignoring unreadable .env file: {e}"),
    }

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    match cli.command {
        Some(Commands::Fetch {
            sbs,
            logged_user_id,
        }) => retail_chat::cli::fetch::run_fetch(&config, sbs, logged_user_id).await,
        Some(Commands::Serve) | None => retail_chat::cli::serve::run_serve(&config).await,
    }
}
