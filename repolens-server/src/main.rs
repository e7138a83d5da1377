//! Repolens - visualize GitHub repository structure.
//!
//! Serves the repository visualization API and the static front end.
//!
//! # Usage
//!
//! ```bash
//! # Start on the default port
//! repolens
//!
//! # Custom port and asset directory
//! repolens --port 9000 --static-dir ./frontend
//! ```
//!
//! Credentials and ceilings come from the environment (or a `.env`
//! file); see the `config` module for the variable names.

use clap::Parser;
use repolens_llm::{OpenAiChatClient, OpenAiConfig};
use repolens_server::config::ServerConfig;
use repolens_server::{AppState, router};
use repolens_survey::GitHubClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Repolens - visualize GitHub repository structure
#[derive(Parser)]
#[command(name = "repolens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value_t = 8088)]
    port: u16,

    /// Override the static asset directory
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir.into();
    }

    if !config.has_github_token() {
        tracing::warn!("no GITHUB_TOKEN configured, using anonymous GitHub access");
    }

    let github = GitHubClient::new(config.github_token.as_deref())?;

    let chat = OpenAiChatClient::new(OpenAiConfig {
        api_key: config.chat_api_key.clone(),
        base_url: config.chat_base_url.clone(),
        model: config.chat_model.clone(),
        proxy: config.chat_proxy.clone(),
    })?;

    let state = Arc::new(AppState::new(config, github, Arc::new(chat)));
    let app = router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "repolens server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
