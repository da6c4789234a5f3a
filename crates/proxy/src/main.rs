use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use proxy::{AppState, create_router};
use services::{TranslationConfig, TranslationService};

#[derive(Debug, Parser)]
#[command(name = "edushuar-proxy", about = "CORS proxy for the Shuar translation API")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "EDUSHUAR_PROXY_ADDR", default_value = "127.0.0.1:8787")]
    listen: SocketAddr,

    /// Upstream translation endpoint.
    #[arg(long, env = "EDUSHUAR_TRANSLATE_URL")]
    upstream: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let state = AppState::new(TranslationService::new(TranslationConfig::new(
        cli.upstream.clone(),
    )));

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("cannot bind {}", cli.listen))?;
    info!(addr = %cli.listen, upstream = %cli.upstream, "translation proxy listening");

    axum::serve(listener, create_router(state))
        .await
        .context("proxy server terminated")?;
    Ok(())
}
