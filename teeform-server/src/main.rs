//! Teeform server binary: loads configuration, wires the core
//! services, and serves the upload and gallery routes.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teeform_server::{AppState, Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "teeform-server")]
#[command(about = "Design placement and gallery server")]
struct Cli {
    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    if let Some(host) = cli.host {
        config.server_host = host;
    }

    config
        .ensure_directories()
        .context("failed to create storage directories")?;

    info!(
        upload_dir = %config.upload_dir.display(),
        catalog = %config.catalog_path.display(),
        "storage ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid listen address")?;

    let state = AppState::new(config);
    let app = routes::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
