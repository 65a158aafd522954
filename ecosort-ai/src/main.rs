//! ecosort-ai - Waste Classification Microservice
//!
//! **Module Identity:**
//! - Name: ecosort-ai
//! - Port: 5760 (default)
//!
//! Classifies a photographed waste item as biodegradable, recyclable or
//! hazardous and returns disposal guidance.

use anyhow::{Context, Result};
use clap::Parser;
use ecosort_common::config::load_module_config;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecosort_ai::api::BuildInfo;
use ecosort_ai::config::{resolve_credentials, ClassifierSettings};
use ecosort_ai::{build_router, AppState};

const MODULE_NAME: &str = "ecosort-ai";

#[derive(Parser, Debug)]
#[command(name = "ecosort-ai")]
#[command(about = "Waste image classification microservice")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the TOML config)
    #[arg(short, long, env = "ECOSORT_AI_PORT")]
    port: Option<u16>,

    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing is up so its log level can apply
    let config_result = load_module_config(args.config.as_deref(), MODULE_NAME);
    let default_level = config_result
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ecosort_ai={0},ecosort_common={0},tower_http=info", default_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting EcoSort AI (ecosort-ai) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        build.git_hash,
        build.timestamp,
        build.profile
    );

    let toml_config = config_result.context("Failed to load configuration")?;

    let credentials = resolve_credentials(&toml_config);
    let settings = ClassifierSettings::from_toml(&toml_config);
    info!(
        active_model = ?credentials.active_model(),
        "{}",
        credentials.active_model().status_message()
    );

    let state = AppState::new(credentials, &settings).context("Failed to build classifier")?;
    let app = build_router(state);

    let port = args.port.unwrap_or(toml_config.port);
    let addr: SocketAddr = format!("{}:{}", toml_config.bind_address, port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}", toml_config.bind_address))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("ecosort-ai listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
