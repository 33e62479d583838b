//! wqc-ui (Wine Quality Classifier) - Web form entry point
//!
//! Loads the fitted scaler and regressor once at startup, then serves the
//! classifier form. A missing or corrupt artifact halts startup before any
//! socket is bound.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wqc_common::config::{CliOverrides, ServerConfig};
use wqc_ui::{build_router, initialize};

/// Command-line arguments for wqc-ui
#[derive(Parser, Debug)]
#[command(name = "wqc-ui")]
#[command(about = "Wine quality classifier web form")]
#[command(version)]
struct Args {
    /// Directory containing feature_scaler.json and quality_regressor.json
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wqc_ui=info,wqc_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Wine Quality Classifier (wqc-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = ServerConfig::resolve(&CliOverrides {
        model_dir: args.model_dir,
        port: args.port,
        bind: args.bind,
    })
    .context("Failed to resolve configuration")?;
    info!("Model directory: {}", config.model_dir.display());

    // No fallback model: stop here if either artifact is unusable
    let state = match initialize(&config) {
        Ok(state) => state,
        Err(e) => {
            match e.artifact() {
                Some(artifact) => error!("Cannot start without the {} artifact: {}", artifact, e),
                None => error!("Cannot start: {}", e),
            }
            return Err(e).context("Failed to load model artifacts");
        }
    };

    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wqc-ui listening on http://{}", addr);
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
            Ok(mut sig) => {
                sig.recv().await;
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
