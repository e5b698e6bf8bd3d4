//! # PanVerify - IDCheck PAN verification service
//!
//! Accepts a PAN card image and a claimed PAN number, reads the card with
//! Tesseract and reports whether the printed identifier matches.
//!
//! ## Request flow
//! ```text
//! multipart upload → scratch file → grayscale → tesseract → regex → compare
//!                         ↓
//!                  removed on every exit
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod ocr;
mod routes;
mod scratch;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

/// IDCheck PanVerify - PAN card verification service
#[derive(Parser, Debug)]
#[command(name = "panverify")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/panverify.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Scratch directory for uploaded images (overrides config)
    #[arg(long, env = "SCRATCH_DIR")]
    scratch_dir: Option<String>,

    /// Path to the tesseract executable (overrides config)
    #[arg(long, env = "TESSERACT_CMD")]
    tesseract_cmd: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("🔥 Starting IDCheck PanVerify v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Creates the scratch directory once for the process lifetime
    let state = AppState::new(config.clone())?;
    info!(
        scratch_dir = %state.scratch.root().display(),
        tesseract = %config.ocr.tesseract_cmd,
        "Verification pipeline ready"
    );

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🚀 PanVerify listening on {}", config.listen_addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 PanVerify shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    Ok(())
}
