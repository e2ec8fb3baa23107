//! Hand-E Demo Web Server
//!
//! Dashboard, metered task, chatbot and owner consumption view backed by Hand-E.

use anyhow::Context;
use clap::Parser;
use hande_core::{init_logging, HandEConfig, LogFormat, LoggingConfig};
use hande_web::{server::HandEServerBuilder, WebConfig};
use std::path::PathBuf;
use tracing::info;

/// Hand-E demo server - usage metering, sessions and owner views through Hand-E
#[derive(Parser, Debug)]
#[command(name = "hande-web")]
#[command(about = "Demo application integrated with Hand-E")]
#[command(version)]
struct Args {
    /// Server host to bind to [env: HAND_E_HOST, default 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on [env: HAND_E_PORT, default 8000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Simulated work per task in milliseconds [env: HAND_E_TASK_DELAY_MS]
    #[arg(long)]
    task_delay_ms: Option<u64>,

    /// TOML file with Hand-E settings, instead of HAND_E_* variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format (json, pretty, compact)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_logging(&LoggingConfig::for_level(&args.log_level).with_format(args.log_format))
        .context("failed to initialize logging")?;

    let hande = match &args.config {
        Some(path) => HandEConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => HandEConfig::from_env().context("invalid HAND_E_* environment")?,
    };
    info!(api_url = %hande.api_url, offline = hande.is_offline(), "Hand-E configuration loaded");

    let mut config = WebConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(delay) = args.task_delay_ms {
        config.task_delay_ms = delay;
    }
    config.dev_mode |= args.dev;

    let server = HandEServerBuilder::new()
        .config(config)
        .hande(hande)
        .build()
        .context("failed to build server")?;

    server.start().await.context("server failed")?;
    Ok(())
}
