//! Standalone backend availability monitor.
//!
//! Polls the configured backend health endpoint while the service is down and
//! exits successfully once it recovers, so a supervisor can restore the
//! application with fresh state.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenance_monitor::config::{self, MonitorConfig};
use maintenance_monitor::monitor::recovery::RecoveryNotifier;
use maintenance_monitor::session::{NoAuth, StaticToken, TokenSource};
use maintenance_monitor::HealthMonitor;

#[derive(Parser)]
#[command(name = "maintenance-monitor")]
#[command(about = "Polls a backend health endpoint and exits once it recovers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and BACKEND_URL).
    #[arg(short, long)]
    url: Option<String>,

    /// Bearer token to attach to probes.
    #[arg(short, long)]
    token: Option<String>,

    /// Poll interval in seconds.
    #[arg(short, long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => MonitorConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("maintenance_monitor={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::apply_env_overrides(&mut config);
    if let Some(url) = cli.url {
        config.backend.base_url = url;
    }
    if let Some(secs) = cli.interval {
        config.poll.interval_secs = secs;
    }
    config::validate_config(&config).map_err(config::ConfigError::from)?;

    tracing::info!(
        base_url = %config.backend.base_url,
        interval_secs = config.poll.interval_secs,
        timeout_secs = config.poll.timeout_secs,
        "configuration loaded"
    );

    let tokens: Arc<dyn TokenSource> = match cli.token {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(NoAuth),
    };

    let (recovery, mut recovered) = RecoveryNotifier::new();
    let mut monitor = HealthMonitor::from_config(&config, tokens, Arc::new(recovery))?;
    monitor.start();

    tokio::select! {
        _ = recovered.changed() => {
            tracing::info!("backend recovered, leaving maintenance mode");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down monitor");
            monitor.stop();
        }
    }

    Ok(())
}
