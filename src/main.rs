//! Pitcher ER Pro — under 2.5 earned runs estimator.
//!
//! Entry point. Loads configuration, initialises structured logging and
//! either serves the JSON API or, with the server disabled, reads one
//! input set as JSON from stdin and prints the report.

use anyhow::{Context, Result};
use std::io::Read;
use std::sync::Arc;
use tracing::{error, info};

use pitcher_er::api::{self, routes::ServerState};
use pitcher_er::config::AppConfig;
use pitcher_er::model::Estimator;
use pitcher_er::types::PitcherInputs;

const BANNER: &str = r#"
  Pitcher ER Pro
  Under 2.5 earned runs simulator
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = AppConfig::resolve_env("PITCHER_ER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        config = %config_path,
        park_adjustment = cfg.model.park_adjustment,
        required_recent_starts = ?cfg.model.required_recent_starts,
        server_enabled = cfg.server.enabled,
        "Pitcher ER Pro starting up"
    );

    let estimator = Estimator::new(cfg.model.clone());

    if !cfg.server.enabled {
        return run_once(&estimator);
    }

    let state = Arc::new(ServerState::new(estimator));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutdown signal received.");
    };

    api::serve(state, &cfg.server, shutdown).await?;
    info!("Pitcher ER Pro shut down cleanly.");
    Ok(())
}

/// Simulate a single input set read from stdin and print the results.
fn run_once(estimator: &Estimator) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read inputs from stdin")?;
    let inputs: PitcherInputs = serde_json::from_str(&raw).context("Failed to parse inputs JSON")?;

    let report = estimator.simulate(&inputs)?;
    println!("{report}");
    println!("{}", serde_json::to_string_pretty(&report.board_row())?);
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pitcher_er=info"));

    let json_logging = std::env::var("PITCHER_ER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
