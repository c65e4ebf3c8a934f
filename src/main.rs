//! # Biscotti Café Point of Sale
//!
//! Interactive order taking for the café floor. Reads `cafe.toml` from the
//! working directory if there is one, loads order history from
//! `customer_data.csv`, and serves the operator on stdin/stdout. History is
//! written back on exit.
//!
//! Logs go to stderr, filtered by `RUST_LOG`.

use biscotti_pos::config::{CafeConfig, DEFAULT_CONFIG_FILE};
use biscotti_pos::console::Console;
use biscotti_pos::lifecycle::tracing::setup_tracing;
use biscotti_pos::lifecycle::CafeSystem;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CafeConfig::load(DEFAULT_CONFIG_FILE).await.map_err(|e| {
        error!(error = %e, "Configuration rejected");
        e.to_string()
    })?;

    let system = CafeSystem::start(&config).await.map_err(|e| {
        error!(error = %e, "Startup failed");
        e.to_string()
    })?;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let report = console.run(system).await.map_err(|e| {
        error!(error = %e, "Session ended with an error");
        e.to_string()
    })?;

    info!(
        orders = report.session.len(),
        recommendations = ?report.recommendations,
        "Session saved"
    );
    Ok(())
}
