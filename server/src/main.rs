//! drivesim-server: HTTP front end for the driving-telemetry simulator.
//!
//! Usage:
//!   drivesim-server --addr 127.0.0.1:5000 --db driving_simulations.db

mod api;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use drivesim_core::{database::Database, simulator::Simulator};

use crate::api::{router, ApiState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let addr: SocketAddr = parse_arg(&args, "--addr", "127.0.0.1:5000".parse()?);
    let db_path = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("driving_simulations.db");

    let db = Arc::new(Database::open(db_path));
    let simulator = Simulator::new(db).context("failed to initialise the telemetry schema")?;
    let state = Arc::new(ApiState { simulator });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("drivesim-server listening on {addr} (db: {db_path})");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
