//! Autentique node - stdio entrypoint
//!
//! Reads one JSON request per line on stdin and writes one JSON response per
//! line on stdout. Logs go to stderr.

#![forbid(unsafe_code)]

use std::io::{BufRead, Write};

use anyhow::Result;
use flow_autentique::AutentiqueConnector;
use flow_core::{HostRequest, HostResponse, NodeError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Autentique node starting");

    run_host_loop()?;

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Serve requests until stdin closes.
fn run_host_loop() -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut connector = AutentiqueConnector::new();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = runtime.block_on(handle_message(&mut connector, &line));

        let response_json = serde_json::to_string(&response)?;
        writeln!(stdout, "{response_json}")?;
        stdout.flush()?;
    }

    Ok(())
}

async fn handle_message(connector: &mut AutentiqueConnector, message: &str) -> HostResponse {
    match serde_json::from_str::<HostRequest>(message) {
        Ok(request) => connector.handle(request).await,
        Err(e) => HostResponse::failure(
            None,
            NodeError::InvalidRequest {
                message: format!("Invalid JSON: {e}"),
            }
            .to_response(),
        ),
    }
}
