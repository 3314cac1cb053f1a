// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
#![deny(clippy::undocumented_unsafe_blocks)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use scope_debugger::cli::Args;
use scope_debugger::config::Config;
use scope_debugger::{ControlRegistry, Plugin, PluginSocket, server};
use tokio::signal::unix::{SignalKind, signal};

async fn run_plugin(config: Config) -> Result<()> {
    // Setup signal handlers before the socket exists so that an early
    // interrupt still removes it
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    let (socket, listener) = PluginSocket::bind(&config.socket_path)
        .inspect_err(|e| error!("Failed to setup socket: {e}"))
        .context("Failed to setup Unix socket")?;

    let registry = ControlRegistry::default();
    if registry.is_empty() {
        warn!("No controls registered");
    } else {
        info!(
            "Registered {} controls: {}",
            registry.len(),
            registry.ids().collect::<Vec<_>>().join(", ")
        );
    }
    let plugin = Arc::new(Plugin::new(Arc::new(registry)));
    info!("Listening...");

    loop {
        tokio::select! {
            // Handle incoming connections
            accept_result = listener.accept() => {
                let (stream, _) = match accept_result {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection on {}: {e}", socket.path().display());
                        socket.release();
                        return Err(e).context("failed to serve");
                    }
                };

                // Spawn a tokio task to serve multiple connections concurrently
                tokio::task::spawn(server::serve_connection(plugin.clone(), stream));
            }
            // Handle SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                socket.release();
                return Ok(());
            }
            // Handle SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                socket.release();
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args);
    simple_logger::init_with_level(config.log_level)?;
    info!("Log level set to: {:?}", config.log_level);

    info!("Starting {}", scope_debugger::PLUGIN_ID);
    run_plugin(config).await
}
