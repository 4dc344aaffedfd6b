// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server bootstrap
//!
//! Loads configuration, connects the binding store, wires the drain service
//! into the router and serves until SIGINT/SIGTERM.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use drains_core::{
    application::StandardSyslogDrainService,
    domain::config::DrainsConfig,
    infrastructure::{repositories::SqlDrainBindingRepository, CredentialCipher, Database},
    presentation::api,
};

/// Command-line overrides for the `[server]` section.
#[derive(Debug, Default, Clone)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub fn load_config(config_path: Option<PathBuf>, overrides: &ServeOverrides) -> Result<DrainsConfig> {
    let mut config =
        DrainsConfig::load_or_default(config_path).context("Failed to load configuration")?;

    if let Some(host) = &overrides.host {
        config.server.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

pub async fn serve(config_path: Option<PathBuf>, overrides: ServeOverrides) -> Result<()> {
    let config = load_config(config_path, &overrides)?;

    if let Some(addr) = &config.observability.metrics_addr {
        install_metrics_exporter(addr)?;
    }

    let database = Database::connect(&config.database)
        .await
        .context("Failed to connect to binding store")?;
    let repository = Arc::new(SqlDrainBindingRepository::from_database(&database));

    let cipher = CredentialCipher::from_config(&config.encryption)
        .context("Failed to initialize credential cipher")?;
    if config.encryption.current_key_label.is_none() {
        warn!("No encryption.current_key_label configured; only labelled or plaintext credentials can be read");
    }

    let service = Arc::new(StandardSyslogDrainService::new(repository, Arc::new(cipher)));
    let app = api::app(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Syslog drain server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Syslog drain server shutting down");

    Ok(())
}

fn install_metrics_exporter(addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid metrics address {}", addr))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    info!("Prometheus metrics exposed on {}", addr);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
