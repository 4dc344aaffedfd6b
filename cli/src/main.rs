// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Syslog Drains
//!
//! The `drains` binary serves the paginated syslog drain endpoints and
//! offers a few operator commands.
//!
//! ## Commands
//!
//! - `drains serve` - Run the HTTP server
//! - `drains config show|validate|generate` - Configuration management
//! - `drains drains list --shape v4|v5` - Query a running server

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use drains_core::domain::config::DrainsConfig;
use syslog_drains::commands::{self, ConfigCommand, DrainsCommand};
use syslog_drains::server::{self, ServeOverrides};

/// Syslog Drains - paginated drain configuration for log shippers
#[derive(Parser)]
#[command(name = "drains")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "SYSLOG_DRAINS_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP port (default: from config, else 8080)
    #[arg(long, global = true, env = "DRAINS_PORT")]
    port: Option<u16>,

    /// HTTP host (default: from config, else 127.0.0.1)
    #[arg(long, global = true, env = "DRAINS_HOST")]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DRAINS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Query a running server
    #[command(name = "drains")]
    Drains {
        #[command(subcommand)]
        command: DrainsCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_json)?;

    match cli.command {
        Some(Commands::Serve) => {
            let overrides = ServeOverrides {
                host: cli.host,
                port: cli.port,
            };
            server::serve(cli.config, overrides).await
        }
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        Some(Commands::Drains { command }) => {
            let (host, port) = match (cli.host, cli.port) {
                (Some(host), Some(port)) => (host, port),
                (host, port) => {
                    let config = DrainsConfig::load_or_default(cli.config)
                        .context("Failed to load configuration")?;
                    (
                        host.unwrap_or(config.server.host),
                        port.unwrap_or(config.server.port),
                    )
                }
            };
            commands::drains::handle_command(command, &host, port).await
        }
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
