// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Drain listing commands
//!
//! Commands: list

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use serde_json::Value;

use drains_core::domain::cursor::DEFAULT_BATCH_SIZE;
use syslog_drains_sdk::DrainsClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Drains grouped by application
    V4,
    /// Destinations grouped by URL and certificate
    V5,
}

#[derive(Subcommand)]
pub enum DrainsCommand {
    /// Fetch drains from a running server
    List {
        /// Response shape
        #[arg(long, value_enum, default_value = "v5")]
        shape: Shape,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: i64,

        /// Start offset; ignored with --all
        #[arg(long, default_value_t = 0)]
        next_id: i64,

        /// Follow next_id until the last page
        #[arg(long)]
        all: bool,
    },
}

pub async fn handle_command(command: DrainsCommand, host: &str, port: u16) -> Result<()> {
    let client = DrainsClient::new(format!("http://{}:{}", host, port));

    match command {
        DrainsCommand::List {
            shape,
            batch_size,
            next_id,
            all,
        } => {
            let output = list(&client, shape, batch_size, next_id, all).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}

/// Fetch one page, or every page when `all` is set, as JSON.
pub async fn list(
    client: &DrainsClient,
    shape: Shape,
    batch_size: i64,
    next_id: i64,
    all: bool,
) -> Result<Value> {
    let value = match (shape, all) {
        (Shape::V4, false) => serde_json::to_value(
            client
                .app_drains_page(next_id, batch_size)
                .await
                .context("Failed to fetch app drains")?,
        )?,
        (Shape::V4, true) => serde_json::to_value(
            client
                .all_app_drains(batch_size)
                .await
                .context("Failed to fetch app drains")?,
        )?,
        (Shape::V5, false) => serde_json::to_value(
            client
                .destinations_page(next_id, batch_size)
                .await
                .context("Failed to fetch drain destinations")?,
        )?,
        (Shape::V5, true) => serde_json::to_value(
            client
                .all_destinations(batch_size)
                .await
                .context("Failed to fetch drain destinations")?,
        )?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_list_all_v5_flattens_pages() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/internal/v5/syslog_drain_urls")
            .match_query(Matcher::UrlEncoded("next_id".into(), "0".into()))
            .with_status(200)
            .with_body(
                r#"{"results":[{"url":"syslog://a","credentials":[]}],"next_id":1}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/internal/v5/syslog_drain_urls")
            .match_query(Matcher::UrlEncoded("next_id".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"results":[],"next_id":null}"#)
            .create_async()
            .await;

        let client = DrainsClient::new(server.url());
        let value = list(&client, Shape::V5, 1, 0, true).await.unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "url": "syslog://a", "credentials": [] }])
        );
    }

    #[tokio::test]
    async fn test_list_single_v4_page_keeps_next_id() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/internal/v4/syslog_drain_urls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("next_id".into(), "10".into()),
                Matcher::UrlEncoded("batch_size".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"results":{"g":{"drains":["x"],"hostname":"h"}},"next_id":15}"#)
            .create_async()
            .await;

        let client = DrainsClient::new(server.url());
        let value = list(&client, Shape::V4, 5, 10, false).await.unwrap();
        assert_eq!(value["next_id"], 15);
        assert_eq!(value["results"]["g"]["hostname"], "h");
    }
}
