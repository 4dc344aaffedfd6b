// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::types::{
    ApiErrorBody, AppDrainsPage, DrainDestination, DrainDestinationsPage, DrainTarget,
    HealthStatus,
};

const APP_DRAINS_PATH: &str = "/internal/v4/syslog_drain_urls";
const DESTINATIONS_PATH: &str = "/internal/v5/syslog_drain_urls";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} ({code}): {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("Server returned next_id {next_id} after offset {offset}; refusing to loop")]
    CursorDidNotAdvance { offset: i64, next_id: i64 },
}

/// Client for the internal syslog drain endpoints.
///
/// Transport security (mutual TLS) is configured on the `reqwest::Client`
/// passed to [`DrainsClient::with_http_client`].
pub struct DrainsClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl DrainsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: None,
        }
    }

    /// Set a bearer token for deployments that front the endpoints with a gateway.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let req = self.client.get(format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => req.header("Authorization", format!("Bearer {}", key)),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => (String::from("UNKNOWN"), text),
        };
        Err(ClientError::Api {
            status,
            code,
            message,
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.get("/health")).await
    }

    /// Fetch one page grouped by application.
    pub async fn app_drains_page(
        &self,
        next_id: i64,
        batch_size: i64,
    ) -> Result<AppDrainsPage, ClientError> {
        let req = self
            .get(APP_DRAINS_PATH)
            .query(&[("next_id", next_id), ("batch_size", batch_size)]);
        self.send(req).await
    }

    /// Fetch one page grouped by destination URL.
    pub async fn destinations_page(
        &self,
        next_id: i64,
        batch_size: i64,
    ) -> Result<DrainDestinationsPage, ClientError> {
        let req = self
            .get(DESTINATIONS_PATH)
            .query(&[("next_id", next_id), ("batch_size", batch_size)]);
        self.send(req).await
    }

    /// Follow `next_id` from zero until the server reports the end.
    pub async fn all_app_drains(
        &self,
        batch_size: i64,
    ) -> Result<BTreeMap<String, DrainTarget>, ClientError> {
        let mut all = BTreeMap::new();
        let mut offset = 0;
        loop {
            let page = self.app_drains_page(offset, batch_size).await?;
            debug!(offset, results = page.results.len(), "Fetched app drains page");
            all.extend(page.results);
            match page.next_id {
                Some(next_id) => offset = advance(offset, next_id)?,
                None => return Ok(all),
            }
        }
    }

    /// Follow `next_id` from zero until the server reports the end.
    pub async fn all_destinations(
        &self,
        batch_size: i64,
    ) -> Result<Vec<DrainDestination>, ClientError> {
        let mut all = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.destinations_page(offset, batch_size).await?;
            debug!(offset, results = page.results.len(), "Fetched destinations page");
            all.extend(page.results);
            match page.next_id {
                Some(next_id) => offset = advance(offset, next_id)?,
                None => return Ok(all),
            }
        }
    }
}

fn advance(offset: i64, next_id: i64) -> Result<i64, ClientError> {
    if next_id <= offset {
        return Err(ClientError::CursorDidNotAdvance { offset, next_id });
    }
    Ok(next_id)
}
