// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Syslog Drain Service
//!
//! Runs one page of either drain view: fetch rows for the cursor, reduce them
//! with the matching view builder, then compute the next token. Holds no
//! state between calls; the same cursor over unchanged data yields the same
//! page.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates repository reads, credential decryption and view reduction

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::application::app_drains::build_drain_targets;
use crate::application::destinations::DestinationAggregator;
use crate::domain::credentials::{CredentialDecryptor, DecryptionError};
use crate::domain::cursor::PageCursor;
use crate::domain::drain::{AppDrainsPage, DrainDestinationsPage};
use crate::domain::repository::{DrainBindingRepository, RepositoryError};

/// Which response shape a page was computed for; used for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainShape {
    /// Grouped by owning application (`/internal/v4`)
    PerApp,
    /// Grouped by destination URL then certificate (`/internal/v5`)
    PerDestination,
}

impl DrainShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerApp => "v4",
            Self::PerDestination => "v5",
        }
    }
}

#[derive(Debug, Error)]
pub enum DrainServiceError {
    #[error("Binding store query failed: {0}")]
    Store(#[from] RepositoryError),

    #[error("Failed to decrypt credentials for app {app_guid} on {syslog_drain_url}: {source}")]
    Credentials {
        app_guid: String,
        syslog_drain_url: String,
        #[source]
        source: DecryptionError,
    },
}

impl DrainServiceError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Credentials { .. } => "credentials",
        }
    }
}

#[async_trait]
pub trait SyslogDrainService: Send + Sync {
    /// One page of drains grouped by application.
    async fn list_app_drains(&self, cursor: PageCursor) -> Result<AppDrainsPage, DrainServiceError>;

    /// One page of destinations with their per-certificate app lists.
    async fn list_drain_destinations(
        &self,
        cursor: PageCursor,
    ) -> Result<DrainDestinationsPage, DrainServiceError>;
}

pub struct StandardSyslogDrainService {
    repository: Arc<dyn DrainBindingRepository>,
    decryptor: Arc<dyn CredentialDecryptor>,
}

impl StandardSyslogDrainService {
    pub fn new(
        repository: Arc<dyn DrainBindingRepository>,
        decryptor: Arc<dyn CredentialDecryptor>,
    ) -> Self {
        Self {
            repository,
            decryptor,
        }
    }

    async fn app_drains_page(&self, cursor: PageCursor) -> Result<AppDrainsPage, DrainServiceError> {
        let rows = self.repository.app_drain_page(cursor).await?;
        metrics::histogram!("syslog_drains_page_rows", "shape" => DrainShape::PerApp.as_str())
            .record(rows.len() as f64);

        let results = build_drain_targets(&rows);
        Ok(AppDrainsPage {
            next_id: cursor.next_id(rows.is_empty()),
            results,
        })
    }

    async fn destinations_page(
        &self,
        cursor: PageCursor,
    ) -> Result<DrainDestinationsPage, DrainServiceError> {
        let rows = self.repository.destination_binding_page(cursor).await?;
        metrics::histogram!("syslog_drains_page_rows", "shape" => DrainShape::PerDestination.as_str())
            .record(rows.len() as f64);

        let mut aggregator = DestinationAggregator::new();
        for row in &rows {
            let credentials = self.decryptor.decrypt(&row.credentials).map_err(|source| {
                DrainServiceError::Credentials {
                    app_guid: row.app_guid.clone(),
                    syslog_drain_url: row.syslog_drain_url.clone(),
                    source,
                }
            })?;
            aggregator.push(row, credentials);
        }

        let results = aggregator.finish();
        Ok(DrainDestinationsPage {
            next_id: cursor.next_id(results.is_empty()),
            results,
        })
    }
}

fn record_outcome<T>(
    shape: DrainShape,
    cursor: PageCursor,
    outcome: &Result<T, DrainServiceError>,
    result_count: impl FnOnce(&T) -> usize,
) {
    match outcome {
        Ok(page) => {
            metrics::counter!("syslog_drains_pages_total", "shape" => shape.as_str()).increment(1);
            info!(
                shape = shape.as_str(),
                offset = cursor.offset(),
                limit = cursor.limit(),
                results = result_count(page),
                "Served drain page"
            );
        }
        Err(e) => {
            metrics::counter!(
                "syslog_drains_page_errors_total",
                "shape" => shape.as_str(),
                "kind" => e.kind()
            )
            .increment(1);
            error!(
                shape = shape.as_str(),
                offset = cursor.offset(),
                limit = cursor.limit(),
                error = %e,
                "Failed to build drain page"
            );
        }
    }
}

#[async_trait]
impl SyslogDrainService for StandardSyslogDrainService {
    async fn list_app_drains(&self, cursor: PageCursor) -> Result<AppDrainsPage, DrainServiceError> {
        let outcome = self.app_drains_page(cursor).await;
        record_outcome(DrainShape::PerApp, cursor, &outcome, |page| page.results.len());
        outcome
    }

    async fn list_drain_destinations(
        &self,
        cursor: PageCursor,
    ) -> Result<DrainDestinationsPage, DrainServiceError> {
        let outcome = self.destinations_page(cursor).await;
        record_outcome(DrainShape::PerDestination, cursor, &outcome, |page| {
            page.results.len()
        });
        outcome
    }
}
