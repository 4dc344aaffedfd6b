// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the read contract defined in
//! `crate::domain::repository`.
//!
//! # Available Implementations
//!
//! - **SqlDrainBindingRepository** - PostgreSQL / MySQL binding store via `sqlx::Any`
//! - **InMemoryDrainBindingRepository** - Denormalized binding list for tests and local runs
//!
//! Both honour the same ordering and paging rules, so service-level tests
//! against the in-memory store describe production behaviour.

pub mod sql_drain;

pub use sql_drain::SqlDrainBindingRepository;

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::domain::binding::{AppDrainRow, BindingRow, StoredCredentials};
use crate::domain::cursor::PageCursor;
use crate::domain::repository::{DrainBindingRepository, RepositoryError};

/// One binding already joined with its app, space and organization names.
#[derive(Debug, Clone)]
pub struct BindingRecord {
    pub app_guid: String,
    pub app_name: String,
    pub space_name: String,
    pub org_name: String,
    pub syslog_drain_url: Option<String>,
    pub credentials: StoredCredentials,
}

impl BindingRecord {
    fn drain_url(&self) -> Option<&str> {
        self.syslog_drain_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDrainBindingRepository {
    bindings: Arc<RwLock<Vec<BindingRecord>>>,
}

impl InMemoryDrainBindingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: impl IntoIterator<Item = BindingRecord>) -> Self {
        Self {
            bindings: Arc::new(RwLock::new(bindings.into_iter().collect())),
        }
    }

    pub fn insert(&self, binding: BindingRecord) -> Result<(), RepositoryError> {
        let mut bindings = self
            .bindings
            .write()
            .map_err(|_| RepositoryError::Database("Binding store lock poisoned".to_string()))?;
        bindings.push(binding);
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<BindingRecord>, RepositoryError> {
        self.bindings
            .read()
            .map(|bindings| bindings.clone())
            .map_err(|_| RepositoryError::Database("Binding store lock poisoned".to_string()))
    }
}

fn window(cursor: PageCursor) -> (usize, usize) {
    let offset = usize::try_from(cursor.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(cursor.limit()).unwrap_or(usize::MAX);
    (offset, limit)
}

#[async_trait]
impl DrainBindingRepository for InMemoryDrainBindingRepository {
    async fn app_drain_page(&self, cursor: PageCursor) -> Result<Vec<AppDrainRow>, RepositoryError> {
        let bindings = self.snapshot()?;
        let mut groups: BTreeMap<String, AppDrainRow> = BTreeMap::new();

        for binding in &bindings {
            let Some(url) = binding.drain_url() else {
                continue;
            };
            groups
                .entry(binding.app_guid.clone())
                .and_modify(|group| {
                    group.syslog_drain_urls.push(',');
                    group.syslog_drain_urls.push_str(url);
                })
                .or_insert_with(|| AppDrainRow {
                    app_guid: binding.app_guid.clone(),
                    app_name: binding.app_name.clone(),
                    space_name: binding.space_name.clone(),
                    org_name: binding.org_name.clone(),
                    syslog_drain_urls: url.to_string(),
                });
        }

        let (offset, limit) = window(cursor);
        Ok(groups.into_values().skip(offset).take(limit).collect())
    }

    async fn destination_binding_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Vec<BindingRow>, RepositoryError> {
        let bindings = self.snapshot()?;
        let (offset, limit) = window(cursor);

        let page: BTreeSet<&str> = bindings
            .iter()
            .filter_map(BindingRecord::drain_url)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();

        let mut rows: Vec<BindingRow> = bindings
            .iter()
            .filter_map(|binding| {
                let url = binding.drain_url().filter(|url| page.contains(url))?;
                Some(BindingRow {
                    app_guid: binding.app_guid.clone(),
                    app_name: binding.app_name.clone(),
                    space_name: binding.space_name.clone(),
                    org_name: binding.org_name.clone(),
                    syslog_drain_url: url.to_string(),
                    credentials: binding.credentials.clone(),
                })
            })
            .collect();

        // Stable: bindings on the same URL keep insertion order.
        rows.sort_by(|a, b| a.syslog_drain_url.cmp(&b.syslog_drain_url));
        Ok(rows)
    }
}
