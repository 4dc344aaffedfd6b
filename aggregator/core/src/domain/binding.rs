// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Binding Rows
//!
//! Raw rows produced by the drain queries: one row per
//! binding ⋈ app ⋈ space ⋈ organization join, or one row per app group for
//! the per-application shape. Rows whose syslog drain URL is null or empty
//! never reach this layer.

use serde::{Deserialize, Serialize};

use crate::domain::hostname::hostname;

/// One grouped row of the per-application query.
///
/// `syslog_drain_urls` is the comma-joined output of the backend's string
/// aggregation over every binding of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDrainRow {
    pub app_guid: String,
    pub app_name: String,
    pub space_name: String,
    pub org_name: String,
    pub syslog_drain_urls: String,
}

impl AppDrainRow {
    /// Split the aggregated URL string back into drains, dropping empty segments.
    pub fn drains(&self) -> Vec<String> {
        self.syslog_drain_urls
            .split(',')
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn hostname(&self) -> String {
        hostname(&[&self.org_name, &self.space_name, &self.app_name])
    }
}

/// One binding joined with its owning app, space and organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRow {
    pub app_guid: String,
    pub app_name: String,
    pub space_name: String,
    pub org_name: String,
    pub syslog_drain_url: String,
    pub credentials: StoredCredentials,
}

impl BindingRow {
    pub fn hostname(&self) -> String {
        hostname(&[&self.org_name, &self.space_name, &self.app_name])
    }
}

/// Credential columns exactly as stored on the binding.
///
/// A `None` salt means the blob is plaintext JSON; a `None` blob means the
/// binding carries no credentials at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub blob: Option<String>,
    pub salt: Option<String>,
    pub encryption_key_label: Option<String>,
    pub encryption_iterations: Option<i64>,
}

impl StoredCredentials {
    pub fn plaintext(json: impl Into<String>) -> Self {
        Self {
            blob: Some(json.into()),
            ..Self::default()
        }
    }
}

/// Decrypted mutual-TLS material for one binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingCredentials {
    #[serde(default)]
    pub cert: String,
    #[serde(default)]
    pub key: String,
}
