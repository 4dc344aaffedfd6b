// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Drain Views
//!
//! The two response shapes served to log forwarders. Both are rebuilt on
//! every request and never persisted.
//!
//! | Shape | Keyed by | Type |
//! |-------|----------|------|
//! | V1 (`/internal/v4`) | `app_guid` | [`DrainTarget`] |
//! | V2 (`/internal/v5`) | `syslog_drain_url` | [`DrainDestination`] |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Drains configured on one application (shape V1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainTarget {
    /// One entry per binding, duplicates preserved.
    pub drains: Vec<String>,
    pub hostname: String,
}

/// One syslog destination and every certificate used to reach it (shape V2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainDestination {
    pub url: String,
    pub credentials: Vec<CredentialEntry>,
}

/// Apps that reach a destination with the same certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub cert: String,
    pub key: String,
    pub apps: Vec<AppHostname>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppHostname {
    pub hostname: String,
    pub app_id: String,
}

/// A page of shape V1 results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDrainsPage {
    pub results: BTreeMap<String, DrainTarget>,
    pub next_id: Option<i64>,
}

/// A page of shape V2 results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainDestinationsPage {
    pub results: Vec<DrainDestination>,
    pub next_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pages_serialize_null_next_id() {
        let v1 = serde_json::to_value(AppDrainsPage::default()).unwrap();
        assert_eq!(v1, serde_json::json!({ "results": {}, "next_id": null }));

        let v2 = serde_json::to_value(DrainDestinationsPage::default()).unwrap();
        assert_eq!(v2, serde_json::json!({ "results": [], "next_id": null }));
    }

    #[test]
    fn test_destination_wire_shape() {
        let page = DrainDestinationsPage {
            results: vec![DrainDestination {
                url: "syslog://a".to_string(),
                credentials: vec![CredentialEntry {
                    cert: "C1".to_string(),
                    key: "K1".to_string(),
                    apps: vec![AppHostname {
                        hostname: "o.s.a".to_string(),
                        app_id: "guid-1".to_string(),
                    }],
                }],
            }],
            next_id: Some(50),
        };

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::json!({
                "results": [{
                    "url": "syslog://a",
                    "credentials": [{
                        "cert": "C1",
                        "key": "K1",
                        "apps": [{ "hostname": "o.s.a", "app_id": "guid-1" }]
                    }]
                }],
                "next_id": 50
            })
        );
    }
}
