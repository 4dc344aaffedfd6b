// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Destination credential aggregator (shape V2).
//!
//! Groups binding rows by drain URL, then by certificate. Both levels keep
//! first-seen order so the output is deterministic for a given row order.
//! When the same `(url, cert)` pair shows up again with a different key, the
//! first key seen is kept.

use std::collections::HashMap;

use crate::domain::binding::{BindingCredentials, BindingRow};
use crate::domain::drain::{AppHostname, CredentialEntry, DrainDestination};

#[derive(Debug, Default)]
pub struct DestinationAggregator {
    destinations: Vec<DestinationBuilder>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
struct DestinationBuilder {
    url: String,
    credentials: Vec<CredentialEntry>,
    by_cert: HashMap<String, usize>,
}

impl DestinationBuilder {
    fn new(url: String) -> Self {
        Self {
            url,
            credentials: Vec::new(),
            by_cert: HashMap::new(),
        }
    }

    fn add_app(&mut self, credentials: BindingCredentials, app: AppHostname) {
        match self.by_cert.get(&credentials.cert) {
            Some(&slot) => self.credentials[slot].apps.push(app),
            None => {
                self.by_cert
                    .insert(credentials.cert.clone(), self.credentials.len());
                self.credentials.push(CredentialEntry {
                    cert: credentials.cert,
                    key: credentials.key,
                    apps: vec![app],
                });
            }
        }
    }
}

impl DestinationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row and its decrypted credentials into the view.
    pub fn push(&mut self, row: &BindingRow, credentials: BindingCredentials) {
        let app = AppHostname {
            hostname: row.hostname(),
            app_id: row.app_guid.clone(),
        };

        let slot = match self.index.get(&row.syslog_drain_url) {
            Some(&slot) => slot,
            None => {
                let slot = self.destinations.len();
                self.index.insert(row.syslog_drain_url.clone(), slot);
                self.destinations
                    .push(DestinationBuilder::new(row.syslog_drain_url.clone()));
                slot
            }
        };

        self.destinations[slot].add_app(credentials, app);
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn finish(self) -> Vec<DrainDestination> {
        self.destinations
            .into_iter()
            .map(|builder| DrainDestination {
                url: builder.url,
                credentials: builder.credentials,
            })
            .collect()
    }
}
