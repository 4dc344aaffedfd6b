// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Types
//!
//! Wire types shared with the server, plus the health and error bodies.

use serde::{Deserialize, Serialize};

pub use drains_core::domain::drain::{
    AppDrainsPage, AppHostname, CredentialEntry, DrainDestination, DrainDestinationsPage,
    DrainTarget,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
}
