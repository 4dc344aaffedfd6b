// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Syslog Drains Rust SDK
//!
//! Walks the paginated `/internal/v4` and `/internal/v5` drain endpoints.

pub mod client;
pub mod types;

pub use client::{ClientError, DrainsClient};
pub use types::*;
