// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Syslog Drains Core
//!
//! Read-only projection of service bindings into the syslog drain lists that
//! log forwarders poll.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Paginated drain aggregation over the binding store

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
