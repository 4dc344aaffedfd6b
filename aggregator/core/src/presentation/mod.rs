// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`syslog-drains-core`)
//!
//! HTTP surface that translates requests into application service calls.
//! **No business logic lives here**; all real work is delegated to
//! `crate::application`.
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`api`] | HTTP (Axum) | `/internal/v4` and `/internal/v5` drain listings, `/health` |
//! | [`error`] | HTTP (Axum) | Error-to-status mapping |

pub mod api;
pub mod error;
