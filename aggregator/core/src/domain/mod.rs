// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Value types, paging, hostname rules and the read contracts the drain
//! views are built from.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and rules, no I/O

pub mod binding;
pub mod config;
pub mod credentials;
pub mod cursor;
pub mod drain;
pub mod hostname;
pub mod repository;
