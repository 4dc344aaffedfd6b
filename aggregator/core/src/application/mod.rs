// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod app_drains;
pub mod destinations;
pub mod drain_service;

// Re-export use cases for convenience
pub use drain_service::{DrainServiceError, DrainShape, StandardSyslogDrainService, SyslogDrainService};
