// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Read contract for the binding store the drain views are projected from.
//! The interface lives in the domain layer and is implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Implementations |
//! |-------|----------------|
//! | `DrainBindingRepository` | `InMemoryDrainBindingRepository`, `SqlDrainBindingRepository` |
//!
//! Both operations are read-only. Implementations must never create, update
//! or delete bindings.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::binding::{AppDrainRow, BindingRow};
use crate::domain::cursor::PageCursor;

/// Read access to bindings that carry a syslog drain URL.
#[async_trait]
pub trait DrainBindingRepository: Send + Sync {
    /// One page of per-app rows, grouped by app and ordered by `app_guid`.
    ///
    /// Returns at most `cursor.limit()` rows.
    async fn app_drain_page(&self, cursor: PageCursor) -> Result<Vec<AppDrainRow>, RepositoryError>;

    /// Every binding whose URL falls in one page of the distinct,
    /// lexicographically ordered URL set.
    ///
    /// May return more than `cursor.limit()` rows but never more than
    /// `cursor.limit()` distinct URLs. Rows are ordered by URL and then by
    /// binding insertion order.
    async fn destination_binding_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Vec<BindingRow>, RepositoryError>;
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}
