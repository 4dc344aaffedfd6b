// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # SQL Drain Binding Repository
//!
//! Production `DrainBindingRepository` backed by the `service_bindings`,
//! `apps`, `spaces` and `organizations` tables via `sqlx`'s `Any` driver.
//! Backend-specific SQL comes from the injected [`AggregationDialect`].
//!
//! Every call acquires one pooled connection, reapplies the dialect's
//! session setup on it and runs its query on that same connection: the
//! aggregate length limit is session-scoped and cannot be assumed to survive
//! in the pool.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool, Executor, Row};

use crate::domain::binding::{AppDrainRow, BindingRow, StoredCredentials};
use crate::domain::cursor::PageCursor;
use crate::domain::repository::{DrainBindingRepository, RepositoryError};
use crate::infrastructure::aggregation::AggregationDialect;
use crate::infrastructure::db::Database;

const DRAIN_URL_PRESENT: &str = "service_bindings.syslog_drain_url IS NOT NULL \
     AND service_bindings.syslog_drain_url != ''";

pub struct SqlDrainBindingRepository {
    pool: AnyPool,
    dialect: Arc<dyn AggregationDialect>,
}

impl SqlDrainBindingRepository {
    pub fn new(pool: AnyPool, dialect: Arc<dyn AggregationDialect>) -> Self {
        Self { pool, dialect }
    }

    pub fn from_database(database: &Database) -> Self {
        Self::new(database.get_pool().clone(), database.dialect())
    }

    async fn session(&self) -> Result<PoolConnection<Any>, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to acquire connection: {}", e)))?;

        if let Some(setup) = self.dialect.session_setup() {
            conn.execute(setup.as_str()).await.map_err(|e| {
                RepositoryError::Database(format!("Failed to prepare aggregate session: {}", e))
            })?;
        }

        Ok(conn)
    }
}

/// Per-app query: bindings grouped by app with their URLs string-aggregated.
pub fn app_drains_sql(dialect: &dyn AggregationDialect) -> String {
    format!(
        r#"
        SELECT
            apps.guid AS app_guid,
            apps.name AS app_name,
            spaces.name AS space_name,
            organizations.name AS organization_name,
            {urls} AS syslog_drain_urls
        FROM apps
        JOIN service_bindings ON service_bindings.app_guid = apps.guid
        JOIN spaces ON spaces.guid = apps.space_guid
        JOIN organizations ON organizations.id = spaces.organization_id
        WHERE {present}
        GROUP BY apps.guid, apps.name, spaces.name, organizations.name
        ORDER BY apps.guid
        LIMIT {limit} OFFSET {offset}
        "#,
        urls = dialect.string_agg("service_bindings.syslog_drain_url"),
        present = DRAIN_URL_PRESENT,
        limit = dialect.placeholder(1),
        offset = dialect.placeholder(2),
    )
}

/// Per-destination query: one page of the distinct, ordered URL set as a
/// derived table, fanned out to every binding on those URLs.
///
/// The page size only ever reaches the two LIMIT/OFFSET binds, so large
/// batches never hit a bind-parameter ceiling.
pub fn destination_bindings_sql(dialect: &dyn AggregationDialect) -> String {
    format!(
        r#"
        SELECT
            service_bindings.syslog_drain_url AS syslog_drain_url,
            service_bindings.credentials AS credentials,
            service_bindings.salt AS salt,
            service_bindings.encryption_key_label AS encryption_key_label,
            {iterations} AS encryption_iterations,
            service_bindings.app_guid AS app_guid,
            apps.name AS app_name,
            spaces.name AS space_name,
            organizations.name AS organization_name
        FROM service_bindings
        JOIN (
            SELECT DISTINCT service_bindings.syslog_drain_url AS url
            FROM service_bindings
            WHERE {present}
            ORDER BY service_bindings.syslog_drain_url
            LIMIT {limit} OFFSET {offset}
        ) drain_page ON drain_page.url = service_bindings.syslog_drain_url
        JOIN apps ON apps.guid = service_bindings.app_guid
        JOIN spaces ON spaces.guid = apps.space_guid
        JOIN organizations ON organizations.id = spaces.organization_id
        ORDER BY service_bindings.syslog_drain_url, service_bindings.id
        "#,
        iterations = dialect.bigint("service_bindings.encryption_iterations"),
        present = DRAIN_URL_PRESENT,
        limit = dialect.placeholder(1),
        offset = dialect.placeholder(2),
    )
}

fn column<'r, T>(row: &'r AnyRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, Any> + sqlx::Type<Any>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::MalformedRow(format!("column {}: {}", name, e)))
}

/// Nullable string column that may arrive as TEXT or as BLOB.
///
/// MySQL reports long `GROUP_CONCAT` results and TEXT columns with a blob
/// wire type, which the `Any` driver will not decode as `String`.
fn text_column(row: &AnyRow, name: &str) -> Result<Option<String>, RepositoryError> {
    if let Ok(text) = row.try_get::<Option<String>, _>(name) {
        return Ok(text);
    }

    match column::<Option<Vec<u8>>>(row, name)? {
        Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
            RepositoryError::MalformedRow(format!("column {}: invalid UTF-8: {}", name, e))
        }),
        None => Ok(None),
    }
}

fn required_text(row: &AnyRow, name: &str) -> Result<String, RepositoryError> {
    text_column(row, name)?
        .ok_or_else(|| RepositoryError::MalformedRow(format!("column {}: unexpected NULL", name)))
}

fn app_drain_row(row: &AnyRow) -> Result<AppDrainRow, RepositoryError> {
    Ok(AppDrainRow {
        app_guid: required_text(row, "app_guid")?,
        app_name: required_text(row, "app_name")?,
        space_name: required_text(row, "space_name")?,
        org_name: required_text(row, "organization_name")?,
        syslog_drain_urls: text_column(row, "syslog_drain_urls")?.unwrap_or_default(),
    })
}

fn binding_row(row: &AnyRow) -> Result<BindingRow, RepositoryError> {
    Ok(BindingRow {
        app_guid: required_text(row, "app_guid")?,
        app_name: required_text(row, "app_name")?,
        space_name: required_text(row, "space_name")?,
        org_name: required_text(row, "organization_name")?,
        syslog_drain_url: required_text(row, "syslog_drain_url")?,
        credentials: StoredCredentials {
            blob: text_column(row, "credentials")?,
            salt: text_column(row, "salt")?,
            encryption_key_label: text_column(row, "encryption_key_label")?,
            encryption_iterations: column(row, "encryption_iterations")?,
        },
    })
}

#[async_trait]
impl DrainBindingRepository for SqlDrainBindingRepository {
    async fn app_drain_page(&self, cursor: PageCursor) -> Result<Vec<AppDrainRow>, RepositoryError> {
        let mut conn = self.session().await?;
        let sql = app_drains_sql(self.dialect.as_ref());

        let query = sqlx::query(&sql).bind(cursor.limit()).bind(cursor.offset());
        let rows = conn
            .fetch_all(query)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to list app drains: {}", e)))?;

        rows.iter().map(app_drain_row).collect()
    }

    async fn destination_binding_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Vec<BindingRow>, RepositoryError> {
        let mut conn = self.session().await?;
        let sql = destination_bindings_sql(self.dialect.as_ref());

        let query = sqlx::query(&sql).bind(cursor.limit()).bind(cursor.offset());
        let rows = conn.fetch_all(query).await.map_err(|e| {
            RepositoryError::Database(format!("Failed to list destination bindings: {}", e))
        })?;

        rows.iter().map(binding_row).collect()
    }
}
