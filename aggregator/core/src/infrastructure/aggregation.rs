// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Bulk String Aggregation Dialects
//!
//! SQL fragments that differ between the supported binding stores. One
//! dialect is selected at startup from the resolved [`DatabaseEngine`] and
//! threaded into the repository; nothing dispatches on the backend per
//! request.
//!
//! | Engine | Aggregate | Session setup |
//! |--------|-----------|---------------|
//! | PostgreSQL | `string_agg(col, ',')` | none |
//! | MySQL | `GROUP_CONCAT(col)` | `SET SESSION group_concat_max_len = N` |

use std::sync::Arc;

use crate::domain::config::DatabaseEngine;

pub trait AggregationDialect: Send + Sync {
    fn engine(&self) -> DatabaseEngine;

    /// Comma-joining aggregate over `column`.
    fn string_agg(&self, column: &str) -> String;

    /// Statement that must run on the same session before an aggregate query.
    fn session_setup(&self) -> Option<String>;

    /// Bind placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// `expr` cast to a 64-bit integer.
    fn bigint(&self, expr: &str) -> String;
}

pub struct PostgresDialect;

impl AggregationDialect for PostgresDialect {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Postgres
    }

    fn string_agg(&self, column: &str) -> String {
        format!("string_agg({}, ',')", column)
    }

    fn session_setup(&self) -> Option<String> {
        None
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bigint(&self, expr: &str) -> String {
        format!("CAST({} AS BIGINT)", expr)
    }
}

pub struct MySqlDialect {
    group_concat_max_len: u64,
}

impl MySqlDialect {
    pub fn new(group_concat_max_len: u64) -> Self {
        Self {
            group_concat_max_len,
        }
    }
}

impl AggregationDialect for MySqlDialect {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::MySql
    }

    fn string_agg(&self, column: &str) -> String {
        format!("GROUP_CONCAT({})", column)
    }

    fn session_setup(&self) -> Option<String> {
        Some(format!(
            "SET SESSION group_concat_max_len = {}",
            self.group_concat_max_len
        ))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bigint(&self, expr: &str) -> String {
        format!("CAST({} AS SIGNED)", expr)
    }
}

pub fn dialect_for(engine: DatabaseEngine, group_concat_max_len: u64) -> Arc<dyn AggregationDialect> {
    match engine {
        DatabaseEngine::Postgres => Arc::new(PostgresDialect),
        DatabaseEngine::MySql => Arc::new(MySqlDialect::new(group_concat_max_len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_fragments() {
        let dialect = dialect_for(DatabaseEngine::Postgres, 10);
        assert_eq!(dialect.engine(), DatabaseEngine::Postgres);
        assert_eq!(
            dialect.string_agg("service_bindings.syslog_drain_url"),
            "string_agg(service_bindings.syslog_drain_url, ',')"
        );
        assert_eq!(dialect.session_setup(), None);
        assert_eq!(dialect.placeholder(2), "$2");
    }

    #[test]
    fn test_mysql_widens_session_limit() {
        let dialect = dialect_for(DatabaseEngine::MySql, 1_000_000_000);
        assert_eq!(dialect.string_agg("url"), "GROUP_CONCAT(url)");
        assert_eq!(
            dialect.session_setup().as_deref(),
            Some("SET SESSION group_concat_max_len = 1000000000")
        );
        assert_eq!(dialect.placeholder(7), "?");
        assert_eq!(dialect.bigint("x"), "CAST(x AS SIGNED)");
    }
}
