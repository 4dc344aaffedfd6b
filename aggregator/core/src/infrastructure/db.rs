// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Binding Store Connection Pool
//!
//! Wraps `sqlx::AnyPool` in a thin `Database` newtype carrying the resolved
//! aggregation engine and its dialect, so repositories never inspect the
//! backend themselves.
//!
//! Engine resolution happens here, once, at startup. An unsupported engine
//! refuses to connect rather than serving truncated aggregates later.

use std::sync::Arc;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use thiserror::Error;

use crate::domain::config::{DatabaseConfig, DatabaseEngine, EngineError};
use crate::infrastructure::aggregation::{dialect_for, AggregationDialect};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("database.engine is {configured} but the URL points at {url}")]
    EngineMismatch {
        configured: DatabaseEngine,
        url: DatabaseEngine,
    },

    #[error("Failed to connect to binding store: {0}")]
    Connect(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
    dialect: Arc<dyn AggregationDialect>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let engine = resolve_engine(config)?;
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(DatabaseError::Connect)?;

        tracing::info!(engine = %engine, "Connected to binding store");

        Ok(Self {
            pool,
            dialect: dialect_for(engine, config.group_concat_max_len),
        })
    }

    pub fn get_pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Arc<dyn AggregationDialect> {
        self.dialect.clone()
    }
}

/// Resolve the engine and make sure an explicit `engine` agrees with the URL.
pub fn resolve_engine(config: &DatabaseConfig) -> Result<DatabaseEngine, DatabaseError> {
    let engine = config.engine()?;
    let url_engine = DatabaseEngine::from_url(&config.url)?;
    if engine != url_engine {
        return Err(DatabaseError::EngineMismatch {
            configured: engine,
            url: url_engine,
        });
    }
    Ok(engine)
}
