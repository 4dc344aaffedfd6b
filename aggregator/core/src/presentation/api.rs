// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP routes for the internal syslog drain endpoints.
//!
//! Mutual TLS is terminated in front of this service; requests reaching the
//! router are already authorized.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::SyslogDrainService;
use crate::domain::cursor::{PageCursor, PageCursorError};
use crate::presentation::error::ApiError;

pub struct AppState {
    pub drain_service: Arc<dyn SyslogDrainService>,
}

pub fn app(service: Arc<dyn SyslogDrainService>) -> Router {
    let state = Arc::new(AppState {
        drain_service: service,
    });

    Router::new()
        .route("/health", get(health))
        .route("/internal/v4/syslog_drain_urls", get(list_app_drains))
        .route("/internal/v5/syslog_drain_urls", get(list_drain_destinations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw paging parameters; parsed by [`PageCursor`] so bad input gets our error body.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub next_id: Option<String>,
    pub batch_size: Option<String>,
}

impl PageParams {
    fn cursor(&self) -> Result<PageCursor, PageCursorError> {
        PageCursor::from_params(self.next_id.as_deref(), self.batch_size.as_deref())
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

fn pretty_json<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_string_pretty(value)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn list_app_drains(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let cursor = params.cursor()?;
    let page = state.drain_service.list_app_drains(cursor).await?;
    pretty_json(&page)
}

async fn list_drain_destinations(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let cursor = params.cursor()?;
    let page = state.drain_service.list_drain_destinations(cursor).await?;
    pretty_json(&page)
}
