// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! API error types and responses

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::application::DrainServiceError;
use crate::domain::cursor::PageCursorError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Binding store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Credential decryption failed: {0}")]
    CredentialDecryption(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::StoreUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_UNAVAILABLE",
                msg,
            ),
            ApiError::CredentialDecryption(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CREDENTIAL_DECRYPTION_FAILED",
                msg,
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PageCursorError> for ApiError {
    fn from(err: PageCursorError) -> Self {
        tracing::warn!(error = %err, "Rejected paging parameters");
        ApiError::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected query string");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DrainServiceError> for ApiError {
    fn from(err: DrainServiceError) -> Self {
        match err {
            DrainServiceError::Store(_) => ApiError::StoreUnavailable(err.to_string()),
            DrainServiceError::Credentials { .. } => ApiError::CredentialDecryption(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("Failed to encode response: {}", err))
    }
}
