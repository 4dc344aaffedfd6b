// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Page Cursor
//!
//! Offset + page-size pair that bounds how much of an ordered result set a
//! single list call materializes. This is an offset over a live query
//! ordering, not a snapshot: rows inserted or deleted between two calls can
//! shift the window.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Parse caller-supplied paging parameters and compute the next token

use thiserror::Error;

/// Offset used when the caller omits `next_id`.
pub const DEFAULT_OFFSET: i64 = 0;

/// Page size used when the caller omits `batch_size`.
pub const DEFAULT_BATCH_SIZE: i64 = 50;

/// Client input errors raised while parsing paging parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageCursorError {
    #[error("{param} must be an integer, got {value:?}")]
    NotAnInteger { param: &'static str, value: String },

    #[error("next_id must not be negative, got {0}")]
    NegativeOffset(i64),

    #[error("batch_size must be positive, got {0}")]
    NonPositiveBatchSize(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    offset: i64,
    limit: i64,
}

impl PageCursor {
    pub fn new(offset: i64, limit: i64) -> Result<Self, PageCursorError> {
        if offset < 0 {
            return Err(PageCursorError::NegativeOffset(offset));
        }
        if limit <= 0 {
            return Err(PageCursorError::NonPositiveBatchSize(limit));
        }
        Ok(Self { offset, limit })
    }

    /// Build a cursor from the raw `next_id` / `batch_size` request values.
    ///
    /// Missing values fall back to [`DEFAULT_OFFSET`] and
    /// [`DEFAULT_BATCH_SIZE`]; present values must parse as decimal integers.
    pub fn from_params(
        next_id: Option<&str>,
        batch_size: Option<&str>,
    ) -> Result<Self, PageCursorError> {
        let offset = match next_id {
            Some(raw) => parse_param("next_id", raw)?,
            None => DEFAULT_OFFSET,
        };
        let limit = match batch_size {
            Some(raw) => parse_param("batch_size", raw)?,
            None => DEFAULT_BATCH_SIZE,
        };
        Self::new(offset, limit)
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Cursor for the following page, or `None` once a page comes back empty.
    pub fn advance(self, page_was_empty: bool) -> Option<PageCursor> {
        if page_was_empty {
            return None;
        }
        Some(PageCursor {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        })
    }

    /// The `next_id` token to hand back to the caller.
    pub fn next_id(self, page_was_empty: bool) -> Option<i64> {
        self.advance(page_was_empty).map(|next| next.offset)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_BATCH_SIZE,
        }
    }
}

fn parse_param(param: &'static str, raw: &str) -> Result<i64, PageCursorError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PageCursorError::NotAnInteger {
            param,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let cursor = PageCursor::from_params(None, None).unwrap();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.limit(), 50);
        assert_eq!(cursor, PageCursor::default());
    }

    #[test]
    fn test_parses_supplied_values() {
        let cursor = PageCursor::from_params(Some("100"), Some(" 25 ")).unwrap();
        assert_eq!(cursor.offset(), 100);
        assert_eq!(cursor.limit(), 25);
    }

    #[test]
    fn test_rejects_non_integer() {
        let err = PageCursor::from_params(Some("abc"), None).unwrap_err();
        assert_eq!(
            err,
            PageCursorError::NotAnInteger {
                param: "next_id",
                value: "abc".to_string()
            }
        );

        let err = PageCursor::from_params(None, Some("1.5")).unwrap_err();
        assert!(matches!(
            err,
            PageCursorError::NotAnInteger { param: "batch_size", .. }
        ));

        assert!(PageCursor::from_params(Some(""), None).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            PageCursor::from_params(Some("-1"), None).unwrap_err(),
            PageCursorError::NegativeOffset(-1)
        );
        assert_eq!(
            PageCursor::from_params(None, Some("0")).unwrap_err(),
            PageCursorError::NonPositiveBatchSize(0)
        );
    }

    #[test]
    fn test_advance() {
        let cursor = PageCursor::new(50, 50).unwrap();
        assert_eq!(cursor.advance(false), Some(PageCursor::new(100, 50).unwrap()));
        assert_eq!(cursor.advance(true), None);
        assert_eq!(cursor.next_id(false), Some(100));
        assert_eq!(cursor.next_id(true), None);
    }

    #[test]
    fn test_advance_saturates() {
        let cursor = PageCursor::new(i64::MAX - 1, 10).unwrap();
        assert_eq!(cursor.next_id(false), Some(i64::MAX));
    }
}
