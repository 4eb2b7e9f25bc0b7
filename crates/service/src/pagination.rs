//! Pagination utilities for service layer
//!
//! Offset/limit window used by the course listing.

use crate::errors::ServiceError;

pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// max rows returned
    pub limit: u64,
    /// rows skipped from the start of the id-ordered listing
    pub offset: u64,
}

impl Pagination {
    /// Fill missing query parameters with the defaults. Negative values are
    /// rejected; the store binds both as signed 64-bit integers.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Result<Self, ServiceError> {
        Ok(Self {
            limit: non_negative("limit", limit)?.unwrap_or(DEFAULT_LIMIT),
            offset: non_negative("offset", offset)?.unwrap_or(0),
        })
    }
}

fn non_negative(field: &str, v: Option<i64>) -> Result<Option<u64>, ServiceError> {
    match v {
        Some(n) => u64::try_from(n)
            .map(Some)
            .map_err(|_| ServiceError::Validation(format!("{field} must be >= 0"))),
        None => Ok(None),
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { limit: DEFAULT_LIMIT, offset: 0 } }
}
