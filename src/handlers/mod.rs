//! HTTP handlers, one per API route.

pub mod accounts;
pub mod lookups;
pub mod members;

use crate::error::AppError;

/// Numeric id path segment. Rejects with a JSON error body rather than axum's plain-text rejection.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("invalid id: {}", id_str)))
}
