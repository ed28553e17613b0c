//! HTTP route handlers
//!
//! - `page`: the HTML form and its result view
//! - `predict`: the JSON prediction API
//! - `health`: liveness, readiness and metrics

pub mod health;
pub mod page;
pub mod predict;

use crate::error::ServerError;

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
