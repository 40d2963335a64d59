//! Library error types.
//!
//! Terminal dispatch states (404, 405, 500) are data, not errors; see
//! [`crate::dispatcher::DispatchOutcome`]. The enums here cover the two
//! places something can genuinely fail: late-bound name resolution against
//! the startup registries, and the database driver seam.

use thiserror::Error;

/// Failure to resolve a late-bound identifier against a startup registry.
///
/// Controller and middleware references are stored as names at registration
/// time and resolved at dispatch time, so a stale reference only surfaces
/// when a request actually hits the route. The messages name the missing
/// identifier; they end up in a 500 body only in debug configurations.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("controller `{0}` is not registered")]
    UnknownController(String),

    #[error("controller `{controller}` has no action `{action}`")]
    UnknownAction { controller: String, action: String },

    #[error("middleware `{0}` is not registered")]
    UnknownMiddleware(String),
}

/// Database-layer failures surfaced by [`crate::db::Connection`] drivers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("driver does not report a last insert id")]
    NoInsertId,
}
