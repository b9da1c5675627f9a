//! Repository error types.

use thiserror::Error;

/// Repository-level errors. Business-rule failures (forbidden, conflict,
/// invalid transition) are decided by the callers that own the invariants;
/// only storage outcomes live here.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),
}
