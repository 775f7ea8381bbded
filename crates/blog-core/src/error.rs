//! Domain-level error types.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - failures while projecting records to their public shape.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Blog post {post_id} references author {author_id} which was not resolved")]
    UnresolvedAuthor { post_id: Uuid, author_id: Uuid },
}

/// Record store errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Store operation `{operation}` timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}
