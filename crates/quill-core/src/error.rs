//! Error types shared by the core and its adapters.

use thiserror::Error;
use uuid::Uuid;

/// Business-rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post {0} does not exist")]
    PostNotFound(Uuid),

    /// Only a post's author may change or delete it.
    #[error("user {user_id} is not the author of post {post_id}")]
    NotAuthor { user_id: Uuid, post_id: Uuid },
}

/// Storage failures, whatever the backing store.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// The row addressed by an update or delete does not exist.
    #[error("Entity not found")]
    NotFound,

    /// A unique or foreign-key constraint rejected the write; carries the constraint name.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
