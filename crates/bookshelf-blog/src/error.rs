//! Blog error types.

use thiserror::Error;

/// Errors from the blog store.
#[derive(Error, Debug)]
pub enum BlogError {
    /// The presented token does not match the configured secret.
    #[error("Unauthorized")]
    Unauthorized,

    /// No admin secret is configured, so writes are refused.
    #[error("Blog writes are disabled: no admin secret configured")]
    WritesDisabled,

    /// Post not found.
    #[error("Blog post not found: {0}")]
    NotFound(String),

    /// Post failed validation.
    #[error("{0}")]
    Invalid(&'static str),

    /// Underlying storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] bookshelf_cache::CacheError),
}
