//! Deleter error types.

use crate::error::ConfluenceError;

/// Error from a tree deletion run.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// Confluence API error.
    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    /// Deletion only resolves pages by ID.
    #[error("cannot delete by {reference}: deletion requires a page id (use --src-id)")]
    UnsupportedReference {
        /// The reference that could not be resolved.
        reference: String,
    },
}
