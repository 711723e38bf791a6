//! Copier error types.

use crate::error::ConfluenceError;

/// Error from a tree copy run.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Confluence API error.
    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    /// Space/title search matched no pages.
    #[error("no page found for {reference}")]
    SourceNotFound {
        /// The reference that failed to resolve.
        reference: String,
    },

    /// Space/title search matched more than one page.
    #[error(
        "unexpected result count {count}, possibly you have to specify a space to search in \
         (results include these spaces: {spaces})"
    )]
    AmbiguousSource {
        /// Number of matching pages.
        count: usize,
        /// Comma-separated space keys of the matches.
        spaces: String,
    },

    /// Destination page already exists and overwrite is disabled.
    #[error("can't copy to '{space_key}/{title}' as it already exists")]
    DestinationExists {
        /// Destination space key.
        space_key: String,
        /// Destination title.
        title: String,
    },

    /// Source page record carries no space and no destination was given.
    #[error("source page {content_id} has no space; pass --dst-space")]
    MissingSourceSpace {
        /// Source page ID.
        content_id: String,
    },

    /// Title template produced an invalid counter pattern.
    #[error("title pattern error")]
    Pattern(#[from] regex::Error),
}
