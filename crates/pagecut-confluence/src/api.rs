//! Remote API abstraction.
//!
//! Provides the [`ContentApi`] trait for abstracting the Confluence REST
//! backend. This enables:
//!
//! - **Unit testing** without a live Confluence instance
//! - **Dry-run composition**: [`DryRun`](crate::DryRun) wraps any
//!   implementation and suppresses the mutating half of the trait
//!
//! The trait is split into read operations, which every wrapper must pass
//! through unchanged, and mutating operations (the `create_*`/`update_*`/
//! `delete_*` set), which a wrapper may suppress.

use crate::error::ConfluenceError;
use crate::types::{AttachmentList, ContentList, Label, LabelList, NewPage, Page, PageList, PageUpdate};

/// Remote content API consumed by the tree operations.
///
/// Mutating operations that normally return the written record return
/// `Option` instead: `None` means the call was suppressed (dry-run) and no
/// record exists. Callers must not assume a value is present.
pub trait ContentApi {
    /// Get content by ID with optional field expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::NotFound`] when the remote system reports
    /// no such content, or another [`ConfluenceError`] on transport failure.
    fn get_content_by_id(&self, content_id: &str, expand: &[&str])
    -> Result<Page, ConfluenceError>;

    /// Search content by space key and/or title, with field expansion.
    ///
    /// Either parameter may be `None`; passing both `None` returns whatever
    /// the server lists first. No pagination is performed.
    fn get_content(
        &self,
        space_key: Option<&str>,
        title: Option<&str>,
        expand: &[&str],
    ) -> Result<ContentList, ConfluenceError>;

    /// List direct child pages of the given content (type = page).
    ///
    /// An empty result set means the content is a leaf.
    fn get_child_pages(&self, content_id: &str) -> Result<PageList, ConfluenceError>;

    /// Run a CQL search and return abbreviated results.
    fn search_content(&self, cql: &str) -> Result<PageList, ConfluenceError>;

    /// List labels on the given content.
    fn get_labels(&self, content_id: &str) -> Result<LabelList, ConfluenceError>;

    /// List attachments on the given content.
    fn get_attachments(&self, content_id: &str) -> Result<AttachmentList, ConfluenceError>;

    /// Download attachment data via its relative download link.
    fn download_attachment(&self, download_link: &str) -> Result<Vec<u8>, ConfluenceError>;

    /// Create a page.
    ///
    /// Returns `None` iff the call was suppressed by a dry-run wrapper.
    fn create_content(&self, page: &NewPage<'_>) -> Result<Option<Page>, ConfluenceError>;

    /// Update an existing page, writing `update.version + 1`.
    ///
    /// Returns `None` iff the call was suppressed by a dry-run wrapper.
    fn update_content_by_id(
        &self,
        content_id: &str,
        update: &PageUpdate<'_>,
    ) -> Result<Option<Page>, ConfluenceError>;

    /// Add labels to the given content.
    fn create_labels(&self, content_id: &str, labels: &[Label]) -> Result<(), ConfluenceError>;

    /// Upload a new attachment to the given content.
    fn create_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError>;

    /// Replace the data of an existing attachment.
    fn update_attachment(
        &self,
        content_id: &str,
        attachment_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError>;

    /// Delete content by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::NotFound`] when the remote system reports
    /// no such content. The remote system may reject deleting a page that
    /// still has children; callers are expected to delete children first.
    fn delete_content_by_id(&self, content_id: &str) -> Result<(), ConfluenceError>;
}
