//! Dry-run suppression for mutating API calls.
//!
//! [`DryRun`] wraps any [`ContentApi`] implementation. Read operations
//! always pass through; each mutating operation checks the dry-run flag
//! before delegating. While dry-run is active a mutating call logs what it
//! would have done and performs no remote call, so zero mutating calls can
//! reach the wrapped transport for any call pattern.

use tracing::info;

use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{
    AttachmentList, ContentList, Label, LabelList, NewPage, Page, PageList, PageUpdate,
};

/// Wrapper that suppresses the mutating half of [`ContentApi`].
pub struct DryRun<C> {
    inner: C,
    active: bool,
}

impl<C> DryRun<C> {
    /// Wrap `inner`, suppressing mutating calls when `active` is true.
    pub fn new(inner: C, active: bool) -> Self {
        Self { inner, active }
    }

    /// Whether mutating calls are being suppressed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Access the wrapped implementation.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: ContentApi> ContentApi for DryRun<C> {
    fn get_content_by_id(
        &self,
        content_id: &str,
        expand: &[&str],
    ) -> Result<Page, ConfluenceError> {
        self.inner.get_content_by_id(content_id, expand)
    }

    fn get_content(
        &self,
        space_key: Option<&str>,
        title: Option<&str>,
        expand: &[&str],
    ) -> Result<ContentList, ConfluenceError> {
        self.inner.get_content(space_key, title, expand)
    }

    fn get_child_pages(&self, content_id: &str) -> Result<PageList, ConfluenceError> {
        self.inner.get_child_pages(content_id)
    }

    fn search_content(&self, cql: &str) -> Result<PageList, ConfluenceError> {
        self.inner.search_content(cql)
    }

    fn get_labels(&self, content_id: &str) -> Result<LabelList, ConfluenceError> {
        self.inner.get_labels(content_id)
    }

    fn get_attachments(&self, content_id: &str) -> Result<AttachmentList, ConfluenceError> {
        self.inner.get_attachments(content_id)
    }

    fn download_attachment(&self, download_link: &str) -> Result<Vec<u8>, ConfluenceError> {
        self.inner.download_attachment(download_link)
    }

    fn create_content(&self, page: &NewPage<'_>) -> Result<Option<Page>, ConfluenceError> {
        if self.active {
            info!(
                "[DRY-RUN] create_content(space_key={}, title={})",
                page.space_key, page.title
            );
            return Ok(None);
        }
        self.inner.create_content(page)
    }

    fn update_content_by_id(
        &self,
        content_id: &str,
        update: &PageUpdate<'_>,
    ) -> Result<Option<Page>, ConfluenceError> {
        if self.active {
            info!(
                "[DRY-RUN] update_content_by_id({}, title={})",
                content_id, update.title
            );
            return Ok(None);
        }
        self.inner.update_content_by_id(content_id, update)
    }

    fn create_labels(&self, content_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        if self.active {
            info!(
                "[DRY-RUN] create_labels({}, {} label(s))",
                content_id,
                labels.len()
            );
            return Ok(());
        }
        self.inner.create_labels(content_id, labels)
    }

    fn create_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        if self.active {
            info!("[DRY-RUN] create_attachment({content_id}, {filename})");
            return Ok(());
        }
        self.inner.create_attachment(content_id, filename, data)
    }

    fn update_attachment(
        &self,
        content_id: &str,
        attachment_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        if self.active {
            info!("[DRY-RUN] update_attachment({content_id}, {attachment_id}, {filename})");
            return Ok(());
        }
        self.inner
            .update_attachment(content_id, attachment_id, filename, data)
    }

    fn delete_content_by_id(&self, content_id: &str) -> Result<(), ConfluenceError> {
        if self.active {
            info!("[DRY-RUN] delete_content_by_id({content_id})");
            return Ok(());
        }
        self.inner.delete_content_by_id(content_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockContentApi;
    use pretty_assertions::assert_eq;

    fn new_page<'a>() -> NewPage<'a> {
        NewPage {
            space_key: "DST",
            title: "Copy",
            body: "<p>hi</p>",
            ancestor_id: None,
        }
    }

    #[test]
    fn test_active_suppresses_all_mutating_calls() {
        let api = DryRun::new(MockContentApi::new().with_page("1", "Root"), true);

        assert!(api.create_content(&new_page()).unwrap().is_none());
        assert!(
            api.update_content_by_id(
                "1",
                &PageUpdate {
                    space_key: "DST",
                    title: "Copy",
                    body: "<p>hi</p>",
                    ancestor_id: None,
                    version: 1,
                },
            )
            .unwrap()
            .is_none()
        );
        api.create_labels(
            "1",
            &[Label {
                prefix: "global".to_owned(),
                name: "docs".to_owned(),
            }],
        )
        .unwrap();
        api.create_attachment("1", "a.png", b"data").unwrap();
        api.update_attachment("1", "att-1", "a.png", b"data").unwrap();
        api.delete_content_by_id("1").unwrap();

        assert_eq!(api.inner().calls(), vec![]);
    }

    #[test]
    fn test_active_passes_reads_through() {
        let api = DryRun::new(
            MockContentApi::new()
                .with_page("1", "Root")
                .with_page("2", "Child")
                .with_child("1", "2"),
            true,
        );

        let page = api.get_content_by_id("1", &[]).unwrap();
        assert_eq!(page.title, "Root");

        let children = api.get_child_pages("1").unwrap();
        assert_eq!(children.size, 1);
        assert_eq!(children.results[0].id, "2");
    }

    #[test]
    fn test_inactive_delegates_mutating_calls() {
        let api = DryRun::new(MockContentApi::new().with_page("1", "Root"), false);

        let created = api.create_content(&new_page()).unwrap();
        assert!(created.is_some());
        api.delete_content_by_id("1").unwrap();

        let deleted = api.inner().deleted_ids();
        assert_eq!(deleted, vec!["1".to_owned()]);
    }

    #[test]
    fn test_is_active() {
        assert!(DryRun::new(MockContentApi::new(), true).is_active());
        assert!(!DryRun::new(MockContentApi::new(), false).is_active());
    }
}
