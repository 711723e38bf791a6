//! Mock API implementation for testing.
//!
//! Provides [`MockContentApi`] for unit testing without a live Confluence
//! instance. Every mutating call is recorded in order, so tests can assert
//! call ordering and dry-run suppression.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{
    Ancestor, Attachment, AttachmentList, Body, ContentList, Label, LabelList, Links, NewPage,
    Page, PageList, PageSummary, PageUpdate, Space, Storage, Version,
};

/// A mutating call that reached the mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `create_content` reached the transport.
    CreateContent {
        /// Destination space key.
        space_key: String,
        /// New page title.
        title: String,
    },
    /// `update_content_by_id` reached the transport.
    UpdateContent {
        /// Updated page ID.
        content_id: String,
    },
    /// `create_labels` reached the transport.
    CreateLabels {
        /// Target page ID.
        content_id: String,
        /// Labels added.
        labels: Vec<Label>,
    },
    /// `create_attachment` reached the transport.
    CreateAttachment {
        /// Target page ID.
        content_id: String,
        /// Uploaded filename.
        filename: String,
    },
    /// `update_attachment` reached the transport.
    UpdateAttachment {
        /// Target page ID.
        content_id: String,
        /// Replaced attachment ID.
        attachment_id: String,
    },
    /// `delete_content_by_id` reached the transport.
    DeleteContent {
        /// Deleted page ID.
        content_id: String,
    },
}

/// Mock content API for testing.
///
/// Stores a page tree in memory. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use pagecut_confluence::mock::MockContentApi;
///
/// let api = MockContentApi::new()
///     .with_page("1", "Root")
///     .with_page("2", "Child")
///     .with_child("1", "2");
/// ```
#[derive(Debug, Default)]
pub struct MockContentApi {
    pages: RwLock<HashMap<String, Page>>,
    children: RwLock<HashMap<String, Vec<String>>>,
    labels: RwLock<HashMap<String, Vec<Label>>>,
    attachments: RwLock<HashMap<String, Vec<Attachment>>>,
    downloads: RwLock<HashMap<String, Vec<u8>>>,
    search_results: RwLock<Vec<PageSummary>>,
    calls: RwLock<Vec<RecordedCall>>,
    resolved_ids: RwLock<Vec<String>>,
    next_id: RwLock<u64>,
}

/// Space key used for builder-created pages until overridden.
const DEFAULT_SPACE: &str = "SRC";

fn make_page(id: &str, title: &str, space_key: &str) -> Page {
    Page {
        id: id.to_owned(),
        content_type: "page".to_owned(),
        title: title.to_owned(),
        version: Version {
            number: 1,
            message: None,
        },
        space: Some(Space {
            key: space_key.to_owned(),
            name: None,
        }),
        ancestors: Vec::new(),
        body: Some(Body {
            storage: Some(Storage {
                value: String::new(),
                representation: "storage".to_owned(),
            }),
        }),
        links: None,
    }
}

impl MockContentApi {
    /// Create a new empty mock API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given ID and title (space `SRC`, version 1).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, id: &str, title: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(id.to_owned(), make_page(id, title, DEFAULT_SPACE));
        self
    }

    /// Move an already-added page into the given space.
    ///
    /// # Panics
    ///
    /// Panics if the page was not added first or the lock is poisoned.
    #[must_use]
    pub fn with_space(self, id: &str, space_key: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .get_mut(id)
            .expect("page must be added before with_space")
            .space = Some(Space {
            key: space_key.to_owned(),
            name: None,
        });
        self
    }

    /// Set the storage-format body of an already-added page.
    ///
    /// # Panics
    ///
    /// Panics if the page was not added first or the lock is poisoned.
    #[must_use]
    pub fn with_body(self, id: &str, html: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .get_mut(id)
            .expect("page must be added before with_body")
            .body = Some(Body {
            storage: Some(Storage {
                value: html.to_owned(),
                representation: "storage".to_owned(),
            }),
        });
        self
    }

    /// Append an ancestor to an already-added page's ancestor chain.
    ///
    /// # Panics
    ///
    /// Panics if the page was not added first or the lock is poisoned.
    #[must_use]
    pub fn with_ancestor(self, id: &str, ancestor_id: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .get_mut(id)
            .expect("page must be added before with_ancestor")
            .ancestors
            .push(Ancestor {
                id: ancestor_id.to_owned(),
            });
        self
    }

    /// Register `child_id` as a direct child page of `parent_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_child(self, parent_id: &str, child_id: &str) -> Self {
        self.children
            .write()
            .unwrap()
            .entry(parent_id.to_owned())
            .or_default()
            .push(child_id.to_owned());
        self
    }

    /// Add a label to a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_label(self, page_id: &str, prefix: &str, name: &str) -> Self {
        self.labels
            .write()
            .unwrap()
            .entry(page_id.to_owned())
            .or_default()
            .push(Label {
                prefix: prefix.to_owned(),
                name: name.to_owned(),
            });
        self
    }

    /// Add an attachment record to a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_attachment(
        self,
        page_id: &str,
        attachment_id: &str,
        filename: &str,
        download_link: &str,
    ) -> Self {
        self.attachments
            .write()
            .unwrap()
            .entry(page_id.to_owned())
            .or_default()
            .push(Attachment {
                id: attachment_id.to_owned(),
                title: filename.to_owned(),
                links: Some(Links {
                    webui: None,
                    download: Some(download_link.to_owned()),
                    self_link: None,
                }),
            });
        self
    }

    /// Register downloadable bytes for an attachment download link.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_download(self, download_link: &str, data: &[u8]) -> Self {
        self.downloads
            .write()
            .unwrap()
            .insert(download_link.to_owned(), data.to_vec());
        self
    }

    /// Set the canned result titles returned by any CQL search.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_search_results(self, titles: &[&str]) -> Self {
        {
            let mut results = self.search_results.write().unwrap();
            *results = titles
                .iter()
                .enumerate()
                .map(|(i, title)| PageSummary {
                    id: format!("search-{i}"),
                    title: (*title).to_owned(),
                })
                .collect();
        }
        self
    }

    /// All mutating calls that reached this mock, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().unwrap().clone()
    }

    /// IDs passed to `delete_content_by_id`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn deleted_ids(&self) -> Vec<String> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::DeleteContent { content_id } => Some(content_id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of times `get_content_by_id` was asked for the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn resolve_count(&self, content_id: &str) -> usize {
        self.resolved_ids
            .read()
            .unwrap()
            .iter()
            .filter(|id| *id == content_id)
            .count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.write().unwrap().push(call);
    }

    fn mint_id(&self) -> String {
        let mut next = self.next_id.write().unwrap();
        *next += 1;
        format!("copy-{next}")
    }
}

impl ContentApi for MockContentApi {
    fn get_content_by_id(
        &self,
        content_id: &str,
        _expand: &[&str],
    ) -> Result<Page, ConfluenceError> {
        self.resolved_ids.write().unwrap().push(content_id.to_owned());
        self.pages
            .read()
            .unwrap()
            .get(content_id)
            .cloned()
            .ok_or_else(|| ConfluenceError::NotFound {
                content_id: content_id.to_owned(),
            })
    }

    fn get_content(
        &self,
        space_key: Option<&str>,
        title: Option<&str>,
        _expand: &[&str],
    ) -> Result<ContentList, ConfluenceError> {
        let pages = self.pages.read().unwrap();
        let mut results: Vec<Page> = pages
            .values()
            .filter(|page| {
                space_key.is_none_or(|key| {
                    page.space.as_ref().is_some_and(|space| space.key == key)
                })
            })
            .filter(|page| title.is_none_or(|title| page.title == title))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(ContentList {
            size: results.len(),
            results,
        })
    }

    fn get_child_pages(&self, content_id: &str) -> Result<PageList, ConfluenceError> {
        let children = self.children.read().unwrap();
        let pages = self.pages.read().unwrap();
        let results: Vec<PageSummary> = children
            .get(content_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| pages.get(id))
                    .map(|page| PageSummary {
                        id: page.id.clone(),
                        title: page.title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(PageList {
            size: results.len(),
            results,
        })
    }

    fn search_content(&self, _cql: &str) -> Result<PageList, ConfluenceError> {
        let results = self.search_results.read().unwrap().clone();
        Ok(PageList {
            size: results.len(),
            results,
        })
    }

    fn get_labels(&self, content_id: &str) -> Result<LabelList, ConfluenceError> {
        let results = self
            .labels
            .read()
            .unwrap()
            .get(content_id)
            .cloned()
            .unwrap_or_default();
        Ok(LabelList {
            size: results.len(),
            results,
        })
    }

    fn get_attachments(&self, content_id: &str) -> Result<AttachmentList, ConfluenceError> {
        let results = self
            .attachments
            .read()
            .unwrap()
            .get(content_id)
            .cloned()
            .unwrap_or_default();
        Ok(AttachmentList {
            size: results.len(),
            results,
        })
    }

    fn download_attachment(&self, download_link: &str) -> Result<Vec<u8>, ConfluenceError> {
        self.downloads
            .read()
            .unwrap()
            .get(download_link)
            .cloned()
            .ok_or(ConfluenceError::HttpResponse {
                status: 404,
                body: format!("no attachment data at {download_link}"),
            })
    }

    fn create_content(&self, page: &NewPage<'_>) -> Result<Option<Page>, ConfluenceError> {
        self.record(RecordedCall::CreateContent {
            space_key: page.space_key.to_owned(),
            title: page.title.to_owned(),
        });

        let id = self.mint_id();
        let mut created = make_page(&id, page.title, page.space_key);
        created.body = Some(Body {
            storage: Some(Storage {
                value: page.body.to_owned(),
                representation: "storage".to_owned(),
            }),
        });
        if let Some(ancestor_id) = page.ancestor_id {
            created.ancestors.push(Ancestor {
                id: ancestor_id.to_owned(),
            });
        }
        self.pages
            .write()
            .unwrap()
            .insert(id.clone(), created.clone());
        Ok(Some(created))
    }

    fn update_content_by_id(
        &self,
        content_id: &str,
        update: &PageUpdate<'_>,
    ) -> Result<Option<Page>, ConfluenceError> {
        self.record(RecordedCall::UpdateContent {
            content_id: content_id.to_owned(),
        });

        let mut pages = self.pages.write().unwrap();
        let page = pages
            .get_mut(content_id)
            .ok_or_else(|| ConfluenceError::NotFound {
                content_id: content_id.to_owned(),
            })?;
        page.title = update.title.to_owned();
        page.version.number = update.version + 1;
        page.body = Some(Body {
            storage: Some(Storage {
                value: update.body.to_owned(),
                representation: "storage".to_owned(),
            }),
        });
        page.ancestors = update
            .ancestor_id
            .map(|id| vec![Ancestor { id: id.to_owned() }])
            .unwrap_or_default();
        Ok(Some(page.clone()))
    }

    fn create_labels(&self, content_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        self.record(RecordedCall::CreateLabels {
            content_id: content_id.to_owned(),
            labels: labels.to_vec(),
        });
        self.labels
            .write()
            .unwrap()
            .entry(content_id.to_owned())
            .or_default()
            .extend_from_slice(labels);
        Ok(())
    }

    fn create_attachment(
        &self,
        content_id: &str,
        filename: &str,
        _data: &[u8],
    ) -> Result<(), ConfluenceError> {
        self.record(RecordedCall::CreateAttachment {
            content_id: content_id.to_owned(),
            filename: filename.to_owned(),
        });
        Ok(())
    }

    fn update_attachment(
        &self,
        content_id: &str,
        attachment_id: &str,
        _filename: &str,
        _data: &[u8],
    ) -> Result<(), ConfluenceError> {
        self.record(RecordedCall::UpdateAttachment {
            content_id: content_id.to_owned(),
            attachment_id: attachment_id.to_owned(),
        });
        Ok(())
    }

    fn delete_content_by_id(&self, content_id: &str) -> Result<(), ConfluenceError> {
        let mut pages = self.pages.write().unwrap();
        if pages.remove(content_id).is_none() {
            return Err(ConfluenceError::NotFound {
                content_id: content_id.to_owned(),
            });
        }
        drop(pages);
        self.record(RecordedCall::DeleteContent {
            content_id: content_id.to_owned(),
        });
        Ok(())
    }
}
