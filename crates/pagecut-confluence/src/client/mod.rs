//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence Server/Data Center REST
//! API with HTTP Basic authentication.

mod attachments;
mod labels;
mod pages;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ureq::Agent;

use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{
    AttachmentList, ContentList, Label, LabelList, NewPage, Page, PageList, PageUpdate,
};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client for the given endpoint and Basic credentials.
    ///
    /// # Arguments
    /// * `base_url` - Confluence server base URL
    /// * `username` - Username for HTTP Basic authentication
    /// * `password` - Password for HTTP Basic authentication
    #[must_use]
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = BASE64.encode(format!("{username}:{password}"));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }
}

impl ContentApi for ConfluenceClient {
    fn get_content_by_id(
        &self,
        content_id: &str,
        expand: &[&str],
    ) -> Result<Page, ConfluenceError> {
        self.get_page(content_id, expand)
    }

    fn get_content(
        &self,
        space_key: Option<&str>,
        title: Option<&str>,
        expand: &[&str],
    ) -> Result<ContentList, ConfluenceError> {
        self.find_content(space_key, title, expand)
    }

    fn get_child_pages(&self, content_id: &str) -> Result<PageList, ConfluenceError> {
        self.child_pages(content_id)
    }

    fn search_content(&self, cql: &str) -> Result<PageList, ConfluenceError> {
        self.search(cql)
    }

    fn get_labels(&self, content_id: &str) -> Result<LabelList, ConfluenceError> {
        self.labels(content_id)
    }

    fn get_attachments(&self, content_id: &str) -> Result<AttachmentList, ConfluenceError> {
        self.attachments(content_id)
    }

    fn download_attachment(&self, download_link: &str) -> Result<Vec<u8>, ConfluenceError> {
        self.download(download_link)
    }

    fn create_content(&self, page: &NewPage<'_>) -> Result<Option<Page>, ConfluenceError> {
        self.create_page(page).map(Some)
    }

    fn update_content_by_id(
        &self,
        content_id: &str,
        update: &PageUpdate<'_>,
    ) -> Result<Option<Page>, ConfluenceError> {
        self.update_page(content_id, update).map(Some)
    }

    fn create_labels(&self, content_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        self.add_labels(content_id, labels)
    }

    fn create_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        self.upload_new_attachment(content_id, filename, data)
    }

    fn update_attachment(
        &self,
        content_id: &str,
        attachment_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        self.upload_attachment_data(content_id, attachment_id, filename, data)
    }

    fn delete_content_by_id(&self, content_id: &str) -> Result<(), ConfluenceError> {
        self.delete_page(content_id)
    }
}
