//! Page operations for the Confluence API.

use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{ContentList, NewPage, Page, PageList, PageUpdate};

impl ConfluenceClient {
    /// Get page by ID with optional field expansion.
    pub(crate) fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError> {
        let mut url = format!("{}/content/{}", self.api_url(), page_id);

        if !expand.is_empty() {
            url.push_str("?expand=");
            url.push_str(&expand.join(","));
        }

        info!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status == 404 {
            return Err(ConfluenceError::NotFound {
                content_id: page_id.to_owned(),
            });
        }
        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }

    /// Search content by space key and/or title.
    pub(crate) fn find_content(
        &self,
        space_key: Option<&str>,
        title: Option<&str>,
        expand: &[&str],
    ) -> Result<ContentList, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!(
            "Searching content by space {:?} and title {:?}",
            space_key, title
        );

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json");
        if let Some(space_key) = space_key {
            request = request.query("spaceKey", space_key);
        }
        if let Some(title) = title {
            request = request.query("title", title);
        }
        if !expand.is_empty() {
            request = request.query("expand", &expand.join(","));
        }

        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let content: ContentList = body_reader.read_json()?;
        info!("Found {} page(s)", content.size);
        Ok(content)
    }

    /// List direct child pages of the given content.
    pub(crate) fn child_pages(&self, page_id: &str) -> Result<PageList, ConfluenceError> {
        let url = format!("{}/content/{}/child/page", self.api_url(), page_id);

        info!("Getting child pages of {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let children: PageList = body_reader.read_json()?;
        info!("Found {} child page(s) under {}", children.size, page_id);
        Ok(children)
    }

    /// Run a CQL search.
    pub(crate) fn search(&self, cql: &str) -> Result<PageList, ConfluenceError> {
        let url = format!("{}/content/search", self.api_url());

        info!("Searching content with CQL: {}", cql);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .query("cql", cql)
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }

    /// Create a page.
    pub(crate) fn create_page(&self, page: &NewPage<'_>) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        let mut payload = json!({
            "type": "page",
            "space": {"key": page.space_key},
            "title": page.title,
            "body": {
                "storage": {
                    "value": page.body,
                    "representation": "storage"
                }
            }
        });

        if let Some(ancestor_id) = page.ancestor_id {
            payload["ancestors"] = json!([{"id": ancestor_id}]);
        }

        info!("Creating page '{}/{}'", page.space_key, page.title);

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let created: Page = body_reader.read_json()?;
        info!("Created page {} ('{}')", created.id, created.title);
        Ok(created)
    }

    /// Update an existing page (writes `version + 1`).
    pub(crate) fn update_page(
        &self,
        page_id: &str,
        update: &PageUpdate<'_>,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let mut payload = json!({
            "id": page_id,
            "type": "page",
            "space": {"key": update.space_key},
            "title": update.title,
            "body": {
                "storage": {
                    "value": update.body,
                    "representation": "storage"
                }
            },
            "version": {"number": update.version + 1}
        });

        if let Some(ancestor_id) = update.ancestor_id {
            payload["ancestors"] = json!([{"id": ancestor_id}]);
        }

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            update.version,
            update.version + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let page: Page = body_reader.read_json()?;
        info!("Updated page {} to version {}", page_id, page.version.number);
        Ok(page)
    }

    /// Delete content by ID.
    pub(crate) fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Deleting page {}", page_id);

        let response = self
            .agent
            .delete(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status == 404 {
            return Err(ConfluenceError::NotFound {
                content_id: page_id.to_owned(),
            });
        }
        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(())
    }
}
