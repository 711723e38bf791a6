//! Label operations for the Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Label, LabelList};

impl ConfluenceClient {
    /// Get all labels on a page.
    pub(crate) fn labels(&self, page_id: &str) -> Result<LabelList, ConfluenceError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        info!("Getting labels for page {}", page_id);

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

        let labels: LabelList = body_reader.read_json()?;
        info!("Found {} label(s) on page {}", labels.size, page_id);
        Ok(labels)
    }

    /// Add labels to a page.
    pub(crate) fn add_labels(
        &self,
        page_id: &str,
        labels: &[Label],
    ) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        info!("Adding {} label(s) to page {}", labels.len(), page_id);

        let payload_bytes = serde_json::to_vec(labels)?;

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

        Ok(())
    }
}
