//! Attachment operations for the Confluence API.

use rand::RngExt;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::AttachmentList;

impl ConfluenceClient {
    /// List attachments on a page.
    pub(crate) fn attachments(&self, page_id: &str) -> Result<AttachmentList, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        info!("Getting attachments for page {}", page_id);

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

        Ok(body_reader.read_json()?)
    }

    /// Download attachment data via its relative download link.
    pub(crate) fn download(&self, download_link: &str) -> Result<Vec<u8>, ConfluenceError> {
        let url = format!("{}{}", self.base_url, download_link);

        info!("Downloading attachment from {}", download_link);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
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

        Ok(body_reader.read_to_vec()?)
    }

    /// Upload a new attachment to a page.
    pub(crate) fn upload_new_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);
        info!("Uploading new attachment '{}' to page {}", filename, page_id);
        self.post_multipart(&url, filename, data)
    }

    /// Replace the data of an existing attachment.
    pub(crate) fn upload_attachment_data(
        &self,
        page_id: &str,
        attachment_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/attachment/{}/data",
            self.api_url(),
            page_id,
            attachment_id
        );
        info!(
            "Updating existing attachment '{}' (id={}) on page {}",
            filename, attachment_id, page_id
        );
        self.post_multipart(&url, filename, data)
    }

    /// POST a single-file multipart form to an attachment endpoint.
    fn post_multipart(
        &self,
        url: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        // Build multipart form data manually
        let boundary = format!("----PagecutFormBoundary{:016x}", rand::rng().random::<u64>());
        let mut body = Vec::new();

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

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
