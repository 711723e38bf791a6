//! Confluence attachment types.

use serde::Deserialize;

use super::Links;

/// Content attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment filename.
    pub title: String,
    /// Hypermedia links; `download` is the relative download path.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Attachment {
    /// Relative download link for the attachment data, if present.
    #[must_use]
    pub fn download_link(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.download.as_deref())
    }
}

/// Attachments API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachmentList {
    /// Attachments on the content.
    #[serde(default)]
    pub results: Vec<Attachment>,
    /// Result count.
    #[serde(default)]
    pub size: usize,
}
