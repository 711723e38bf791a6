//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Space the page belongs to (present when expanded).
    #[serde(default)]
    pub space: Option<Space>,
    /// Ancestor chain, root first (present when expanded).
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Storage-format HTML of the page body, or `""` when not expanded.
    #[must_use]
    pub fn body_html(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Space a page belongs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    /// Space key.
    pub key: String,
    /// Space display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Ancestor reference in a page's ancestor chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Ancestor {
    /// Ancestor page ID.
    pub id: String,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// Relative download link (attachments).
    #[serde(default)]
    pub download: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Abbreviated page returned by child listings and CQL searches.
///
/// Those endpoints return content records without expanded fields, so only
/// the identity fields are kept. Serde ignores the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
}

/// Listing of abbreviated pages (`child/page`, `content/search`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageList {
    /// Pages in this listing.
    #[serde(default)]
    pub results: Vec<PageSummary>,
    /// Result count.
    #[serde(default)]
    pub size: usize,
}

/// Listing of fully expanded pages (`GET /content` by space/title).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentList {
    /// Pages in this listing.
    #[serde(default)]
    pub results: Vec<Page>,
    /// Result count.
    #[serde(default)]
    pub size: usize,
}

/// Payload for creating a page.
#[derive(Debug, Clone)]
pub struct NewPage<'a> {
    /// Destination space key.
    pub space_key: &'a str,
    /// Page title.
    pub title: &'a str,
    /// Storage-format HTML body.
    pub body: &'a str,
    /// Parent page ID, or `None` to create at the space root.
    pub ancestor_id: Option<&'a str>,
}

/// Payload for updating an existing page.
#[derive(Debug, Clone)]
pub struct PageUpdate<'a> {
    /// Destination space key.
    pub space_key: &'a str,
    /// Page title.
    pub title: &'a str,
    /// Storage-format HTML body.
    pub body: &'a str,
    /// Parent page ID, or `None` to detach to the space root.
    pub ancestor_id: Option<&'a str>,
    /// Current version number; the update is written as `version + 1`.
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_expanded_page() {
        let json = r#"{
            "id": "123",
            "type": "page",
            "title": "Release notes",
            "version": {"number": 4},
            "space": {"key": "DOCS", "name": "Documentation"},
            "ancestors": [{"id": "100"}, {"id": "110"}],
            "body": {"storage": {"value": "<p>hi</p>", "representation": "storage"}},
            "_links": {"webui": "/display/DOCS/Release+notes"}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.id, "123");
        assert_eq!(page.version.number, 4);
        assert_eq!(page.space.as_ref().unwrap().key, "DOCS");
        assert_eq!(page.ancestors.len(), 2);
        assert_eq!(page.ancestors[0].id, "100");
        assert_eq!(page.body_html(), "<p>hi</p>");
    }

    #[test]
    fn test_deserialize_child_listing_without_expansion() {
        // child/page results carry no version/space/body
        let json = r#"{
            "results": [
                {"id": "2", "type": "page", "title": "Child A", "status": "current"},
                {"id": "3", "type": "page", "title": "Child B", "status": "current"}
            ],
            "size": 2
        }"#;
        let list: PageList = serde_json::from_str(json).unwrap();
        assert_eq!(list.size, 2);
        assert_eq!(list.results[0].id, "2");
        assert_eq!(list.results[1].title, "Child B");
    }

    #[test]
    fn test_body_html_defaults_to_empty() {
        let json = r#"{"id": "9", "type": "page", "title": "Bare", "version": {"number": 1}}"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.body_html(), "");
        assert!(page.ancestors.is_empty());
    }
}
