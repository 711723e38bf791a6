//! Page references.

use std::fmt;

/// Identifies a page to resolve.
///
/// An ID-based reference is authoritative: callers that have an ID should
/// always prefer it over a space/title pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    /// Reference by content ID.
    ById {
        /// Content ID.
        content_id: String,
    },
    /// Reference by title, optionally narrowed to a space.
    BySpaceTitle {
        /// Space key to search in, or `None` to search by title alone.
        space_key: Option<String>,
        /// Page title. Should unambiguously determine the page.
        title: String,
    },
}

impl PageRef {
    /// Reference a page by its content ID.
    pub fn by_id(content_id: impl Into<String>) -> Self {
        Self::ById {
            content_id: content_id.into(),
        }
    }

    /// Reference a page by title, optionally narrowed to a space.
    pub fn by_space_title(space_key: Option<String>, title: impl Into<String>) -> Self {
        Self::BySpaceTitle {
            space_key,
            title: title.into(),
        }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById { content_id } => write!(f, "id '{content_id}'"),
            Self::BySpaceTitle {
                space_key: Some(space_key),
                title,
            } => write!(f, "'{space_key}/{title}'"),
            Self::BySpaceTitle {
                space_key: None,
                title,
            } => write!(f, "title '{title}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_by_id() {
        assert_eq!(PageRef::by_id("123").to_string(), "id '123'");
    }

    #[test]
    fn test_display_by_space_title() {
        let reference = PageRef::by_space_title(Some("DOCS".to_owned()), "Home");
        assert_eq!(reference.to_string(), "'DOCS/Home'");
    }

    #[test]
    fn test_display_by_title_only() {
        let reference = PageRef::by_space_title(None, "Home");
        assert_eq!(reference.to_string(), "title 'Home'");
    }
}
