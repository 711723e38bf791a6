//! Confluence label types.

use serde::{Deserialize, Serialize};

/// Content label.
///
/// Serialized form doubles as the `POST /content/{id}/label` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    /// Label prefix ("global" for ordinary labels).
    pub prefix: String,
    /// Label name.
    pub name: String,
}

/// Labels API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelList {
    /// Labels on the content.
    #[serde(default)]
    pub results: Vec<Label>,
    /// Result count.
    #[serde(default)]
    pub size: usize,
}
