//! Arguments shared by the copy and delete commands.

use std::path::PathBuf;

use clap::Args;
use pagecut_config::Config;
use pagecut_confluence::{ConfluenceClient, PageRef};

use crate::error::CliError;

/// Default Confluence endpoint.
const DEFAULT_ENDPOINT: &str = "http://localhost:1990/confluence";
/// Default username for Confluence.
const DEFAULT_USERNAME: &str = "admin";
/// Default password for Confluence.
const DEFAULT_PASSWORD: &str = "admin";

/// Connection flags. CLI values override config values override defaults.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Confluence endpoint base URL.
    #[arg(long)]
    endpoint: Option<String>,

    /// Username for Confluence.
    #[arg(long)]
    username: Option<String>,

    /// Password for Confluence.
    #[arg(long)]
    password: Option<String>,

    /// Path to configuration file (default: auto-discover pagecut.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Build a client from flags, config file and defaults.
    pub(crate) fn client(&self) -> Result<ConfluenceClient, CliError> {
        let config = Config::load(self.config.as_deref())?;
        let confluence = config.confluence.as_ref();

        let endpoint = self
            .endpoint
            .clone()
            .or_else(|| confluence.map(|c| c.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        let username = self
            .username
            .clone()
            .or_else(|| confluence.and_then(|c| c.username.clone()))
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        let password = self
            .password
            .clone()
            .or_else(|| confluence.and_then(|c| c.password.clone()))
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_owned());

        Ok(ConfluenceClient::new(&endpoint, &username, &password))
    }
}

/// Source page selection flags.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Source page id. Using this parameter precisely determines the page
    /// (if it exists). In case this parameter is set, `--src-space` and
    /// `--src-title` parameters are ignored.
    #[arg(long)]
    src_id: Option<String>,

    /// Source page space. This parameter could be skipped, then the page is
    /// searched by title only.
    #[arg(long)]
    src_space: Option<String>,

    /// Source page title. Should unambiguously determine the page.
    #[arg(long)]
    src_title: Option<String>,
}

impl SourceArgs {
    /// Build the page reference from the flags.
    ///
    /// An id wins over space/title; without either, the selection is
    /// rejected before any remote call.
    pub(crate) fn reference(&self) -> Result<PageRef, CliError> {
        if let Some(id) = &self.src_id {
            return Ok(PageRef::by_id(id));
        }
        if let Some(title) = &self.src_title {
            return Ok(PageRef::by_space_title(self.src_space.clone(), title));
        }
        Err(CliError::Validation(
            "either --src-id or --src-title is required".to_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(id: Option<&str>, space: Option<&str>, title: Option<&str>) -> SourceArgs {
        SourceArgs {
            src_id: id.map(str::to_owned),
            src_space: space.map(str::to_owned),
            src_title: title.map(str::to_owned),
        }
    }

    #[test]
    fn test_id_wins_over_space_and_title() {
        let reference = source(Some("123"), Some("DOCS"), Some("Home"))
            .reference()
            .unwrap();
        assert_eq!(reference, PageRef::by_id("123"));
    }

    #[test]
    fn test_space_and_title_without_id() {
        let reference = source(None, Some("DOCS"), Some("Home")).reference().unwrap();
        assert_eq!(
            reference,
            PageRef::by_space_title(Some("DOCS".to_owned()), "Home")
        );
    }

    #[test]
    fn test_title_only() {
        let reference = source(None, None, Some("Home")).reference().unwrap();
        assert_eq!(reference, PageRef::by_space_title(None, "Home"));
    }

    #[test]
    fn test_no_selection_is_rejected() {
        let err = source(None, None, None).reference().unwrap_err();
        assert!(err.to_string().contains("--src-id"));
    }
}
