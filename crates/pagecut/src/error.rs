//! CLI error types.

use pagecut_config::ConfigError;
use pagecut_confluence::{CopyError, DeleteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Delete(#[from] DeleteError),

    #[error("{0}")]
    Copy(#[from] CopyError),

    #[error("{0}")]
    Validation(String),
}
