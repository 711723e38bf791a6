//! `pagecut delete` command implementation.

use clap::Args;
use pagecut_confluence::{DryRun, TreeDeleter};

use crate::error::CliError;
use crate::output::Output;

use super::common::{ConnectionArgs, SourceArgs};

/// Arguments for the delete command.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Resolve and traverse the tree without issuing any mutating calls.
    #[arg(long)]
    dry_run: bool,
}

impl DeleteArgs {
    /// Execute the delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be resolved or deletion fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let reference = self.source.reference()?;
        let client = DryRun::new(self.connection.client()?, self.dry_run);

        let mut deleter = TreeDeleter::new(&client);
        let outcome = deleter.delete(&reference, 1)?;

        if self.dry_run {
            output.highlight("\n[DRY RUN] No changes made.");
            output.info(&format!("Would delete {} page(s).", outcome.pages_deleted));
        } else {
            output.success(&format!("\nDeleted {} page(s).", outcome.pages_deleted));
        }

        Ok(())
    }
}
