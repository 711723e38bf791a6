//! `pagecut copy` command implementation.

use clap::Args;
use pagecut_confluence::{CopyOptions, DryRun, PageCopier};

use crate::error::CliError;
use crate::output::Output;

use super::common::{ConnectionArgs, SourceArgs};

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Destination page space. If not set, the source space is used.
    #[arg(long)]
    dst_space: Option<String>,

    /// Destination page title template. Supports the meta variables
    /// `{title}` and `{counter}`; a value without `{title}` is treated as a
    /// suffix. `{counter}` increments for every copy of the same page.
    #[arg(long)]
    dst_title_template: Option<String>,

    /// Parent page for the copied tree. If not set, the source page's
    /// parent is used.
    #[arg(long)]
    ancestor_id: Option<String>,

    /// Overwrite the destination page in case it already exists. Otherwise
    /// the command fails.
    #[arg(long)]
    overwrite: bool,

    /// Resolve and traverse the tree without issuing any mutating calls.
    #[arg(long)]
    dry_run: bool,
}

impl CopyArgs {
    /// Execute the copy command.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved unambiguously or
    /// copying fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let reference = self.source.reference()?;
        let client = DryRun::new(self.connection.client()?, self.dry_run);

        let options = CopyOptions {
            dst_space_key: self.dst_space,
            title_template: self.dst_title_template,
            ancestor_id: self.ancestor_id,
            overwrite: self.overwrite,
        };
        let copier = PageCopier::new(&client, options);
        let outcome = copier.copy(&reference)?;

        if self.dry_run {
            output.highlight("\n[DRY RUN] No changes made.");
        } else {
            output.success("\nCopy finished.");
        }
        output.info(&format!("Pages created: {}", outcome.pages_created));
        if outcome.pages_updated > 0 {
            output.info(&format!("Pages overwritten: {}", outcome.pages_updated));
        }
        if outcome.pages_skipped > 0 {
            output.info(&format!(
                "Pages skipped (unchanged): {}",
                outcome.pages_skipped
            ));
        }
        if outcome.labels_copied > 0 {
            output.info(&format!("Labels copied: {}", outcome.labels_copied));
        }
        if outcome.attachments_copied > 0 {
            output.info(&format!(
                "Attachments copied: {}",
                outcome.attachments_copied
            ));
        }

        Ok(())
    }
}
