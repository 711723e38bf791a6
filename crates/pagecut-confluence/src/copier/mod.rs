//! Recursive page-tree copying.
//!
//! This module provides the [`PageCopier`] struct that copies a page and
//! all of its descendants into a destination space:
//!
//! 1. Resolve the source page (by ID, or by space/title search)
//! 2. Work out the destination space, title and ancestor
//! 3. Create the destination page, or overwrite an existing one
//! 4. Transfer labels and attachments
//! 5. Recurse into child pages with the new page as ancestor
//!
//! Destination titles come from a template supporting the `{title}` and
//! `{counter}` placeholders. `{counter}` is replaced with the next free
//! copy number, determined by a CQL search over the destination space.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pagecut_confluence::{ConfluenceClient, CopyOptions, DryRun, PageCopier, PageRef};
//!
//! let client = DryRun::new(
//!     ConfluenceClient::new("http://localhost:1990/confluence", "admin", "admin"),
//!     false,
//! );
//! let options = CopyOptions {
//!     dst_space_key: Some("ARCHIVE".to_owned()),
//!     ..CopyOptions::default()
//! };
//! let copier = PageCopier::new(&client, options);
//! let outcome = copier.copy(&PageRef::by_id("123"))?;
//! println!("created {} page(s)", outcome.pages_created);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;
mod title;

pub use error::CopyError;
pub use executor::PageCopier;
pub use result::CopyOutcome;

/// Options for copying a page tree.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Destination space key. Defaults to the source page's space.
    pub dst_space_key: Option<String>,
    /// Destination title template with `{title}`/`{counter}` placeholders.
    /// A template without `{title}` is treated as a suffix. Defaults to
    /// `{title} ({counter})`.
    pub title_template: Option<String>,
    /// Parent for the copied tree. Defaults to the source page's parent,
    /// or the space root for a root page.
    pub ancestor_id: Option<String>,
    /// Overwrite an existing destination page instead of failing.
    pub overwrite: bool,
}
