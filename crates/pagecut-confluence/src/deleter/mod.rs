//! Recursive page-tree deletion.
//!
//! This module provides the [`TreeDeleter`] struct that removes a page and
//! all of its descendants, children before parent. The remote system may
//! reject deleting a page that still has children, so the traversal is
//! strictly post-order:
//!
//! 1. Resolve the page reference (memoized per deleter instance)
//! 2. Fetch direct child pages
//! 3. Recurse into each child
//! 4. Delete the resolved page
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pagecut_confluence::{ConfluenceClient, DryRun, PageRef, TreeDeleter};
//!
//! let client = DryRun::new(
//!     ConfluenceClient::new("http://localhost:1990/confluence", "admin", "admin"),
//!     false,
//! );
//! let mut deleter = TreeDeleter::new(&client);
//! let outcome = deleter.delete(&PageRef::by_id("123"), 1)?;
//! println!("deleted {} page(s)", outcome.pages_deleted);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::DeleteError;
pub use executor::TreeDeleter;
pub use result::DeleteOutcome;
