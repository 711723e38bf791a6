//! Confluence integration for pagecut.
//!
//! This crate provides everything needed to copy and delete page trees on a
//! Confluence Server/Data Center instance over its REST API:
//!
//! - [`ConfluenceClient`]: sync HTTP client with Basic authentication
//! - [`ContentApi`]: trait seam over the remote API, so the tree operations
//!   run against any transport
//! - [`DryRun`]: wrapper suppressing every mutating call while reads pass
//!   through
//! - [`TreeDeleter`]: post-order recursive deletion with a memoizing
//!   resolution cache
//! - [`PageCopier`]: recursive copy with title templating, overwrite, and
//!   label/attachment transfer
//! - [`mock::MockContentApi`]: in-memory API for tests (also behind the
//!   `mock` feature for downstream test suites)

mod api;
mod client;
mod copier;
mod deleter;
mod dry_run;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod reference;
mod types;

pub use api::ContentApi;
pub use client::ConfluenceClient;
pub use copier::{CopyError, CopyOptions, CopyOutcome, PageCopier};
pub use deleter::{DeleteError, DeleteOutcome, TreeDeleter};
pub use dry_run::DryRun;
pub use error::ConfluenceError;
pub use reference::PageRef;
pub use types::{
    Ancestor, Attachment, AttachmentList, Body, ContentList, Label, LabelList, Links, NewPage,
    Page, PageList, PageSummary, PageUpdate, Space, Storage, Version,
};
