//! Deleter result types.

/// Summary of a tree deletion run.
///
/// `pages_deleted` counts delete calls issued through the API, so under
/// dry-run it counts the pages that would have been deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of pages deleted (or that would be, under dry-run).
    pub pages_deleted: usize,
}
