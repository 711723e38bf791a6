//! Copier result types.

/// Summary of a tree copy run.
///
/// Counts reflect calls issued through the API, so under dry-run they count
/// the writes that would have happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Pages created at the destination.
    pub pages_created: usize,
    /// Existing destination pages overwritten.
    pub pages_updated: usize,
    /// Existing destination pages left alone because they matched the source.
    pub pages_skipped: usize,
    /// Labels transferred.
    pub labels_copied: usize,
    /// Attachments transferred.
    pub attachments_copied: usize,
}
