//! Tree deleter implementation.

use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::debug;

use crate::api::ContentApi;
use crate::reference::PageRef;
use crate::types::Page;

use super::error::DeleteError;
use super::result::DeleteOutcome;

/// Expansion requested when resolving a page.
const RESOLVE_EXPAND: &[&str] = &["body.storage", "space", "ancestors", "version"];

/// Resolution cache capacity.
const CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(128).unwrap();

/// Resolution cache key.
///
/// Depth is part of the key even though it is not part of page identity:
/// the same page referenced at two recursion depths occupies two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    depth: u32,
    reference: PageRef,
}

/// Handles recursive deletion of a page tree.
pub struct TreeDeleter<'a, C> {
    client: &'a C,
    cache: LruCache<CacheKey, Page>,
}

impl<'a, C: ContentApi> TreeDeleter<'a, C> {
    /// Create a new tree deleter.
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            cache: LruCache::new(CACHE_CAPACITY),
        }
    }

    /// Delete the referenced page and all of its descendants, post-order.
    ///
    /// `depth` is a logging marker for the top of this run (the original
    /// caller passes 1); it is not used for termination.
    ///
    /// There is no rollback: if deletion fails partway through a subtree,
    /// pages already deleted stay deleted.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::UnsupportedReference`] for a space/title
    /// reference, or the underlying [`ConfluenceError`](crate::ConfluenceError)
    /// from resolution, child listing or deletion.
    pub fn delete(
        &mut self,
        reference: &PageRef,
        depth: u32,
    ) -> Result<DeleteOutcome, DeleteError> {
        let mut outcome = DeleteOutcome::default();
        self.delete_subtree(reference, depth, &mut outcome)?;
        Ok(outcome)
    }

    fn delete_subtree(
        &mut self,
        reference: &PageRef,
        depth: u32,
        outcome: &mut DeleteOutcome,
    ) -> Result<(), DeleteError> {
        let source = self.find_page(depth, reference)?;

        // recursively delete children
        let children = self.client.get_child_pages(&source.id)?;
        if !children.results.is_empty() {
            let child_depth = depth + 1;
            for child in &children.results {
                self.delete_subtree(&PageRef::by_id(&child.id), child_depth, outcome)?;
            }
        }

        debug!(
            "deleting page id '{}' at depth {} (title '{}')",
            source.id, depth, source.title
        );
        self.client.delete_content_by_id(&source.id)?;
        outcome.pages_deleted += 1;
        Ok(())
    }

    /// Resolve a reference to a page record, consulting the cache first.
    fn find_page(&mut self, depth: u32, reference: &PageRef) -> Result<Page, DeleteError> {
        let key = CacheKey {
            depth,
            reference: reference.clone(),
        };
        if let Some(page) = self.cache.get(&key) {
            debug!("resolution cache hit for {} at depth {}", reference, depth);
            return Ok(page.clone());
        }

        let page = match reference {
            PageRef::ById { content_id } => {
                self.client.get_content_by_id(content_id, RESOLVE_EXPAND)?
            }
            PageRef::BySpaceTitle { .. } => {
                return Err(DeleteError::UnsupportedReference {
                    reference: reference.to_string(),
                });
            }
        };

        self.cache.put(key, page.clone());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry_run::DryRun;
    use crate::error::ConfluenceError;
    use crate::mock::MockContentApi;
    use pretty_assertions::assert_eq;

    /// Tree: A(1) -> [B(2), C(3)], B(2) -> [D(4)], C(3) -> [].
    fn sample_tree() -> MockContentApi {
        MockContentApi::new()
            .with_page("1", "A")
            .with_page("2", "B")
            .with_page("3", "C")
            .with_page("4", "D")
            .with_child("1", "2")
            .with_child("1", "3")
            .with_child("2", "4")
    }

    #[test]
    fn test_leaf_page_single_delete_call() {
        let api = MockContentApi::new().with_page("9", "Leaf");
        let mut deleter = TreeDeleter::new(&api);

        let outcome = deleter.delete(&PageRef::by_id("9"), 1).unwrap();

        assert_eq!(outcome.pages_deleted, 1);
        assert_eq!(api.deleted_ids(), vec!["9".to_owned()]);
    }

    #[test]
    fn test_post_order_delete() {
        let api = sample_tree();
        let mut deleter = TreeDeleter::new(&api);

        let outcome = deleter.delete(&PageRef::by_id("1"), 1).unwrap();

        assert_eq!(outcome.pages_deleted, 4);
        // D before B, B and C before A, siblings in remote order
        assert_eq!(
            api.deleted_ids(),
            vec![
                "4".to_owned(),
                "2".to_owned(),
                "3".to_owned(),
                "1".to_owned()
            ]
        );
    }

    #[test]
    fn test_delete_call_count_matches_node_count() {
        // depth 3, branching 2: 7 nodes
        let mut api = MockContentApi::new().with_page("r", "Root");
        for (parent, child, title) in [
            ("r", "l", "L"),
            ("r", "rr", "R"),
            ("l", "ll", "LL"),
            ("l", "lr", "LR"),
            ("rr", "rl", "RL"),
            ("rr", "rrr", "RR"),
        ] {
            api = api.with_page(child, title).with_child(parent, child);
        }
        let mut deleter = TreeDeleter::new(&api);

        let outcome = deleter.delete(&PageRef::by_id("r"), 1).unwrap();

        assert_eq!(outcome.pages_deleted, 7);
        assert_eq!(api.deleted_ids().len(), 7);
        // root goes last
        assert_eq!(api.deleted_ids().last().map(String::as_str), Some("r"));
    }

    #[test]
    fn test_dry_run_suppresses_deletes_but_traverses() {
        let api = DryRun::new(sample_tree(), true);
        let mut deleter = TreeDeleter::new(&api);

        let outcome = deleter.delete(&PageRef::by_id("1"), 1).unwrap();

        // full traversal happened (every node resolved once)...
        assert_eq!(outcome.pages_deleted, 4);
        for id in ["1", "2", "3", "4"] {
            assert_eq!(api.inner().resolve_count(id), 1, "page {id} not resolved");
        }
        // ...but nothing reached the transport
        assert_eq!(api.inner().calls(), vec![]);
    }

    #[test]
    fn test_resolving_same_depth_and_id_hits_cache() {
        let api = MockContentApi::new().with_page("1", "A");
        let mut deleter = TreeDeleter::new(&api);
        let reference = PageRef::by_id("1");

        let first = deleter.find_page(1, &reference).unwrap();
        let second = deleter.find_page(1, &reference).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.title, second.title);
        assert_eq!(api.resolve_count("1"), 1);
    }

    #[test]
    fn test_resolving_same_id_at_different_depths_fetches_twice() {
        let api = MockContentApi::new().with_page("1", "A");
        let mut deleter = TreeDeleter::new(&api);
        let reference = PageRef::by_id("1");

        deleter.find_page(1, &reference).unwrap();
        deleter.find_page(2, &reference).unwrap();

        assert_eq!(api.resolve_count("1"), 2);
    }

    #[test]
    fn test_missing_page_aborts_without_deletes() {
        let api = sample_tree();
        let mut deleter = TreeDeleter::new(&api);

        let err = deleter.delete(&PageRef::by_id("999"), 1).unwrap_err();

        assert!(matches!(
            err,
            DeleteError::Confluence(ConfluenceError::NotFound { .. })
        ));
        assert_eq!(api.deleted_ids(), Vec::<String>::new());
    }

    #[test]
    fn test_space_title_reference_rejected_before_any_remote_call() {
        let api = sample_tree();
        let mut deleter = TreeDeleter::new(&api);
        let reference = PageRef::by_space_title(Some("SRC".to_owned()), "A");

        let err = deleter.delete(&reference, 1).unwrap_err();

        assert!(matches!(err, DeleteError::UnsupportedReference { .. }));
        assert!(err.to_string().contains("SRC/A"));
        assert_eq!(api.resolve_count("1"), 0);
        assert_eq!(api.calls(), vec![]);
    }
}
