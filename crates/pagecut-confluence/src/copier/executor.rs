//! Page copier implementation.

use tracing::{debug, info, warn};

use crate::api::ContentApi;
use crate::reference::PageRef;
use crate::types::{NewPage, Page, PageUpdate};

use super::CopyOptions;
use super::error::CopyError;
use super::result::CopyOutcome;
use super::title;

/// Expansion requested when resolving a page.
const RESOLVE_EXPAND: &[&str] = &["body.storage", "space", "ancestors", "version"];

/// Handles recursive copying of a page tree.
pub struct PageCopier<'a, C> {
    client: &'a C,
    options: CopyOptions,
}

impl<'a, C: ContentApi> PageCopier<'a, C> {
    /// Create a new page copier.
    #[must_use]
    pub fn new(client: &'a C, options: CopyOptions) -> Self {
        Self { client, options }
    }

    /// Copy the referenced page and all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] when the source cannot be resolved
    /// unambiguously, the destination exists without overwrite, or an API
    /// call fails. There is no rollback on partial failure.
    pub fn copy(&self, reference: &PageRef) -> Result<CopyOutcome, CopyError> {
        let mut outcome = CopyOutcome::default();
        self.copy_subtree(
            reference,
            self.options.dst_space_key.as_deref(),
            self.options.title_template.as_deref(),
            self.options.ancestor_id.as_deref(),
            &mut outcome,
        )?;
        Ok(outcome)
    }

    fn copy_subtree(
        &self,
        reference: &PageRef,
        dst_space_key: Option<&str>,
        title_template: Option<&str>,
        ancestor_override: Option<&str>,
        outcome: &mut CopyOutcome,
    ) -> Result<(), CopyError> {
        let source = self.find_source(reference)?;

        let (dst_space_key, template) =
            self.init_destination(&source, dst_space_key, title_template)?;
        let dst_title = title::render(&template, &source.title);

        // The ancestor determines the parent of the copy. Without an explicit
        // one, take the source's parent; a source without ancestors is a root
        // page, so the copy lands at the root as well.
        let ancestor_id: Option<String> = match ancestor_override {
            Some(id) => Some(id.to_owned()),
            None => source.ancestors.first().map(|a| a.id.clone()),
        };

        let page_copy = match self.find_existing(&dst_space_key, &dst_title)? {
            Some(existing) => {
                if !self.options.overwrite {
                    return Err(CopyError::DestinationExists {
                        space_key: dst_space_key,
                        title: dst_title,
                    });
                }
                self.overwrite_page(
                    &source,
                    ancestor_id.as_deref(),
                    &existing,
                    &dst_space_key,
                    &dst_title,
                    outcome,
                )?
            }
            None => self.copy_page(
                &source,
                ancestor_id.as_deref(),
                &dst_space_key,
                &dst_title,
                outcome,
            )?,
        };

        if let Some(page_copy) = &page_copy {
            self.copy_labels(&source, page_copy, outcome)?;
            self.copy_attachments(&source, page_copy, outcome)?;
        } else {
            debug!(
                "destination for '{}' not materialized (dry-run); skipping label and attachment transfer",
                source.title
            );
        }

        // recursively copy children under the new page
        let children = self.client.get_child_pages(&source.id)?;
        for child in &children.results {
            self.copy_subtree(
                &PageRef::by_id(&child.id),
                Some(dst_space_key.as_str()),
                Some(template.as_str()),
                page_copy.as_ref().map(|p| p.id.as_str()),
                outcome,
            )?;
        }

        Ok(())
    }

    /// Resolve the source reference to a page record.
    fn find_source(&self, reference: &PageRef) -> Result<Page, CopyError> {
        match reference {
            PageRef::ById { content_id } => {
                debug!("searching page by id '{}'", content_id);
                Ok(self.client.get_content_by_id(content_id, RESOLVE_EXPAND)?)
            }
            PageRef::BySpaceTitle { space_key, title } => {
                debug!(
                    "searching page by space {:?} and title '{}'",
                    space_key, title
                );
                let content =
                    self.client
                        .get_content(space_key.as_deref(), Some(title), RESOLVE_EXPAND)?;
                let mut results = content.results;
                match results.len() {
                    0 => Err(CopyError::SourceNotFound {
                        reference: reference.to_string(),
                    }),
                    1 => Ok(results.swap_remove(0)),
                    count => {
                        let mut spaces: Vec<String> = results
                            .iter()
                            .filter_map(|page| page.space.as_ref().map(|s| s.key.clone()))
                            .collect();
                        spaces.sort();
                        spaces.dedup();
                        Err(CopyError::AmbiguousSource {
                            count,
                            spaces: spaces.join(", "),
                        })
                    }
                }
            }
        }
    }

    /// Check whether the destination page already exists.
    fn find_existing(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<Page>, CopyError> {
        let content = self
            .client
            .get_content(Some(space_key), Some(title), RESOLVE_EXPAND)?;
        let mut results = content.results;
        match results.len() {
            0 => Ok(None),
            1 => Ok(Some(results.swap_remove(0))),
            count => Err(CopyError::AmbiguousSource {
                count,
                spaces: space_key.to_owned(),
            }),
        }
    }

    /// Resolve the destination space and title template for one level.
    ///
    /// Returns the template with `{counter}` already substituted, so child
    /// pages reuse this level's counter.
    fn init_destination(
        &self,
        source: &Page,
        dst_space_key: Option<&str>,
        title_template: Option<&str>,
    ) -> Result<(String, String), CopyError> {
        let dst_space_key = match dst_space_key {
            Some(key) => key.to_owned(),
            None => {
                let key = source
                    .space
                    .as_ref()
                    .map(|space| space.key.clone())
                    .ok_or_else(|| CopyError::MissingSourceSpace {
                        content_id: source.id.clone(),
                    })?;
                debug!("setting destination space key to source's value '{}'", key);
                key
            }
        };

        if let Some(template) = title_template
            && !template.contains(title::TITLE_FIELD)
        {
            info!(
                "can't find '{}' in title template '{}', treating it as a suffix",
                title::TITLE_FIELD,
                template
            );
        }
        let mut template = title::normalize_template(title_template);

        if template.contains(title::COUNTER_FIELD) {
            let counter = self.title_counter(&dst_space_key, &source.title, &template)?;
            template = template.replace(title::COUNTER_FIELD, &counter.to_string());
        }

        Ok((dst_space_key, template))
    }

    /// Next free copy number for a title in the destination space.
    fn title_counter(
        &self,
        space_key: &str,
        title: &str,
        template: &str,
    ) -> Result<usize, CopyError> {
        let pattern = title::counter_pattern(template, title)?;
        let cql = format!(r#"space = {space_key} and title ~ "{title}""#);
        let search_results = self.client.search_content(&cql)?;
        let counter = search_results
            .results
            .iter()
            .filter(|hit| pattern.is_match(&hit.title))
            .count();
        Ok(counter + 1)
    }

    fn copy_page(
        &self,
        source: &Page,
        ancestor_id: Option<&str>,
        dst_space_key: &str,
        dst_title: &str,
        outcome: &mut CopyOutcome,
    ) -> Result<Option<Page>, CopyError> {
        info!(
            "copying '{}/{}' => '{}/{}'",
            source.space.as_ref().map_or("?", |s| s.key.as_str()),
            source.title,
            dst_space_key,
            dst_title
        );
        let created = self.client.create_content(&NewPage {
            space_key: dst_space_key,
            title: dst_title,
            body: source.body_html(),
            ancestor_id,
        })?;
        outcome.pages_created += 1;
        Ok(created)
    }

    fn overwrite_page(
        &self,
        source: &Page,
        ancestor_id: Option<&str>,
        existing: &Page,
        dst_space_key: &str,
        dst_title: &str,
        outcome: &mut CopyOutcome,
    ) -> Result<Option<Page>, CopyError> {
        let same_body = source.body_html() == existing.body_html();
        let same_ancestor = ancestor_id == existing.ancestors.last().map(|a| a.id.as_str());
        if same_body && same_ancestor {
            debug!(
                "skipping '{}/{}' overwrite, it matches the source",
                dst_space_key, dst_title
            );
            outcome.pages_skipped += 1;
            return Ok(Some(existing.clone()));
        }

        info!(
            "overwriting existing '{}/{}' with version {}",
            dst_space_key,
            dst_title,
            existing.version.number + 1
        );
        let updated = self.client.update_content_by_id(
            &existing.id,
            &PageUpdate {
                space_key: dst_space_key,
                title: dst_title,
                body: source.body_html(),
                ancestor_id,
                version: existing.version.number,
            },
        )?;
        outcome.pages_updated += 1;

        // The destination exists either way; fall back to it when the update
        // was suppressed so children still land under the right ancestor.
        Ok(updated.or_else(|| Some(existing.clone())))
    }

    fn copy_labels(
        &self,
        source: &Page,
        page_copy: &Page,
        outcome: &mut CopyOutcome,
    ) -> Result<(), CopyError> {
        let labels = self.client.get_labels(&source.id)?;
        if labels.results.is_empty() {
            return Ok(());
        }
        info!("copying {} label(s)", labels.results.len());
        self.client.create_labels(&page_copy.id, &labels.results)?;
        outcome.labels_copied += labels.results.len();
        Ok(())
    }

    fn copy_attachments(
        &self,
        source: &Page,
        page_copy: &Page,
        outcome: &mut CopyOutcome,
    ) -> Result<(), CopyError> {
        let src_attachments = self.client.get_attachments(&source.id)?;
        if src_attachments.results.is_empty() {
            return Ok(());
        }
        let dst_attachments = self.client.get_attachments(&page_copy.id)?;

        info!("copying {} attachment(s)", src_attachments.results.len());
        for attachment in &src_attachments.results {
            let Some(link) = attachment.download_link() else {
                warn!(
                    "attachment '{}' has no download link, skipping",
                    attachment.title
                );
                continue;
            };
            debug!("downloading '{}' attachment", attachment.title);
            let data = self.client.download_attachment(link)?;

            match dst_attachments
                .results
                .iter()
                .find(|existing| existing.title == attachment.title)
            {
                Some(existing) => {
                    debug!("updating existing attachment '{}'", attachment.title);
                    self.client.update_attachment(
                        &page_copy.id,
                        &existing.id,
                        &attachment.title,
                        &data,
                    )?;
                }
                None => {
                    debug!("creating new attachment '{}'", attachment.title);
                    self.client
                        .create_attachment(&page_copy.id, &attachment.title, &data)?;
                }
            }
            outcome.attachments_copied += 1;
        }
        Ok(())
    }
}
