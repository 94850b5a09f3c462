//! Run coordinator: drives one generator run from slug list to commit.
//!
//! Items are handled strictly one at a time, in slug-list order. Only the
//! template and the slug list can fail a run; everything after that is
//! absorbed per item or reported as a warning.

use super::publish::ChangePublisher;
use super::remote::JsonFetcher;
use super::render::{resolve_display_name, Template};
use super::writer::PageWriter;
use crate::domain::{
    is_truthy, slugify, ChangeSet, ItemOutcome, ItemStatus, PageArtifact, PublishOutcome,
    RunConfig, RunPhase, RunSummary, Slug,
};
use crate::error::RunError;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

/// Field of the slug-source response holding the identifiers
pub const SLUGS_FIELD: &str = "slugs";

/// Orchestrates fetch → render → write → publish
pub struct RunCoordinator<F, P> {
    config: RunConfig,
    fetcher: F,
    publisher: P,
    phase: RunPhase,
}

impl<F: JsonFetcher, P: ChangePublisher> RunCoordinator<F, P> {
    pub fn new(config: RunConfig, fetcher: F, publisher: P) -> Self {
        Self {
            config,
            fetcher,
            publisher,
            phase: RunPhase::FetchingSlugs,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    fn enter(&mut self, phase: RunPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "run phase");
        self.phase = phase;
    }

    /// Execute the full pipeline
    pub async fn run(&mut self) -> Result<RunSummary, RunError> {
        self.enter(RunPhase::FetchingSlugs);
        let template = Template::load(&self.config.template)?;
        let entries = self.fetch_slugs().await?;

        self.enter(RunPhase::Iterating);
        let total = entries.len();
        let writer = PageWriter::new(self.config.force, self.config.dry_run);
        let mut changes = ChangeSet::new();
        let mut seen: HashSet<Slug> = HashSet::new();
        let mut summary = RunSummary::default();

        for (index, raw) in entries.iter().enumerate() {
            let position = index + 1;
            let Some(text) = entry_text(raw) else {
                continue;
            };

            let slug = slugify(&text);
            if slug.is_fallback() {
                tracing::debug!(raw = %text, "entry normalized to fallback slug");
            }

            let status = if seen.insert(slug.clone()) {
                self.process_item(&template, &writer, &slug, &mut changes, position, total)
                    .await
            } else {
                tracing::info!("[{}/{}] DUPLICATE: {}", position, total, slug);
                ItemStatus::Duplicate
            };

            summary.items.push(ItemOutcome {
                position,
                slug,
                status,
            });

            self.pace().await;
        }

        self.enter(RunPhase::Finalizing);
        summary.changed_directories = changes.iter().cloned().collect();
        tracing::info!(
            created = summary.created(),
            skipped = summary.skipped(),
            duplicates = summary.duplicates(),
            failed = summary.failed(),
            "run complete"
        );

        if self.config.wants_publish() {
            summary.publish = self.publish(changes, summary.created());
        }

        self.enter(RunPhase::Done);
        Ok(summary)
    }

    /// Fetch and validate the slug list, applying the prefix limit
    async fn fetch_slugs(&self) -> Result<Vec<Value>, RunError> {
        tracing::info!("Fetching slugs from: {}", self.config.slugs_url);
        let document = self.fetcher.get_json(&self.config.slugs_url, &[]).await?;

        let mut entries = match document.get(SLUGS_FIELD) {
            Some(Value::Array(list)) => list.clone(),
            _ => {
                let shown = serde_json::to_string_pretty(&document)
                    .unwrap_or_else(|_| document.to_string());
                return Err(RunError::UnexpectedFormat(shown));
            }
        };

        if self.config.limit > 0 {
            entries.truncate(self.config.limit);
        }
        Ok(entries)
    }

    /// Resolve, render, and write one slug. Never fails the run.
    async fn process_item(
        &self,
        template: &Template,
        writer: &PageWriter,
        slug: &Slug,
        changes: &mut ChangeSet,
        position: usize,
        total: usize,
    ) -> ItemStatus {
        let name = if template.needs_name() {
            let detail_url = self.config.detail_url_for(slug);
            Some(resolve_display_name(&self.fetcher, detail_url.as_deref(), slug).await)
        } else {
            None
        };

        let content = template.render(slug, name.as_deref());
        let page = PageArtifact::new(
            &self.config.drugs_dir,
            &self.config.entry_filename,
            slug.clone(),
            content,
        );

        match writer.write(&page, changes) {
            Ok(outcome) => {
                let suffix = if outcome.dry_run && outcome.action.is_write() {
                    " (dry run)"
                } else {
                    ""
                };
                tracing::info!(
                    "[{}/{}] {}{}: {}",
                    position,
                    total,
                    outcome.action,
                    suffix,
                    outcome.destination.display()
                );
                ItemStatus::Written(outcome)
            }
            Err(e) => {
                tracing::error!(
                    slug = %slug,
                    destination = %page.destination.display(),
                    error = %e,
                    "failed to write page"
                );
                ItemStatus::Failed(e.to_string())
            }
        }
    }

    async fn pace(&self) {
        if self.config.pause > Duration::ZERO {
            tokio::time::sleep(self.config.pause).await;
        }
    }

    /// Stage, commit, and optionally push. Failures are advisory.
    fn publish(&self, changes: ChangeSet, created: usize) -> PublishOutcome {
        let staged = changes.into_stage_paths(&self.config.drugs_dir);
        let message = self.config.commit_message(created);

        let result = self
            .publisher
            .stage(&staged)
            .and_then(|_| self.publisher.commit(&message))
            .and_then(|_| {
                if self.config.git_push {
                    self.publisher.push()
                } else {
                    Ok(())
                }
            });

        match result {
            Ok(()) => {
                let pushed = self.config.git_push;
                tracing::info!(pushed, "Git commit complete: {}", message);
                PublishOutcome::Committed {
                    message,
                    staged,
                    pushed,
                }
            }
            Err(e) => {
                tracing::warn!("git commit/push failed: {}", e);
                PublishOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Text of a slug-list entry, or `None` for falsy entries
fn entry_text(raw: &Value) -> Option<String> {
    if !is_truthy(raw) {
        return None;
    }
    match raw {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
