//! Run configuration, phases, and the per-run summary.

use super::{PageAction, Slug, WriteOutcome};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder in the detail URL pattern replaced by the slug
pub const DETAIL_SLUG_PLACEHOLDER: &str = "{slug}";

/// Immutable input to one generator run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// URL returning `{"slugs": [...]}`
    pub slugs_url: String,
    /// Local template file
    pub template: PathBuf,
    /// Output base directory
    pub drugs_dir: PathBuf,
    /// File written inside each slug directory
    pub entry_filename: String,
    /// Process at most this many entries (0 = all)
    pub limit: usize,
    /// Overwrite existing pages
    pub force: bool,
    /// Report decisions without touching the filesystem
    pub dry_run: bool,
    /// Per-item detail URL containing `{slug}`
    pub details_url: Option<String>,
    /// Stage and commit changed directories at the end
    pub git_commit: bool,
    /// Push after committing
    pub git_push: bool,
    /// Delay after each processed item
    pub pause: Duration,
    /// Commit message prefix
    pub commit_prefix: String,
}

impl RunConfig {
    /// Configuration with the documented CLI defaults
    pub fn new(slugs_url: impl Into<String>) -> Self {
        Self {
            slugs_url: slugs_url.into(),
            template: PathBuf::from("templates/index.html"),
            drugs_dir: PathBuf::from("drugs"),
            entry_filename: "index.html".to_string(),
            limit: 0,
            force: false,
            dry_run: false,
            details_url: None,
            git_commit: false,
            git_push: false,
            pause: Duration::ZERO,
            commit_prefix: "chore(drugs):".to_string(),
        }
    }

    /// Detail URL for a slug, if a pattern is configured
    pub fn detail_url_for(&self, slug: &Slug) -> Option<String> {
        self.details_url
            .as_ref()
            .map(|pattern| pattern.replace(DETAIL_SLUG_PLACEHOLDER, slug.as_str()))
    }

    /// Commit message embedding the created count
    pub fn commit_message(&self, created: usize) -> String {
        format!("{} generate {} pages", self.commit_prefix, created)
    }

    /// Whether the finalize phase should publish
    pub fn wants_publish(&self) -> bool {
        self.git_commit && !self.dry_run
    }
}

/// Coordinator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    FetchingSlugs,
    Iterating,
    Finalizing,
    Done,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FetchingSlugs => "fetching-slugs",
            Self::Iterating => "iterating",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// What happened to a single slug-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// The writer made (or reported) a decision
    Written(WriteOutcome),
    /// Slug already handled earlier in this run
    Duplicate,
    /// Write failed; the run continued
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// 1-based position in the (limited) slug list
    pub position: usize,
    pub slug: Slug,
    pub status: ItemStatus,
}

/// Result of the optional version-control step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PublishOutcome {
    #[default]
    NotRequested,
    Committed {
        message: String,
        staged: Vec<PathBuf>,
        pushed: bool,
    },
    /// Advisory failure; never affects the exit status
    Failed(String),
}

impl PublishOutcome {
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Aggregate result of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub items: Vec<ItemOutcome>,
    /// Directories written (always empty on a dry run)
    pub changed_directories: Vec<PathBuf>,
    pub publish: PublishOutcome,
}

impl RunSummary {
    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.status)).count()
    }

    /// Created or overwritten (or would be, on a dry run)
    pub fn created(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Written(o) if o.action.is_write()))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Written(o) if o.action == PageAction::Skip))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Duplicate))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slugify;

    #[test]
    fn test_detail_url_substitution() {
        let mut config = RunConfig::new("https://example.test/slugs");
        assert_eq!(config.detail_url_for(&slugify("Drug A")), None);

        config.details_url = Some("https://example.test/exec?mode=drug&slug={slug}".to_string());
        assert_eq!(
            config.detail_url_for(&slugify("Drug A")).as_deref(),
            Some("https://example.test/exec?mode=drug&slug=drug-a")
        );
    }

    #[test]
    fn test_commit_message() {
        let config = RunConfig::new("u");
        assert_eq!(config.commit_message(3), "chore(drugs): generate 3 pages");
    }

    #[test]
    fn test_publish_requires_real_run() {
        let mut config = RunConfig::new("u");
        config.git_commit = true;
        assert!(config.wants_publish());
        config.dry_run = true;
        assert!(!config.wants_publish());
    }

    #[test]
    fn test_summary_counts() {
        let written = |action| {
            ItemStatus::Written(WriteOutcome {
                action,
                destination: PathBuf::from("x"),
                dry_run: false,
            })
        };
        let statuses = [
            ("a", written(PageAction::Create)),
            ("b", written(PageAction::Overwrite)),
            ("c", written(PageAction::Skip)),
            ("a", ItemStatus::Duplicate),
            ("d", ItemStatus::Failed("disk".into())),
        ];
        let summary = RunSummary {
            items: statuses
                .into_iter()
                .enumerate()
                .map(|(i, (raw, status))| ItemOutcome {
                    position: i + 1,
                    slug: slugify(raw),
                    status,
                })
                .collect(),
            ..RunSummary::default()
        };
        assert_eq!(summary.created(), 2);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.duplicates(), 1);
        assert_eq!(summary.failed(), 1);
    }
}
