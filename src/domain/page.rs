//! Rendered pages and the set of directories a run touched.

use super::Slug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A rendered page and where it goes
#[derive(Debug, Clone)]
pub struct PageArtifact {
    pub slug: Slug,
    /// `<output-base>/<slug>/<entry-filename>`
    pub destination: PathBuf,
    pub content: String,
}

impl PageArtifact {
    pub fn new(output_base: &Path, entry_filename: &str, slug: Slug, content: String) -> Self {
        let destination = output_base.join(slug.as_str()).join(entry_filename);
        Self {
            slug,
            destination,
            content,
        }
    }

    /// Directory that holds the page
    pub fn directory(&self) -> &Path {
        self.destination.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// What the writer decided to do with a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Destination exists and overwriting is off
    Skip,
    /// Destination does not exist yet
    Create,
    /// Destination exists and overwriting is on
    Overwrite,
}

impl PageAction {
    /// Counted as created (new or rewritten)
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Skip)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Skip => "SKIP (exists)",
            Self::Create => "CREATED",
            Self::Overwrite => "UPDATED",
        }
    }
}

impl std::fmt::Display for PageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of handing one artifact to the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub action: PageAction,
    pub destination: PathBuf,
    /// True when the action was only reported (dry run)
    pub dry_run: bool,
}

impl WriteOutcome {
    /// Whether bytes actually hit the disk
    pub fn wrote(&self) -> bool {
        self.action.is_write() && !self.dry_run
    }
}

/// Directories written during a run, in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    directories: BTreeSet<PathBuf>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, directory: impl Into<PathBuf>) {
        self.directories.insert(directory.into());
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn contains(&self, directory: &Path) -> bool {
        self.directories.contains(directory)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.directories.iter()
    }

    /// Paths to stage: every recorded directory, or `fallback` when nothing was recorded
    pub fn into_stage_paths(self, fallback: &Path) -> Vec<PathBuf> {
        if self.directories.is_empty() {
            vec![fallback.to_path_buf()]
        } else {
            self.directories.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slugify;

    #[test]
    fn test_artifact_destination() {
        let page = PageArtifact::new(
            Path::new("drugs"),
            "index.html",
            slugify("Drug A"),
            String::new(),
        );
        assert_eq!(page.destination, PathBuf::from("drugs/drug-a/index.html"));
        assert_eq!(page.directory(), Path::new("drugs/drug-a"));
    }

    #[test]
    fn test_change_set_sorted_and_deduplicated() {
        let mut changes = ChangeSet::new();
        changes.record("drugs/zyrtec");
        changes.record("drugs/advil");
        changes.record("drugs/zyrtec");

        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes.into_stage_paths(Path::new("drugs")),
            vec![PathBuf::from("drugs/advil"), PathBuf::from("drugs/zyrtec")]
        );
    }

    #[test]
    fn test_empty_change_set_stages_fallback() {
        let changes = ChangeSet::new();
        assert_eq!(
            changes.into_stage_paths(Path::new("drugs")),
            vec![PathBuf::from("drugs")]
        );
    }

    #[test]
    fn test_dry_run_outcome_does_not_count_as_written() {
        let outcome = WriteOutcome {
            action: PageAction::Create,
            destination: PathBuf::from("drugs/a/index.html"),
            dry_run: true,
        };
        assert!(!outcome.wrote());
        assert!(outcome.action.is_write());
    }
}
