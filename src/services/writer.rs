//! Page writer: decides skip/create/overwrite and performs the write.

use crate::domain::{ChangeSet, PageAction, PageArtifact, WriteOutcome};
use std::fs;
use std::path::Path;

/// Writes rendered pages according to the overwrite and dry-run policy
#[derive(Debug, Clone, Copy)]
pub struct PageWriter {
    force: bool,
    dry_run: bool,
}

impl PageWriter {
    pub fn new(force: bool, dry_run: bool) -> Self {
        Self { force, dry_run }
    }

    /// Decide what to do with a destination without touching it
    pub fn decide(&self, destination: &Path) -> PageAction {
        match (destination.exists(), self.force) {
            (true, false) => PageAction::Skip,
            (true, true) => PageAction::Overwrite,
            (false, _) => PageAction::Create,
        }
    }

    /// Apply the decision for one artifact.
    ///
    /// Written directories are recorded in `changes`; dry runs record nothing.
    pub fn write(
        &self,
        page: &PageArtifact,
        changes: &mut ChangeSet,
    ) -> std::io::Result<WriteOutcome> {
        let action = self.decide(&page.destination);

        if action.is_write() && !self.dry_run {
            fs::create_dir_all(page.directory())?;
            fs::write(&page.destination, &page.content)?;
            changes.record(page.directory());
        }

        Ok(WriteOutcome {
            action,
            destination: page.destination.clone(),
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slugify;
    use tempfile::TempDir;

    fn page(base: &Path, raw: &str, content: &str) -> PageArtifact {
        PageArtifact::new(base, "index.html", slugify(raw), content.to_string())
    }

    #[test]
    fn test_creates_missing_page() {
        let temp = TempDir::new().unwrap();
        let mut changes = ChangeSet::new();
        let page = page(temp.path(), "Drug A", "<p>a</p>");

        let outcome = PageWriter::new(false, false).write(&page, &mut changes).unwrap();

        assert_eq!(outcome.action, PageAction::Create);
        assert!(outcome.wrote());
        assert_eq!(fs::read_to_string(&page.destination).unwrap(), "<p>a</p>");
        assert!(changes.contains(&temp.path().join("drug-a")));
    }

    #[test]
    fn test_skips_existing_without_force() {
        let temp = TempDir::new().unwrap();
        let mut changes = ChangeSet::new();
        let dir = temp.path().join("drug-b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), b"original \xF0\x9F\x92\x8A").unwrap();

        let outcome = PageWriter::new(false, false)
            .write(&page(temp.path(), "drug-b", "new"), &mut changes)
            .unwrap();

        assert_eq!(outcome.action, PageAction::Skip);
        assert_eq!(fs::read(dir.join("index.html")).unwrap(), b"original \xF0\x9F\x92\x8A");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let mut changes = ChangeSet::new();
        let dir = temp.path().join("drug-b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), "old").unwrap();

        let outcome = PageWriter::new(true, false)
            .write(&page(temp.path(), "drug-b", "new"), &mut changes)
            .unwrap();

        assert_eq!(outcome.action, PageAction::Overwrite);
        assert_eq!(fs::read_to_string(dir.join("index.html")).unwrap(), "new");
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let mut changes = ChangeSet::new();
        let page = page(temp.path(), "Drug A", "x");

        let outcome = PageWriter::new(true, true).write(&page, &mut changes).unwrap();

        assert_eq!(outcome.action, PageAction::Create);
        assert!(outcome.dry_run);
        assert!(!outcome.wrote());
        assert!(!temp.path().join("drug-a").exists());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_dry_run_with_force_keeps_existing_bytes() {
        let temp = TempDir::new().unwrap();
        let mut changes = ChangeSet::new();
        let dir = temp.path().join("drug-b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), "hand edited\r\n").unwrap();

        let outcome = PageWriter::new(true, true)
            .write(&page(temp.path(), "drug-b", "new"), &mut changes)
            .unwrap();

        assert_eq!(outcome.action, PageAction::Overwrite);
        assert!(!outcome.wrote());
        assert_eq!(fs::read(dir.join("index.html")).unwrap(), b"hand edited\r\n");
        assert!(changes.is_empty());
    }
}
