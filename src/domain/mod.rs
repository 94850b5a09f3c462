//! Domain entities for drug-pages.
//!
//! This module contains the core entities:
//! - Slug: A canonical page identifier
//! - ItemRecord: Optional per-item detail payload
//! - PageArtifact / ChangeSet: Rendered pages and touched directories
//! - RunConfig / RunSummary: One generator run

mod page;
mod record;
mod run;
mod slug;

pub use page::{ChangeSet, PageAction, PageArtifact, WriteOutcome};
pub use record::{is_truthy, ItemRecord, NAME_FIELDS};
pub use run::{
    ItemOutcome, ItemStatus, PublishOutcome, RunConfig, RunPhase, RunSummary,
    DETAIL_SLUG_PLACEHOLDER,
};
pub use slug::{slugify, Slug, FALLBACK_SLUG};
