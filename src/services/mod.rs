//! Infrastructure services for drug-pages.
//!
//! This module contains:
//! - RemoteClient: Cache-busted JSON retrieval over HTTP
//! - Template: Placeholder substitution
//! - PageWriter: Skip/create/overwrite decisions
//! - GitPublisher: Stage, commit, and push through git
//! - RunCoordinator: The page-generation pipeline
//! - TextExtractor / StaticPageScraper: Program data collection

mod coordinator;
mod publish;
mod render;
mod writer;
pub mod extract;
pub mod remote;
pub mod scrape;

pub use coordinator::{RunCoordinator, SLUGS_FIELD};
pub use extract::{ProgramInfo, TextExtractor};
pub use publish::{ChangePublisher, GitPublisher};
pub use remote::{JsonFetcher, RemoteClient};
pub use render::{resolve_display_name, Template, NAME_PLACEHOLDER, SLUG_PLACEHOLDER};
pub use scrape::{PageScraper, StaticPageScraper};
pub use writer::PageWriter;
