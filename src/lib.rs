//! drug-pages: static page generator for drug assistance programs
//!
//! Fetches a slug list, renders one page per slug from a local template,
//! writes only the pages that should change, and optionally commits them.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;

#[cfg(test)]
mod test_support;

pub use config::ProjectConfig;
pub use error::{AppError, Result};
