//! Unified error types for the drug-pages generator.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Run error: {0}")]
    Run(#[from] RunError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Remote JSON retrieval errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} did not return valid JSON: {reason}")]
    Decode { url: String, reason: String },
}

/// Fatal pipeline errors
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not fetch slug list: {0}")]
    SlugList(#[from] FetchError),

    #[error("Unexpected JSON format (no 'slugs' array): {0}")]
    UnexpectedFormat(String),
}

/// Change publisher (version control) errors, surfaced as run warnings
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },
}

/// Text extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No API key configured for the extraction endpoint")]
    MissingApiKey,

    #[error("Extraction request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction response had no message content")]
    EmptyResponse,
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for remote fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for publish operations
pub type PublishResult<T> = std::result::Result<T, PublishError>;
