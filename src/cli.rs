//! Command-line surfaces for the two binaries.

use crate::config::{validate_entry_filename, ProjectConfig};
use crate::domain::{RunConfig, RunSummary};
use crate::error::ConfigError;
use crate::services::{
    GitPublisher, PageScraper, RemoteClient, RunCoordinator, StaticPageScraper, TextExtractor,
};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Create <drugs-dir>/<slug>/index.html from a template, one slug at a time.
#[derive(Debug, Clone, Parser)]
#[command(name = "drug-pages", version)]
pub struct GenerateArgs {
    /// Slug API URL, e.g. https://.../exec?mode=slugs&source=drugs
    #[arg(long, value_name = "URL")]
    pub slugs_url: String,

    /// Path to local template [default: templates/index.html]
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Output base directory [default: drugs]
    #[arg(long, value_name = "DIR")]
    pub drugs_dir: Option<PathBuf>,

    /// File written inside each slug directory [default: index.html]
    #[arg(long, value_name = "NAME")]
    pub entry_filename: Option<String>,

    /// Limit number of slugs to process (0 or less = all)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub limit: i64,

    /// Overwrite existing pages
    #[arg(long)]
    pub force: bool,

    /// Show actions without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Per-drug details URL containing {slug}, e.g. https://.../exec?mode=drug&slug={slug}
    #[arg(long, value_name = "PATTERN")]
    pub details_url: Option<String>,

    /// git add/commit changed directories at the end
    #[arg(long)]
    pub git_commit: bool,

    /// git push after commit
    #[arg(long)]
    pub git_push: bool,

    /// Pause seconds between slugs
    #[arg(long, default_value_t = 0.0, value_name = "SECONDS", allow_negative_numbers = true)]
    pub pause: f64,

    /// Configuration file (replaces .drug-pages.toml lookup)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Merge flags over loaded configuration
    pub fn into_run_config(self, config: &ProjectConfig) -> Result<RunConfig, ConfigError> {
        let entry_filename = self
            .entry_filename
            .unwrap_or_else(|| config.output.entry_filename.clone());
        validate_entry_filename(&entry_filename)?;

        Ok(RunConfig {
            slugs_url: self.slugs_url,
            template: self.template.unwrap_or_else(|| config.output.template.clone()),
            drugs_dir: self.drugs_dir.unwrap_or_else(|| config.output.drugs_dir.clone()),
            entry_filename,
            limit: usize::try_from(self.limit).unwrap_or(0),
            force: self.force,
            dry_run: self.dry_run,
            details_url: self.details_url.filter(|u| !u.is_empty()),
            git_commit: self.git_commit,
            git_push: self.git_push,
            pause: Duration::try_from_secs_f64(self.pause).unwrap_or(Duration::ZERO),
            commit_prefix: config.git.commit_prefix.clone(),
        })
    }
}

/// Scrape a program page and extract structured program data.
#[derive(Debug, Clone, Parser)]
#[command(name = "program-extract", version)]
pub struct ExtractArgs {
    /// Page to scrape
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Where to write the extracted JSON
    #[arg(long, default_value = "program_data/sample.json", value_name = "PATH")]
    pub out: PathBuf,

    /// Completion token budget
    #[arg(long, default_value_t = crate::services::extract::DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Configuration file (replaces .drug-pages.toml lookup)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run the page generator from the working directory `cwd`
pub async fn generate(args: GenerateArgs, cwd: &Path) -> crate::Result<RunSummary> {
    let config = ProjectConfig::load(args.config.as_deref(), Some(cwd))?;
    tracing::debug!(?config, "configuration loaded");

    let client = RemoteClient::new(&config.http)?;
    let publisher = GitPublisher::new(cwd.to_path_buf());
    let run_config = args.into_run_config(&config)?;
    let mut coordinator = RunCoordinator::new(run_config, client, publisher);

    Ok(coordinator.run().await?)
}

/// Scrape, extract, and write the program JSON; returns the output path
pub async fn extract(args: ExtractArgs, cwd: &Path) -> crate::Result<PathBuf> {
    let config = ProjectConfig::load(args.config.as_deref(), Some(cwd))?;

    let client = RemoteClient::new(&config.http)?;
    let scraper = StaticPageScraper::new(client.clone());
    let extractor = TextExtractor::new(client, config.extraction);

    let text = scraper.visible_text(&args.url).await?;
    tracing::info!(chars = text.len(), "scraped {}", args.url);

    let programs = extractor.extract_programs(&text, args.max_tokens).await?;
    match &programs {
        Some(list) => tracing::info!(count = list.len(), "extracted programs"),
        None => tracing::warn!("model output was not valid JSON; writing null"),
    }

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.out, serde_json::to_string_pretty(&programs)?)?;
    Ok(args.out)
}

/// Initialize logging with RUST_LOG environment variable support
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("drug_pages=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
