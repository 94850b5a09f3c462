//! program-extract: scrape an assistance-program page and extract program records

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use drug_pages::cli::{extract, init_logging, ExtractArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let args = ExtractArgs::parse();
    let url = args.url.clone();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let out = extract(args, &cwd)
        .await
        .with_context(|| format!("Program extraction for {} failed", url))?;

    println!("Result written to {}", out.display());
    Ok(())
}
