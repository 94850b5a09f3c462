//! drug-pages: generate one static page per drug slug
//!
//! Fetches the slug list, renders `<drugs-dir>/<slug>/index.html` from a
//! local template one slug at a time, and optionally commits the result.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use drug_pages::cli::{generate, init_logging, GenerateArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let args = GenerateArgs::parse();
    let dry_run = args.dry_run;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Only configuration, the template, and the slug list can fail the run
    let summary = generate(args, &cwd).await?;

    println!(
        "\nDone. Created/updated: {}, Skipped: {}",
        summary.created(),
        summary.skipped()
    );
    if summary.duplicates() > 0 {
        println!("Duplicates ignored: {}", summary.duplicates());
    }
    if summary.failed() > 0 {
        println!("Failed writes: {}", summary.failed());
    }
    if dry_run {
        println!("Dry run: no files were written.");
    }

    Ok(())
}
