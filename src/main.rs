//! apk-cache-cleaner - Garbage collector for the ARC package cache
//!
//! apk-cache-cleaner provides:
//! - Removal of loose files directly under the cache root
//! - Removal of package directories that violate the cache layout
//! - Removal of package directories unused for 30 days
//! - A per-entry report in text, jsonl or json format

use anyhow::Result;
use clap::Parser;

mod cleaner;
mod cli;
mod core;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
