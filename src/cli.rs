//! CLI module - Command-line interface definition and handler

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::cleaner::clean;
use crate::core::render::{OutputFormat, Renderer};
use crate::core::util::format_timestamp;

/// Production cache root, managed by the ARC session on the stateful
/// partition. Overridable for testing only.
pub const DEFAULT_CACHE_ROOT: &str = "/mnt/stateful_partition/unencrypted/apkcache";

/// apk-cache-cleaner - garbage collector for the ARC package cache.
#[derive(Parser, Debug)]
#[command(name = "apk-cache-cleaner")]
#[command(
    author,
    version,
    about,
    long_about = r#"apk-cache-cleaner reclaims space in the package cache directory.

One pass over the cache root enforces three rules:
- loose files directly under the root are removed, regardless of age
- package directories that violate the cache layout are removed entirely
  (a layout-conformant directory holds exactly one .apk, exactly one
  attributes .json, at most one main and one patch expansion .obb,
  nothing else, and no subdirectories)
- package directories not used within the last 30 days are removed

Removal is best-effort: a failure on one entry never stops the pass.
The exit code is 0 only if every entry was brought into policy and no
I/O error occurred.

Examples:
    apk-cache-cleaner
    apk-cache-cleaner --dry-run
    apk-cache-cleaner --root /tmp/apkcache --format jsonl
"#
)]
pub struct Cli {
    /// Cache root directory to clean.
    #[arg(
        long,
        default_value = DEFAULT_CACHE_ROOT,
        value_name = "ROOT",
        long_help = "Cache root directory to clean (defaults to the production cache path).\n\n\
Intended for testing; production invocations run against the default."
    )]
    pub root: PathBuf,

    /// Output format (text/jsonl/json).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format for the per-entry report.\n\n\
Supported values:\n\
- text (default): one line per entry plus a summary line\n\
- jsonl: one JSON object per entry\n\
- json: a single JSON array"
    )]
    pub format: String,

    /// Report what would be removed without removing anything.
    #[arg(
        long,
        long_help = "Scan and report condemned entries without touching the filesystem.\n\
The exit code still reflects scan errors."
    )]
    pub dry_run: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (summary only, no per-entry lines).
    #[arg(
        short,
        long,
        long_help = "Only print the summary line (text format) or nothing (jsonl/json).\n\
The exit code is unaffected."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Print scan diagnostics to stderr, including the root and the scan time."
    )]
    pub verbose: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let now = SystemTime::now();

    if cli.verbose {
        eprintln!(
            "cleaning {} at {}{}",
            cli.root.display(),
            format_timestamp(now),
            if cli.dry_run { " (dry run)" } else { "" }
        );
    }

    let report = clean::clean_at(&cli.root, now, cli.dry_run)?;

    let mut output = Renderer::new(format).render(&report);
    if cli.quiet {
        output = match format {
            // Keep only the trailing summary line in quiet mode
            OutputFormat::Text => output.lines().last().unwrap_or_default().to_string(),
            OutputFormat::Jsonl | OutputFormat::Json => String::new(),
        };
    }
    if !output.is_empty() {
        println!("{}", output);
    }

    if !report.ok() {
        bail!(
            "{} entr(ies) could not be reconciled",
            report.error_count()
        );
    }
    Ok(())
}
