//! Renderer module
//!
//! Renders a CleanReport to different output formats: text, jsonl, json.
//! Text is the human-facing default; jsonl/json exist for piping into
//! monitoring or test tooling.

use colored::Colorize;

use crate::core::model::{Action, CleanReport, ReportItem};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Renderer for clean reports
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a report to a string
    pub fn render(&self, report: &CleanReport) -> String {
        match self.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
        }
    }

    /// Render as JSON Lines (one JSON object per entry)
    fn render_jsonl(&self, report: &CleanReport) -> String {
        report
            .items
            .iter()
            .filter_map(|item| serde_json::to_string(item).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as a single JSON array
    fn render_json(&self, report: &CleanReport) -> String {
        serde_json::to_string_pretty(&report.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Render as a human-readable listing plus a summary line
    fn render_text(&self, report: &CleanReport) -> String {
        let mut lines: Vec<String> = report.items.iter().map(text_line).collect();
        lines.push(summary_line(report));
        lines.join("\n")
    }
}

fn text_line(item: &ReportItem) -> String {
    // Pad before coloring: ANSI escape bytes would count toward the width
    let label = format!(
        "{:>12}",
        match item.action {
            Action::RemovedFile | Action::RemovedPackage => "removed",
            Action::WouldRemoveFile | Action::WouldRemovePackage => "would remove",
            Action::Kept => "kept",
            Action::Error => "error",
        }
    );
    let label = match item.action {
        Action::Kept => label.green(),
        Action::Error => label.red(),
        _ => label.yellow(),
    };

    match item.action {
        Action::Error => {
            let detail = item.error.as_deref().unwrap_or("unknown error");
            format!("{}  {}: {}", label, item.path, detail)
        }
        Action::Kept => format!("{}  {}", label, item.path),
        _ => {
            let reason = item.reason.as_deref().unwrap_or("loose file");
            format!("{}  {} ({})", label, item.path, reason)
        }
    }
}

fn summary_line(report: &CleanReport) -> String {
    let (files, packages, verb) = if report.is_dry_run() {
        (
            report.would_remove_file_count(),
            report.would_remove_package_count(),
            "would be removed",
        )
    } else {
        (
            report.removed_file_count(),
            report.removed_package_count(),
            "removed",
        )
    };
    let summary = format!(
        "{} loose file(s) {}, {} package(s) {}, {} package(s) kept, {} error(s)",
        files,
        verb,
        packages,
        verb,
        report.kept_count(),
        report.error_count()
    );
    if report.ok() {
        summary
    } else {
        format!("{} {}", "FAILED:".red().bold(), summary)
    }
}
