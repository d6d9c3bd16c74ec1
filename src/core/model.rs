//! Clean-pass result model
//!
//! Every per-entry outcome of a clean pass maps to one [`ReportItem`]
//! before rendering, so text and machine-readable output always agree.

use serde::{Deserialize, Serialize};

/// What happened (or would happen) to one cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A loose file under the root was unlinked
    RemovedFile,
    /// A condemned package directory was deleted recursively
    RemovedPackage,
    /// Dry run: a loose file would be unlinked
    WouldRemoveFile,
    /// Dry run: a condemned package directory would be deleted
    WouldRemovePackage,
    /// A valid, fresh package directory was retained
    Kept,
    /// The entry could not be inspected or removed
    Error,
}

/// One per-entry outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub action: Action,

    /// Absolute path of the cache entry
    pub path: String,

    /// Human-readable condemnation reason, for removals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Stable short code matching `reason`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,

    /// Error detail, for `Action::Error` items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportItem {
    pub fn new(action: Action, path: impl Into<String>) -> Self {
        Self {
            action,
            path: path.into(),
            reason: None,
            reason_code: None,
            error: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>, code: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self.reason_code = Some(code.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Aggregate outcome of one clean pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanReport {
    pub items: Vec<ReportItem>,
}

impl CleanReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ReportItem) {
        self.items.push(item);
    }

    /// The aggregate success signal: true iff no entry failed
    pub fn ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Action::Error)
    }

    pub fn kept_count(&self) -> usize {
        self.count(Action::Kept)
    }

    pub fn removed_file_count(&self) -> usize {
        self.count(Action::RemovedFile)
    }

    pub fn removed_package_count(&self) -> usize {
        self.count(Action::RemovedPackage)
    }

    pub fn would_remove_file_count(&self) -> usize {
        self.count(Action::WouldRemoveFile)
    }

    pub fn would_remove_package_count(&self) -> usize {
        self.count(Action::WouldRemovePackage)
    }

    /// True iff this report came from a dry run that found work to do
    pub fn is_dry_run(&self) -> bool {
        self.would_remove_file_count() + self.would_remove_package_count() > 0
    }

    fn count(&self, action: Action) -> usize {
        self.items.iter().filter(|i| i.action == action).count()
    }
}
