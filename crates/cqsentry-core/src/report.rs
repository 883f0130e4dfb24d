//! Outcome and report types for security scans

use crate::capability::UrlParam;
use serde::{Deserialize, Serialize};

/// Classified result of one check invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The check ran to completion and found nothing
    Ok,
    /// The check ran to completion and found issues
    Failed,
    /// The check declined to run because required connectivity was not
    /// configured; counts as passing for the overall verdict
    Disabled,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "OK"),
            CheckStatus::Failed => write!(f, "FAILED"),
            CheckStatus::Disabled => write!(f, "DISABLED"),
        }
    }
}

/// What one check invocation produced: a status plus its diagnostics, in the
/// order the check emitted them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub info_messages: Vec<String>,
}

impl CheckOutcome {
    /// Outcome of a check whose required endpoint was not configured
    pub fn disabled() -> Self {
        Self {
            status: CheckStatus::Disabled,
            error_messages: Vec::new(),
            info_messages: Vec::new(),
        }
    }

    /// Classify collected diagnostics: any error message means `Failed`,
    /// otherwise `Ok`.
    pub fn from_messages(error_messages: Vec<String>, info_messages: Vec<String>) -> Self {
        let status = if error_messages.is_empty() {
            CheckStatus::Ok
        } else {
            CheckStatus::Failed
        };
        Self {
            status,
            error_messages,
            info_messages,
        }
    }

    /// Whether this outcome keeps the overall verdict true
    pub fn passes(&self) -> bool {
        self.status != CheckStatus::Failed
    }
}

/// One check's entry in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Registered check name
    pub name: String,

    /// Classified result
    pub status: CheckStatus,

    /// Diagnostics for issues the check found
    #[serde(default)]
    pub error_messages: Vec<String>,

    /// Diagnostics for probes that came back clean
    #[serde(default)]
    pub info_messages: Vec<String>,

    /// The parameter a disabled check blames, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blamed: Option<UrlParam>,
}

/// Complete result of one scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the scan started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// When the scan completed
    pub completed_at: chrono::DateTime<chrono::Utc>,

    /// Normalized authoring endpoint URL, empty when not configured
    pub author_url: String,

    /// Normalized publishing endpoint URL, empty when not configured
    pub publish_url: String,

    /// Normalized dispatch endpoint URL, empty when not configured
    pub dispatcher_url: String,

    /// Per-check entries in execution order
    pub checks: Vec<CheckReport>,

    /// The overall verdict: true unless some check reported `Failed`
    pub passed: bool,
}

impl ScanReport {
    /// Create an empty report for the given (already normalized) targets
    pub fn new(author_url: &str, publish_url: &str, dispatcher_url: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            started_at: now,
            completed_at: now,
            author_url: author_url.to_string(),
            publish_url: publish_url.to_string(),
            dispatcher_url: dispatcher_url.to_string(),
            checks: Vec::new(),
            passed: true,
        }
    }

    /// Record one check's entry
    pub fn add_check(&mut self, check: CheckReport) {
        self.checks.push(check);
    }

    /// Mark the scan as completed
    pub fn complete(&mut self) {
        self.completed_at = chrono::Utc::now();
    }

    /// Number of checks that found issues
    pub fn failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Failed)
            .count()
    }
}
