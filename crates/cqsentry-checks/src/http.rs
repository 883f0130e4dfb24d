//! Shared HTTP probing utilities for checks

use cqsentry_core::{Configuration, Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Per-request timeout when the check's store does not set `timeout_ms`
pub const DEFAULT_TIMEOUT_MS: &str = "5000";

/// Build the blocking client a check probes with.
///
/// Redirects are never followed: a redirect to a login page counts as the
/// endpoint blocking the request, and following it would misclassify the
/// probe.
pub fn build_client(configuration: &Configuration) -> Result<Client> {
    let raw = configuration.string_value("timeout_ms", DEFAULT_TIMEOUT_MS);
    let timeout_ms: u64 = raw
        .parse()
        .map_err(|_| Error::Other(format!("timeout_ms '{raw}' is not a number")))?;

    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| Error::Other(e.to_string()))
}

/// Join a normalized base URL and a path from a check's configuration
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
