//! Scan runner that orchestrates security checks
//!
//! Checks run one at a time, in the caller-supplied order, against the three
//! configured endpoint URLs. Each check gets a freshly resolved
//! configuration; nothing is shared across checks. A check that reports
//! `Failed` flips the overall verdict but never stops the run; an unknown
//! name is warned about and skipped; a configuration load or check
//! construction failure aborts the whole run.

use cqsentry_checks::{registry, CheckConfigSource, CheckDescriptor};
use cqsentry_core::{
    config::normalize_url, CheckReport, CheckStatus, Configuration, Error, Result, ScanReport,
    UrlParam,
};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::output;

/// Sequential orchestrator for a battery of named checks
pub struct ScanRunner {
    author_url: String,
    publish_url: String,
    dispatcher_url: String,
    config_dir: Option<PathBuf>,
}

impl ScanRunner {
    /// Create a runner for the given endpoints. URLs are normalized here;
    /// empty means "not configured".
    pub fn new(author_url: &str, publish_url: &str, dispatcher_url: &str) -> Self {
        Self {
            author_url: normalize_url(author_url),
            publish_url: normalize_url(publish_url),
            dispatcher_url: normalize_url(dispatcher_url),
            config_dir: None,
        }
    }

    /// Use per-check YAML overrides from this directory
    pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(config_dir.into());
        self
    }

    /// Run the named checks in order and return the report.
    ///
    /// `Err` means the scan could not be carried out (configuration load or
    /// check construction failed) — a different condition than a report with
    /// `passed == false`.
    pub fn run(&self, names: &[String]) -> Result<ScanReport> {
        let source = CheckConfigSource::new(self.config_dir.clone());
        let mut report = ScanReport::new(&self.author_url, &self.publish_url, &self.dispatcher_url);
        let mut passed = true;

        for name in names {
            let Some(descriptor) = registry::lookup(name) else {
                warn!("Security check '{name}' does not exist in this context, ignored.");
                continue;
            };

            info!("Performing security check '{name}'...");
            // the check runs before the fold, an earlier failure never
            // short-circuits later checks or their diagnostics
            let check_passed = self.perform_check(descriptor, &source, &mut report)?;
            passed = check_passed && passed;
        }

        report.passed = passed;
        report.complete();

        if passed {
            info!("All security checks passed.");
        } else {
            warn!("Security vulnerabilities detected, see the log for details.");
        }

        Ok(report)
    }

    fn perform_check(
        &self,
        descriptor: &CheckDescriptor,
        source: &CheckConfigSource,
        report: &mut ScanReport,
    ) -> Result<bool> {
        let store = source.store_for(descriptor.name)?;
        let configuration =
            Configuration::new(&self.author_url, &self.publish_url, &self.dispatcher_url, store);
        let hide_passed = configuration.string_value("hide_passed", "false") == "true";

        let check = (descriptor.factory)(configuration)
            .map_err(|e| Error::construction(descriptor.name, e))?;
        let outcome = check.run()?;

        if outcome.status == CheckStatus::Disabled {
            let blamed = descriptor.capability.blamed();
            match blamed {
                Some(param) => info!(
                    "{}",
                    output::disabled_message(descriptor.name, param, self.url_value(param))
                ),
                None => info!("{}", output::generic_disabled_message(descriptor.name)),
            }
            report.add_check(CheckReport {
                name: descriptor.name.to_string(),
                status: CheckStatus::Disabled,
                error_messages: Vec::new(),
                info_messages: Vec::new(),
                blamed,
            });
            return Ok(true);
        }

        info!("'{}' result: {}", descriptor.name, outcome.status);

        if !outcome.error_messages.is_empty() {
            warn!("'{}' detected some issues:", descriptor.name);
            for message in &outcome.error_messages {
                warn!(" - {message}");
            }
        }

        let info_messages = if hide_passed {
            Vec::new()
        } else {
            outcome.info_messages.clone()
        };
        if !info_messages.is_empty() {
            info!("'{}' passed probes:", descriptor.name);
            for message in &info_messages {
                info!(" - {message}");
            }
        }

        report.add_check(CheckReport {
            name: descriptor.name.to_string(),
            status: outcome.status,
            error_messages: outcome.error_messages.clone(),
            info_messages,
            blamed: None,
        });

        Ok(outcome.passes())
    }

    fn url_value(&self, param: UrlParam) -> &str {
        match param {
            UrlParam::AuthorUrl => &self.author_url,
            UrlParam::PublishUrl => &self.publish_url,
            UrlParam::DispatcherUrl => &self.dispatcher_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_name_is_skipped_and_verdict_stays_true() {
        let runner = ScanRunner::new("http://localhost:4502", "", "");
        let report = runner.run(&names(&["does-not-exist"])).unwrap();
        assert!(report.passed);
        assert!(report.checks.is_empty());
    }

    #[test]
    fn test_config_validation_passes_with_info_messages() {
        let runner = ScanRunner::new("http://localhost:4502", "http://localhost:4503", "");
        let report = runner.run(&names(&["config-validation"])).unwrap();
        assert!(report.passed);
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].status, CheckStatus::Ok);
        // hide_passed is unset, both info messages are reported
        assert_eq!(report.checks[0].info_messages.len(), 2);
    }

    #[test]
    fn test_disabled_check_blames_per_table_and_passes() {
        let runner = ScanRunner::new("http://localhost:4502", "", "");
        let report = runner.run(&names(&["dispatcher-access"])).unwrap();
        assert!(report.passed);
        assert_eq!(report.checks[0].status, CheckStatus::Disabled);
        assert_eq!(report.checks[0].blamed, Some(UrlParam::AuthorUrl));
    }

    #[test]
    fn test_failed_flips_verdict_even_with_later_disabled() {
        // malformed author URL keeps its scheme through normalization, so
        // config-validation fails without touching the network
        let runner = ScanRunner::new("http://bad host", "", "");
        let report = runner
            .run(&names(&["config-validation", "dispatcher-access"]))
            .unwrap();
        assert!(!report.passed);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.checks[0].status, CheckStatus::Failed);
        assert_eq!(report.checks[1].status, CheckStatus::Disabled);
    }

    #[test]
    fn test_later_checks_still_run_after_a_failure() {
        let runner = ScanRunner::new("http://bad host", "", "");
        let report = runner
            .run(&names(&["config-validation", "config-validation"]))
            .unwrap();
        // both invocations ran and reported, the verdict reflects both
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.failed_count(), 2);
        assert!(!report.passed);
    }

    #[test]
    fn test_ok_failed_disabled_aggregate_to_failed() {
        // webdav sees a non-empty author URL and an empty probe list -> Ok;
        // config-validation rejects the malformed URL -> Failed;
        // dispatcher-access has no dispatcher URL -> Disabled
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("webdav.yaml")).unwrap();
        writeln!(file, "dav_paths: []").unwrap();

        let runner =
            ScanRunner::new("http://bad host", "", "").with_config_dir(dir.path().to_path_buf());
        let report = runner
            .run(&names(&["webdav", "config-validation", "dispatcher-access"]))
            .unwrap();
        assert_eq!(report.checks[0].status, CheckStatus::Ok);
        assert_eq!(report.checks[1].status, CheckStatus::Failed);
        assert_eq!(report.checks[2].status, CheckStatus::Disabled);
        assert!(!report.passed);
    }

    #[test]
    fn test_malformed_store_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("dispatcher-access.yaml")).unwrap();
        writeln!(file, "paths: [unclosed").unwrap();

        let runner = ScanRunner::new("http://localhost:4502", "", "")
            .with_config_dir(dir.path().to_path_buf());
        let err = runner
            .run(&names(&["dispatcher-access", "config-validation"]))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigLoad { ref check, .. } if check == "dispatcher-access"));
    }

    #[test]
    fn test_hide_passed_suppresses_info_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("config-validation.yaml")).unwrap();
        writeln!(file, "hide_passed: \"true\"").unwrap();

        let runner = ScanRunner::new("http://localhost:4502", "", "")
            .with_config_dir(dir.path().to_path_buf());
        let report = runner.run(&names(&["config-validation"])).unwrap();
        assert_eq!(report.checks[0].status, CheckStatus::Ok);
        assert!(report.checks[0].info_messages.is_empty());
    }

    #[test]
    fn test_default_passwords_disables_itself_without_targets() {
        // capability None, so no parameter is blamed
        let runner = ScanRunner::new("", "", "http://localhost:80");
        let report = runner.run(&names(&["default-passwords"])).unwrap();
        assert!(report.passed);
        assert_eq!(report.checks[0].status, CheckStatus::Disabled);
        assert_eq!(report.checks[0].blamed, None);
    }
}
