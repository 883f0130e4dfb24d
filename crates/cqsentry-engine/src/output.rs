//! Report formatting and diagnostic messages

use cqsentry_core::{Result, ScanReport, UrlParam};

/// Disablement diagnostic naming the parameter the operator should set
pub fn disabled_message(name: &str, param: UrlParam, configured: &str) -> String {
    format!(
        "Security check '{name}' is disabled: set the {param} parameter (pass {flag} http://<host>:<port>) \
         and make sure the instance at '{configured}' is active and reachable.",
        param = param.name(),
        flag = param.flag(),
    )
}

/// Disablement diagnostic for a check that needs no specific endpoint
pub fn generic_disabled_message(name: &str) -> String {
    format!(
        "Security check '{name}' is disabled, skipping it. You may not have configured one of the \
         author/publish/dispatcher URLs this check probes."
    )
}

/// Render a scan report as human-readable text
pub fn format_text(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("cqsentry Security Scan Report\n{}\n\n", "=".repeat(29)));

    output.push_str(&format!("Author:     {}\n", target_or_dash(&report.author_url)));
    output.push_str(&format!("Publish:    {}\n", target_or_dash(&report.publish_url)));
    output.push_str(&format!("Dispatcher: {}\n", target_or_dash(&report.dispatcher_url)));
    output.push_str(&format!(
        "Duration:   {}ms\n\n",
        (report.completed_at - report.started_at).num_milliseconds()
    ));

    if !report.checks.is_empty() {
        output.push_str("Checks\n------\n");
        for check in &report.checks {
            output.push_str(&format!("[{}] {}\n", check.status, check.name));

            if let Some(param) = check.blamed {
                output.push_str(&format!("    set {} to enable this check\n", param.flag()));
            }
            for message in &check.error_messages {
                output.push_str(&format!("    ! {message}\n"));
            }
            for message in &check.info_messages {
                output.push_str(&format!("    - {message}\n"));
            }
        }
        output.push('\n');
    }

    if report.passed {
        output.push_str("Result: all security checks passed\n");
    } else {
        output.push_str(&format!(
            "Result: {} check(s) detected vulnerabilities\n",
            report.failed_count()
        ));
    }

    output
}

/// Render a scan report as JSON
pub fn format_json(report: &ScanReport, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(report).map_err(Into::into)
    } else {
        serde_json::to_string(report).map_err(Into::into)
    }
}

fn target_or_dash(url: &str) -> &str {
    if url.is_empty() {
        "(not configured)"
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqsentry_core::{CheckReport, CheckStatus};

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new("http://localhost:4502", "", "");
        report.add_check(CheckReport {
            name: "config-validation".into(),
            status: CheckStatus::Ok,
            error_messages: Vec::new(),
            info_messages: vec!["author_url 'http://localhost:4502' is well-formed".into()],
            blamed: None,
        });
        report.add_check(CheckReport {
            name: "dispatcher-access".into(),
            status: CheckStatus::Disabled,
            error_messages: Vec::new(),
            info_messages: Vec::new(),
            blamed: Some(UrlParam::AuthorUrl),
        });
        report
    }

    #[test]
    fn test_disabled_message_names_flag_and_value() {
        let message = disabled_message("webdav", UrlParam::DispatcherUrl, "");
        assert!(message.contains("webdav"));
        assert!(message.contains("dispatcher_url"));
        assert!(message.contains("--dispatcher-url"));
    }

    #[test]
    fn test_format_text_success_banner() {
        let text = format_text(&sample_report());
        assert!(text.contains("[OK] config-validation"));
        assert!(text.contains("[DISABLED] dispatcher-access"));
        assert!(text.contains("set --author-url to enable this check"));
        assert!(text.contains("all security checks passed"));
    }

    #[test]
    fn test_format_text_failure_banner() {
        let mut report = sample_report();
        report.add_check(CheckReport {
            name: "webdav".into(),
            status: CheckStatus::Failed,
            error_messages: vec!["'http://a/crx/repository' advertises WebDAV access".into()],
            info_messages: Vec::new(),
            blamed: None,
        });
        report.passed = false;

        let text = format_text(&report);
        assert!(text.contains("[FAILED] webdav"));
        assert!(text.contains("! 'http://a/crx/repository' advertises WebDAV access"));
        assert!(text.contains("1 check(s) detected vulnerabilities"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let json = format_json(&sample_report(), false).unwrap();
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.checks.len(), 2);
        assert!(parsed.passed);
    }
}
