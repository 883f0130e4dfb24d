//! Endpoint configuration sanity check
//!
//! Runs before anything touches the network and fails when a configured
//! endpoint URL is not a well-formed http(s) URL, or when nothing is
//! configured at all.

use cqsentry_core::{CheckOutcome, Configuration, Result, SecurityCheck};

pub struct ConfigValidationCheck {
    configuration: Configuration,
}

pub fn build(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    Ok(Box::new(ConfigValidationCheck { configuration }))
}

impl SecurityCheck for ConfigValidationCheck {
    fn run(&self) -> Result<CheckOutcome> {
        let mut errors = Vec::new();
        let mut infos = Vec::new();

        let endpoints = [
            ("author_url", self.configuration.author_url()),
            ("publish_url", self.configuration.publish_url()),
            ("dispatcher_url", self.configuration.dispatcher_url()),
        ];

        let mut configured = 0;
        for (name, value) in endpoints {
            if value.is_empty() {
                continue;
            }
            configured += 1;
            if is_well_formed(value) {
                infos.push(format!("{name} '{value}' is well-formed"));
            } else {
                errors.push(format!("{name} '{value}' is not a valid http(s) URL"));
            }
        }

        if configured == 0 {
            errors.push("no endpoint URL is configured, there is nothing to scan".to_string());
        }

        Ok(CheckOutcome::from_messages(errors, infos))
    }
}

fn is_well_formed(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}
