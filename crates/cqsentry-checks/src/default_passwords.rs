//! Default credential probe
//!
//! Tries well-known factory credential pairs against the configured author
//! and publish instances. An instance that answers an authenticated request
//! with success still ships its default accounts.

use crate::http;
use cqsentry_core::{CheckOutcome, Configuration, Result, SecurityCheck};
use reqwest::blocking::Client;
use tracing::debug;

const DEFAULT_LOGIN_PATH: &str = "/libs/cq/core/content/welcome.html";

pub struct DefaultPasswordsCheck {
    configuration: Configuration,
    client: Client,
}

pub fn build(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    let client = http::build_client(&configuration)?;
    Ok(Box::new(DefaultPasswordsCheck {
        configuration,
        client,
    }))
}

impl SecurityCheck for DefaultPasswordsCheck {
    fn run(&self) -> Result<CheckOutcome> {
        let targets: Vec<(&str, &str)> = [
            ("author", self.configuration.author_url()),
            ("publish", self.configuration.publish_url()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect();

        // capability is None, so disablement is this check's own call
        if targets.is_empty() {
            return Ok(CheckOutcome::disabled());
        }

        let login_path = self
            .configuration
            .string_value("login_path", DEFAULT_LOGIN_PATH);
        let credentials = self.configuration.string_list("credentials");

        let mut errors = Vec::new();
        let mut infos = Vec::new();

        if credentials.is_empty() {
            infos.push("no credential pairs configured, nothing to probe".to_string());
        }

        for (label, base) in targets {
            let probe_url = http::join_url(base, &login_path);

            for entry in &credentials {
                let Some((user, password)) = entry.split_once(':') else {
                    debug!("ignoring malformed credential entry '{entry}'");
                    continue;
                };

                debug!("probing {probe_url} as '{user}'");
                match self
                    .client
                    .get(&probe_url)
                    .basic_auth(user, Some(password))
                    .send()
                {
                    Ok(response) if response.status().is_success() => {
                        errors.push(format!(
                            "{label} instance at '{base}' accepts the default credentials of user '{user}'"
                        ));
                    }
                    Ok(response) => {
                        infos.push(format!(
                            "{label} instance rejects user '{user}' ({})",
                            response.status()
                        ));
                    }
                    Err(e) => {
                        errors.push(format!(
                            "could not probe {label} instance at '{probe_url}': {e}"
                        ));
                    }
                }
            }
        }

        Ok(CheckOutcome::from_messages(errors, infos))
    }
}
