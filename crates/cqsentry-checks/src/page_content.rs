//! Forbidden page reachability probe
//!
//! Fetches a configured list of paths that a hardened deployment must not
//! serve (administrative consoles, query debuggers, sample content). A path
//! that answers with success — optionally qualified by a `match` substring
//! that must appear in the body — is a finding; a blocked path is reported
//! as passing. Backs `dispatcher-access`, `shindig-proxy`, `etc-tools` and
//! `geometrixx`, each against the endpoint its capability names.

use crate::http;
use cqsentry_core::{Capability, CheckOutcome, Configuration, Result, SecurityCheck};
use reqwest::blocking::Client;
use tracing::debug;

pub struct PageContentCheck {
    configuration: Configuration,
    capability: Capability,
    client: Client,
}

pub fn build(configuration: Configuration, capability: Capability) -> Result<Box<dyn SecurityCheck>> {
    let client = http::build_client(&configuration)?;
    Ok(Box::new(PageContentCheck {
        configuration,
        capability,
        client,
    }))
}

impl SecurityCheck for PageContentCheck {
    fn run(&self) -> Result<CheckOutcome> {
        if !self.capability.can_run(&self.configuration) {
            return Ok(CheckOutcome::disabled());
        }
        let base = self
            .capability
            .endpoint_url(&self.configuration)
            .unwrap_or_default();

        let match_text = self.configuration.string_value("match", "");
        let mut errors = Vec::new();
        let mut infos = Vec::new();

        for path in self.configuration.string_list("paths") {
            let probe_url = http::join_url(base, &path);
            debug!("fetching {probe_url}");

            match self.client.get(&probe_url).send() {
                Ok(response) if response.status().is_success() => {
                    if match_text.is_empty() {
                        errors.push(format!("'{probe_url}' is publicly reachable"));
                        continue;
                    }
                    match response.text() {
                        Ok(body) if body.contains(&match_text) => {
                            errors.push(format!(
                                "'{probe_url}' is reachable and exposes '{match_text}'"
                            ));
                        }
                        Ok(_) => {
                            infos.push(format!(
                                "'{probe_url}' does not expose '{match_text}'"
                            ));
                        }
                        Err(e) => {
                            errors.push(format!("could not read body of '{probe_url}': {e}"));
                        }
                    }
                }
                Ok(response) => {
                    infos.push(format!("'{probe_url}' is blocked ({})", response.status()));
                }
                Err(e) => {
                    errors.push(format!("could not probe '{probe_url}': {e}"));
                }
            }
        }

        Ok(CheckOutcome::from_messages(errors, infos))
    }
}
