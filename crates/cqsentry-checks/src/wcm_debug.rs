//! WCM debug layer probe
//!
//! Fetches configured pages with `?debug=layout` and flags responses whose
//! body carries layout debug markers. A production authoring tier must not
//! render its component debugging output to anonymous visitors.

use crate::http;
use cqsentry_core::{Capability, CheckOutcome, Configuration, Result, SecurityCheck};
use reqwest::blocking::Client;
use tracing::debug;

const CAPABILITY: Capability = Capability::Author;

pub struct WcmDebugCheck {
    configuration: Configuration,
    client: Client,
}

pub fn build(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    let client = http::build_client(&configuration)?;
    Ok(Box::new(WcmDebugCheck {
        configuration,
        client,
    }))
}

impl SecurityCheck for WcmDebugCheck {
    fn run(&self) -> Result<CheckOutcome> {
        if !CAPABILITY.can_run(&self.configuration) {
            return Ok(CheckOutcome::disabled());
        }
        let base = CAPABILITY
            .endpoint_url(&self.configuration)
            .unwrap_or_default();

        let markers = self.configuration.string_list("markers");
        let mut errors = Vec::new();
        let mut infos = Vec::new();

        for path in self.configuration.string_list("paths") {
            let probe_url = format!("{}?debug=layout", http::join_url(base, &path));
            debug!("fetching {probe_url}");

            match self.client.get(&probe_url).send() {
                Ok(response) if response.status().is_success() => match response.text() {
                    Ok(body) => {
                        if let Some(marker) = markers.iter().find(|m| body.contains(m.as_str())) {
                            errors.push(format!(
                                "'{probe_url}' renders debug layout output ('{marker}')"
                            ));
                        } else {
                            infos.push(format!("'{probe_url}' ignores the debug parameter"));
                        }
                    }
                    Err(e) => {
                        errors.push(format!("could not read body of '{probe_url}': {e}"));
                    }
                },
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
