//! Selector and extension grabbing probe
//!
//! Requests every configured path with every configured suffix appended —
//! raw rendition extensions (`.infinity.json`, `.sysview.xml`), feed
//! selectors, or bogus cache-busting selectors. A suffixed URL that answers
//! with success leaks content or floods the cache. Backs `content-grabbing`,
//! `feed-selector` and `redundant-selectors`.

use crate::http;
use cqsentry_core::{Capability, CheckOutcome, Configuration, Result, SecurityCheck};
use reqwest::blocking::Client;
use tracing::debug;

pub struct ExtensionsCheck {
    configuration: Configuration,
    capability: Capability,
    client: Client,
}

pub fn build(configuration: Configuration, capability: Capability) -> Result<Box<dyn SecurityCheck>> {
    let client = http::build_client(&configuration)?;
    Ok(Box::new(ExtensionsCheck {
        configuration,
        capability,
        client,
    }))
}

impl SecurityCheck for ExtensionsCheck {
    fn run(&self) -> Result<CheckOutcome> {
        if !self.capability.can_run(&self.configuration) {
            return Ok(CheckOutcome::disabled());
        }
        let base = self
            .capability
            .endpoint_url(&self.configuration)
            .unwrap_or_default();

        let paths = self.configuration.string_list("paths");
        let suffixes = self.configuration.string_list("extensions");

        let mut errors = Vec::new();
        let mut infos = Vec::new();

        for path in &paths {
            for suffix in &suffixes {
                let probe_url = http::join_url(base, &format!("{path}{suffix}"));
                debug!("fetching {probe_url}");

                match self.client.get(&probe_url).send() {
                    Ok(response) if response.status().is_success() => {
                        errors.push(format!("'{probe_url}' serves content for this suffix"));
                    }
                    Ok(response) => {
                        infos.push(format!("'{probe_url}' is blocked ({})", response.status()));
                    }
                    Err(e) => {
                        errors.push(format!("could not probe '{probe_url}': {e}"));
                    }
                }
            }
        }

        Ok(CheckOutcome::from_messages(errors, infos))
    }
}
