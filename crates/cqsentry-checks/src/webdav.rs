//! WebDAV exposure probe
//!
//! Issues `OPTIONS` against configured repository paths and flags responses
//! that advertise WebDAV: a `DAV` compliance header, or WebDAV verbs in the
//! `Allow` header. Anonymous WebDAV access to the content repository means
//! the repository tree can be browsed and, in the worst case, written.

use crate::http;
use cqsentry_core::{Capability, CheckOutcome, Configuration, Result, SecurityCheck};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, ALLOW};
use reqwest::Method;
use tracing::debug;

const CAPABILITY: Capability = Capability::Author;

const DAV_METHODS: &[&str] = &["PROPFIND", "PROPPATCH", "MKCOL", "LOCK", "UNLOCK"];

pub struct WebDavCheck {
    configuration: Configuration,
    client: Client,
}

pub fn build(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    let client = http::build_client(&configuration)?;
    Ok(Box::new(WebDavCheck {
        configuration,
        client,
    }))
}

impl SecurityCheck for WebDavCheck {
    fn run(&self) -> Result<CheckOutcome> {
        if !CAPABILITY.can_run(&self.configuration) {
            return Ok(CheckOutcome::disabled());
        }
        let base = CAPABILITY
            .endpoint_url(&self.configuration)
            .unwrap_or_default();

        let mut errors = Vec::new();
        let mut infos = Vec::new();

        for path in self.configuration.string_list("dav_paths") {
            let probe_url = http::join_url(base, &path);
            debug!("OPTIONS {probe_url}");

            match self.client.request(Method::OPTIONS, &probe_url).send() {
                Ok(response) if advertises_dav(response.headers()) => {
                    errors.push(format!("'{probe_url}' advertises WebDAV access"));
                }
                Ok(response) => {
                    infos.push(format!(
                        "'{probe_url}' does not advertise WebDAV ({})",
                        response.status()
                    ));
                }
                Err(e) => {
                    errors.push(format!("could not probe '{probe_url}': {e}"));
                }
            }
        }

        Ok(CheckOutcome::from_messages(errors, infos))
    }
}

fn advertises_dav(headers: &HeaderMap) -> bool {
    if headers.contains_key("dav") {
        return true;
    }
    headers
        .get(ALLOW)
        .and_then(|value| value.to_str().ok())
        .map(|allow| {
            let allow = allow.to_ascii_uppercase();
            DAV_METHODS.iter().any(|method| allow.contains(method))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqsentry_core::{CheckStatus, EmptyStore};
    use reqwest::header::HeaderValue;

    #[test]
    fn test_dav_header_is_flagged() {
        let mut headers = HeaderMap::new();
        headers.insert("dav", HeaderValue::from_static("1,2"));
        assert!(advertises_dav(&headers));
    }

    #[test]
    fn test_dav_verbs_in_allow_are_flagged() {
        let mut headers = HeaderMap::new();
        headers.insert(ALLOW, HeaderValue::from_static("GET, HEAD, PROPFIND"));
        assert!(advertises_dav(&headers));
    }

    #[test]
    fn test_plain_allow_is_clean() {
        let mut headers = HeaderMap::new();
        headers.insert(ALLOW, HeaderValue::from_static("GET, HEAD, POST"));
        assert!(!advertises_dav(&headers));
        assert!(!advertises_dav(&HeaderMap::new()));
    }

    #[test]
    fn test_disabled_without_author_url() {
        let configuration = Configuration::new("", "", "", Box::new(EmptyStore));
        let client = http::build_client(&configuration).unwrap();
        let check = WebDavCheck {
            configuration,
            client,
        };
        assert_eq!(check.run().unwrap().status, CheckStatus::Disabled);
    }
}
