//! Connectivity capabilities and the disablement blame table
//!
//! Every check declares which endpoint it needs to reach. The capability
//! decides whether the check can run at all against the resolved URLs, and
//! which invocation parameter the disablement diagnostic should point the
//! operator at.

use crate::config::Configuration;
use serde::{Deserialize, Serialize};

/// Connectivity a check requires before it can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// No endpoint required, the check always runs
    None,
    /// Needs the authoring endpoint
    Author,
    /// Needs the publishing endpoint
    Publish,
    /// Needs the caching/dispatch endpoint
    Dispatcher,
}

impl Capability {
    /// Whether the endpoint this capability needs is configured
    pub fn can_run(&self, configuration: &Configuration) -> bool {
        match self {
            Capability::None => true,
            _ => self
                .endpoint_url(configuration)
                .map(|url| !url.is_empty())
                .unwrap_or(true),
        }
    }

    /// The base URL a check with this capability probes, if any
    pub fn endpoint_url<'a>(&self, configuration: &'a Configuration) -> Option<&'a str> {
        match self {
            Capability::None => None,
            Capability::Author => Some(configuration.author_url()),
            Capability::Publish => Some(configuration.publish_url()),
            Capability::Dispatcher => Some(configuration.dispatcher_url()),
        }
    }

    /// The invocation parameter a disablement diagnostic blames, if any
    pub fn blamed(&self) -> Option<UrlParam> {
        BLAME_TABLE
            .iter()
            .find(|(capability, _)| capability == self)
            .map(|(_, param)| *param)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::None => write!(f, "none"),
            Capability::Author => write!(f, "author"),
            Capability::Publish => write!(f, "publish"),
            Capability::Dispatcher => write!(f, "dispatcher"),
        }
    }
}

/// One of the three endpoint URL parameters the caller supplies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlParam {
    AuthorUrl,
    PublishUrl,
    DispatcherUrl,
}

impl UrlParam {
    /// Parameter name as surfaced in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            UrlParam::AuthorUrl => "author_url",
            UrlParam::PublishUrl => "publish_url",
            UrlParam::DispatcherUrl => "dispatcher_url",
        }
    }

    /// The command-line flag that sets this parameter
    pub fn flag(&self) -> &'static str {
        match self {
            UrlParam::AuthorUrl => "--author-url",
            UrlParam::PublishUrl => "--publish-url",
            UrlParam::DispatcherUrl => "--dispatcher-url",
        }
    }

    /// The currently configured value of this parameter
    pub fn value<'a>(&self, configuration: &'a Configuration) -> &'a str {
        match self {
            UrlParam::AuthorUrl => configuration.author_url(),
            UrlParam::PublishUrl => configuration.publish_url(),
            UrlParam::DispatcherUrl => configuration.dispatcher_url(),
        }
    }
}

/// Capability → blamed parameter, kept as data so the pairing can be audited
/// in one place.
///
/// TODO: the Author and Dispatcher rows look swapped relative to the
/// capability names; confirm the pairing is intentional before changing it.
const BLAME_TABLE: &[(Capability, UrlParam)] = &[
    (Capability::Dispatcher, UrlParam::AuthorUrl),
    (Capability::Publish, UrlParam::PublishUrl),
    (Capability::Author, UrlParam::DispatcherUrl),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EmptyStore;

    fn configuration(author: &str, publish: &str, dispatcher: &str) -> Configuration {
        Configuration::new(author, publish, dispatcher, Box::new(EmptyStore))
    }

    #[test]
    fn test_none_always_runs() {
        let cfg = configuration("", "", "");
        assert!(Capability::None.can_run(&cfg));
    }

    #[test]
    fn test_can_run_needs_matching_url() {
        let cfg = configuration("http://localhost:4502", "", "");
        assert!(Capability::Author.can_run(&cfg));
        assert!(!Capability::Publish.can_run(&cfg));
        assert!(!Capability::Dispatcher.can_run(&cfg));

        let cfg = configuration("", "http://localhost:4503", "http://localhost:80");
        assert!(!Capability::Author.can_run(&cfg));
        assert!(Capability::Publish.can_run(&cfg));
        assert!(Capability::Dispatcher.can_run(&cfg));
    }

    #[test]
    fn test_endpoint_url_uses_straight_mapping() {
        let cfg = configuration("http://a", "http://p", "http://d");
        assert_eq!(Capability::Author.endpoint_url(&cfg), Some("http://a"));
        assert_eq!(Capability::Publish.endpoint_url(&cfg), Some("http://p"));
        assert_eq!(Capability::Dispatcher.endpoint_url(&cfg), Some("http://d"));
        assert_eq!(Capability::None.endpoint_url(&cfg), None);
    }

    #[test]
    fn test_blame_table_pairing() {
        assert_eq!(Capability::Dispatcher.blamed(), Some(UrlParam::AuthorUrl));
        assert_eq!(Capability::Publish.blamed(), Some(UrlParam::PublishUrl));
        assert_eq!(Capability::Author.blamed(), Some(UrlParam::DispatcherUrl));
        assert_eq!(Capability::None.blamed(), None);
    }

    #[test]
    fn test_blamed_param_surfaces_flag_and_value() {
        let cfg = configuration("http://a", "", "");
        let param = Capability::Dispatcher.blamed().unwrap();
        assert_eq!(param.name(), "author_url");
        assert_eq!(param.flag(), "--author-url");
        assert_eq!(param.value(&cfg), "http://a");
    }
}
