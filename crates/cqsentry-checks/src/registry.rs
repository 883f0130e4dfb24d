//! The check registry
//!
//! A single compile-time table maps every public check name to the
//! connectivity capability it requires and the function that constructs it.
//! Registration order is the order checks run in when the caller selects no
//! explicit subset, and it is stable across runs.
//!
//! Names must be unique within the table; this is an invariant of the table,
//! not something [`lookup`] enforces. A duplicate entry would be shadowed by
//! the first match.

use crate::{config_validation, default_passwords, extensions, page_content, wcm_debug, webdav};
use cqsentry_core::{Capability, CheckFactory, Configuration, Result, SecurityCheck};

/// One registered check: its public name, the connectivity it needs, and how
/// to build it
pub struct CheckDescriptor {
    pub name: &'static str,
    pub capability: Capability,
    pub description: &'static str,
    pub factory: CheckFactory,
}

/// All registered checks, in registration order
pub const REGISTRY: &[CheckDescriptor] = &[
    CheckDescriptor {
        name: "config-validation",
        capability: Capability::None,
        description: "Endpoint URLs are well-formed and something is configured",
        factory: config_validation::build,
    },
    CheckDescriptor {
        name: "default-passwords",
        capability: Capability::None,
        description: "Factory credential pairs are rejected by author and publish",
        factory: default_passwords::build,
    },
    CheckDescriptor {
        name: "dispatcher-access",
        capability: Capability::Dispatcher,
        description: "Administrative paths are blocked at the dispatcher",
        factory: dispatcher_access,
    },
    CheckDescriptor {
        name: "shindig-proxy",
        capability: Capability::Author,
        description: "The gadget proxy does not relay arbitrary URLs",
        factory: shindig_proxy,
    },
    CheckDescriptor {
        name: "etc-tools",
        capability: Capability::Author,
        description: "Operational tool pages under /etc are not exposed",
        factory: etc_tools,
    },
    CheckDescriptor {
        name: "content-grabbing",
        capability: Capability::Publish,
        description: "Raw rendition extensions do not leak content trees",
        factory: content_grabbing,
    },
    CheckDescriptor {
        name: "feed-selector",
        capability: Capability::Publish,
        description: "Feed selectors are disabled on published content",
        factory: feed_selector,
    },
    CheckDescriptor {
        name: "wcm-debug",
        capability: Capability::Author,
        description: "The debug layout layer is not rendered",
        factory: wcm_debug::build,
    },
    CheckDescriptor {
        name: "webdav",
        capability: Capability::Author,
        description: "WebDAV repository access is not advertised",
        factory: webdav::build,
    },
    CheckDescriptor {
        name: "geometrixx",
        capability: Capability::Publish,
        description: "Sample content is not present on the publish tier",
        factory: geometrixx,
    },
    CheckDescriptor {
        name: "redundant-selectors",
        capability: Capability::Dispatcher,
        description: "Bogus selectors cannot flood the dispatcher cache",
        factory: redundant_selectors,
    },
];

/// Find a registered check by name
pub fn lookup(name: &str) -> Option<&'static CheckDescriptor> {
    REGISTRY.iter().find(|descriptor| descriptor.name == name)
}

/// All registered names, in registration order
pub fn all_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|descriptor| descriptor.name).collect()
}

fn dispatcher_access(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    page_content::build(configuration, Capability::Dispatcher)
}

fn shindig_proxy(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    page_content::build(configuration, Capability::Author)
}

fn etc_tools(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    page_content::build(configuration, Capability::Author)
}

fn geometrixx(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    page_content::build(configuration, Capability::Publish)
}

fn content_grabbing(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    extensions::build(configuration, Capability::Publish)
}

fn feed_selector(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    extensions::build(configuration, Capability::Publish)
}

fn redundant_selectors(configuration: Configuration) -> Result<Box<dyn SecurityCheck>> {
    extensions::build(configuration, Capability::Dispatcher)
}
