//! Security check implementations for cqsentry
//!
//! Each check probes one aspect of a CMS deployment: exposed administrative
//! paths, default credentials, content-grabbing selectors, debug layers and
//! WebDAV access. The [`registry`] maps the stable public check names to
//! their connectivity capability and construction function.
//!
//! # Example
//!
//! ```no_run
//! use cqsentry_checks::registry;
//!
//! for descriptor in registry::REGISTRY {
//!     println!("{} needs {}", descriptor.name, descriptor.capability);
//! }
//! ```

pub mod config_validation;
pub mod default_passwords;
pub mod extensions;
pub(crate) mod http;
pub mod page_content;
pub mod registry;
pub mod source;
pub mod webdav;
pub mod wcm_debug;

pub use registry::{all_names, lookup, CheckDescriptor, REGISTRY};
pub use source::CheckConfigSource;
