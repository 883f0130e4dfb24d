//! Per-check configuration store resolution
//!
//! Every check reads its own store section, addressed by check name. When a
//! configuration directory is supplied, `<dir>/<name>.yaml` overrides the
//! embedded default document compiled into the binary; a missing file falls
//! back to the embedded default. An unreadable or unparseable document is a
//! fatal configuration error, it aborts the whole scan.

use cqsentry_core::{ConfigStore, EmptyStore, Error, Result, YamlStore};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Resolves the backing store for one check invocation
pub struct CheckConfigSource {
    config_dir: Option<PathBuf>,
}

impl CheckConfigSource {
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }

    /// The store for `check`, one fresh instance per call
    pub fn store_for(&self, check: &str) -> Result<Box<dyn ConfigStore>> {
        if let Some(dir) = &self.config_dir {
            let path = dir.join(format!("{check}.yaml"));
            if path.is_file() {
                debug!("loading configuration for '{check}' from {}", path.display());
                let document = fs::read_to_string(&path)
                    .map_err(|e| Error::config_load(check, format!("{}: {e}", path.display())))?;
                let store = YamlStore::parse(&document)
                    .map_err(|e| Error::config_load(check, format!("{}: {e}", path.display())))?;
                return Ok(Box::new(store));
            }
        }

        match embedded_document(check) {
            Some(document) => {
                let store =
                    YamlStore::parse(document).map_err(|e| Error::config_load(check, e))?;
                Ok(Box::new(store))
            }
            None => Ok(Box::new(EmptyStore)),
        }
    }
}

/// The compiled-in default document for a registered check name
fn embedded_document(check: &str) -> Option<&'static str> {
    match check {
        "config-validation" => Some(include_str!("../defaults/config-validation.yaml")),
        "default-passwords" => Some(include_str!("../defaults/default-passwords.yaml")),
        "dispatcher-access" => Some(include_str!("../defaults/dispatcher-access.yaml")),
        "shindig-proxy" => Some(include_str!("../defaults/shindig-proxy.yaml")),
        "etc-tools" => Some(include_str!("../defaults/etc-tools.yaml")),
        "content-grabbing" => Some(include_str!("../defaults/content-grabbing.yaml")),
        "feed-selector" => Some(include_str!("../defaults/feed-selector.yaml")),
        "wcm-debug" => Some(include_str!("../defaults/wcm-debug.yaml")),
        "webdav" => Some(include_str!("../defaults/webdav.yaml")),
        "geometrixx" => Some(include_str!("../defaults/geometrixx.yaml")),
        "redundant-selectors" => Some(include_str!("../defaults/redundant-selectors.yaml")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use std::io::Write;

    #[test]
    fn test_every_registered_check_has_a_parseable_default() {
        let source = CheckConfigSource::new(None);
        for name in registry::all_names() {
            assert!(
                embedded_document(name).is_some(),
                "no embedded default for '{name}'"
            );
            source.store_for(name).unwrap();
        }
    }

    #[test]
    fn test_file_overrides_embedded_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("webdav.yaml")).unwrap();
        writeln!(file, "dav_paths:\n  - /custom/dav").unwrap();

        let source = CheckConfigSource::new(Some(dir.path().to_path_buf()));
        let store = source.store_for("webdav").unwrap();
        assert_eq!(store.value_list("dav_paths"), vec!["/custom/dav"]);

        // other checks still resolve their embedded defaults
        let store = source.store_for("dispatcher-access").unwrap();
        assert!(!store.value_list("paths").is_empty());
    }

    #[test]
    fn test_malformed_override_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("webdav.yaml")).unwrap();
        writeln!(file, "dav_paths: [unclosed").unwrap();

        let source = CheckConfigSource::new(Some(dir.path().to_path_buf()));
        let err = source.store_for("webdav").unwrap_err();
        assert!(matches!(err, Error::ConfigLoad { ref check, .. } if check == "webdav"));
    }

    #[test]
    fn test_unknown_name_gets_an_empty_store() {
        let source = CheckConfigSource::new(None);
        let store = source.store_for("does-not-exist").unwrap();
        assert_eq!(store.value("anything"), None);
    }
}
