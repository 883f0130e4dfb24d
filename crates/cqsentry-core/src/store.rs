//! Opaque per-check configuration stores
//!
//! The resolver treats the backing store as plain key/value and key/list
//! lookups; where the data lives and how it is parsed stays behind the
//! [`ConfigStore`] trait.

use crate::error::Result;
use serde_yaml::Value;

/// Key/value and key/list lookup over one check's persisted configuration
pub trait ConfigStore: std::fmt::Debug {
    /// Scalar value for `key`, if present
    fn value(&self, key: &str) -> Option<String>;

    /// Ordered list value for `key`; absent keys yield an empty list
    fn value_list(&self, key: &str) -> Vec<String>;
}

/// A store with no entries; every lookup falls through to defaults
#[derive(Debug)]
pub struct EmptyStore;

impl ConfigStore for EmptyStore {
    fn value(&self, _key: &str) -> Option<String> {
        None
    }

    fn value_list(&self, _key: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Store backed by a flat YAML mapping.
///
/// Scalars are stringified as written; sequences become lists of their
/// scalar items. Nested mappings are not part of the store contract and are
/// ignored by lookups.
#[derive(Debug)]
pub struct YamlStore {
    root: Value,
}

impl YamlStore {
    /// Parse a store from a YAML document. An empty document behaves like
    /// [`EmptyStore`].
    pub fn parse(document: &str) -> Result<Self> {
        let root = if document.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(document)?
        };
        Ok(Self { root })
    }

    fn entry(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ConfigStore for YamlStore {
    fn value(&self, key: &str) -> Option<String> {
        self.entry(key).and_then(scalar_to_string)
    }

    fn value_list(&self, key: &str) -> Vec<String> {
        match self.entry(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_values() {
        let store = YamlStore::parse("login_path: /libs/login.html\ntimeout_ms: 2500\nflag: true\n")
            .unwrap();
        assert_eq!(store.value("login_path"), Some("/libs/login.html".to_string()));
        assert_eq!(store.value("timeout_ms"), Some("2500".to_string()));
        assert_eq!(store.value("flag"), Some("true".to_string()));
        assert_eq!(store.value("missing"), None);
    }

    #[test]
    fn test_list_values_keep_order() {
        let store = YamlStore::parse("paths:\n  - /admin\n  - /crx/de\n  - /etc.json\n").unwrap();
        assert_eq!(store.value_list("paths"), vec!["/admin", "/crx/de", "/etc.json"]);
        assert!(store.value_list("missing").is_empty());
    }

    #[test]
    fn test_scalar_lookup_on_list_key_is_absent() {
        let store = YamlStore::parse("paths:\n  - /admin\n").unwrap();
        assert_eq!(store.value("paths"), None);
    }

    #[test]
    fn test_empty_document() {
        let store = YamlStore::parse("").unwrap();
        assert_eq!(store.value("anything"), None);
        assert!(store.value_list("anything").is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(YamlStore::parse("paths: [unclosed").is_err());
    }
}
