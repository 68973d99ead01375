//! Node attribute store.
//!
//! The attribute tree is a read-only snapshot loaded once per run. Lookups
//! walk a key path and return `None` as soon as any segment is missing, so
//! callers never have to check intermediate maps themselves.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("failed to read attributes from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON attributes in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML attributes in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Read-only hierarchical key-value lookup.
pub trait AttributeStore {
    /// Look up the value at `path`. Missing intermediate keys yield `None`.
    fn get(&self, path: &[&str]) -> Option<&Value>;

    /// String value at `path`, if present and a string.
    fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Boolean value at `path`, if present and a boolean.
    fn get_bool(&self, path: &[&str]) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Non-empty string value at `path`.
    fn get_non_empty(&self, path: &[&str]) -> Option<&str> {
        self.get_str(path).filter(|s| !s.is_empty())
    }

    /// Whether `path` holds anything other than null or `false`.
    fn is_truthy(&self, path: &[&str]) -> bool {
        !matches!(self.get(path), None | Some(Value::Null) | Some(Value::Bool(false)))
    }
}

/// Attribute tree backed by a JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttributes {
    root: Value,
}

impl NodeAttributes {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Load attributes from a `.json` file, or from TOML for any other extension.
    pub fn from_file(path: &Path) -> Result<Self, AttributeError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| AttributeError::Read {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content).map_err(|source| AttributeError::Json {
                path: display,
                source,
            })
        } else {
            Self::from_toml_str(&content).map_err(|source| AttributeError::Toml {
                path: display,
                source,
            })
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        Ok(Self::new(toml::from_str(content)?))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl AttributeStore for NodeAttributes {
    fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.root, |node, key| node.as_object()?.get(*key))
    }
}
