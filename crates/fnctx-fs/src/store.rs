//! YAML document loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use serde_yaml::{Mapping, Value};

use crate::{Error, Result, io};

/// YAML-backed document store.
///
/// Handles serialization/deserialization and routes writes through the
/// atomic or create-if-absent primitives in [`io`].
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlStore;

impl YamlStore {
    /// Create a new YamlStore.
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize the YAML document at `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        self.decode(path, &content)
    }

    /// Deserialize YAML text that was read from `path`.
    pub fn decode<T: DeserializeOwned>(&self, path: &Path, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Deserialize YAML text into a top-level mapping, keeping every key.
    ///
    /// Anything other than a mapping (including an empty document) is an
    /// error.
    pub fn decode_mapping(&self, path: &Path, content: &str) -> Result<Mapping> {
        match self.decode::<Value>(path, content)? {
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(Error::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Serialize `value` as YAML text destined for `path`.
    pub fn encode<T: Serialize>(&self, path: &Path, value: &T) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialize `value` and atomically replace the file at `path`.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = self.encode(path, value)?;
        io::write_atomic(path, content.as_bytes())
    }

    /// Serialize `value` to `path` only if no file exists there yet.
    ///
    /// Returns `true` when the file was created.
    pub fn create<T: Serialize>(&self, path: &Path, value: &T) -> Result<bool> {
        let content = self.encode(path, value)?;
        io::create_if_absent(path, content.as_bytes())
    }
}
