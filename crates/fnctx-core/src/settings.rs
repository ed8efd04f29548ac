//! Layered lookup of configuration values
//!
//! A [`Settings`] value answers "what is the effective value of key `k`" by
//! consulting, in order:
//!
//! 1. in-memory overrides set during this invocation (e.g. `current-context`)
//! 2. environment variables bound through an [`EnvBinding`]
//! 3. the loaded context file
//! 4. built-in defaults
//!
//! Environment lookups go through the [`EnvSource`] trait so that tests can
//! supply an isolated environment instead of mutating the process one.

use std::collections::{BTreeMap, HashMap};

use serde_yaml::{Mapping, Value};

use crate::model::{
    API_URL, CURRENT_CONTEXT, DEFAULT_LOCAL_API_URL, DEFAULT_PROVIDER, PROVIDER, REGISTRY,
};

/// Prefix for environment variables read by the client.
pub const ENV_PREFIX: &str = "FN";

/// A source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Value of the variable `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Maps configuration keys to environment variable names.
///
/// `api-url` with prefix `FN` binds to `FN_API_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    prefix: String,
}

impl Default for EnvBinding {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}

impl EnvBinding {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable name bound to `key`.
    pub fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.replace('-', "_")).to_uppercase()
    }
}

/// Layer that supplied an effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Override,
    Env,
    Context,
    Default,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Override => "override",
            Self::Env => "env",
            Self::Context => "context",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Per-invocation configuration overlay.
pub struct Settings {
    binding: EnvBinding,
    env: Box<dyn EnvSource>,
    overrides: BTreeMap<String, String>,
    context: Mapping,
    defaults: BTreeMap<String, String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("binding", &self.binding)
            .field("overrides", &self.overrides)
            .field("context", &self.context)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Settings reading the process environment with the `FN` prefix.
    pub fn from_process_env() -> Self {
        Self::new(EnvBinding::default(), Box::new(ProcessEnv))
    }

    /// Settings with the built-in defaults for `api-url`, `provider` and
    /// `registry`.
    pub fn new(binding: EnvBinding, env: Box<dyn EnvSource>) -> Self {
        let mut settings = Self {
            binding,
            env,
            overrides: BTreeMap::new(),
            context: Mapping::new(),
            defaults: BTreeMap::new(),
        };
        settings.set_default(API_URL, DEFAULT_LOCAL_API_URL);
        settings.set_default(PROVIDER, DEFAULT_PROVIDER);
        settings.set_default(REGISTRY, "");
        settings
    }

    pub fn set_default(&mut self, key: &str, value: impl Into<String>) {
        self.defaults.insert(key.to_string(), value.into());
    }

    /// Override `key` for the rest of this invocation. Not persisted.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.overrides.insert(key.to_string(), value.into());
    }

    /// Install the values of the loaded context file.
    pub fn set_context_layer(&mut self, values: Mapping) {
        self.context = values;
    }

    /// Effective value of `key` and the layer it came from.
    ///
    /// Empty environment variables count as unset.
    pub fn lookup(&self, key: &str) -> Option<(String, Source)> {
        if let Some(value) = self.overrides.get(key) {
            return Some((value.clone(), Source::Override));
        }
        if let Some(value) = self
            .env
            .var(&self.binding.var_name(key))
            .filter(|v| !v.is_empty())
        {
            return Some((value, Source::Env));
        }
        if let Some(value) = self.context.get(key).and_then(scalar_to_string) {
            return Some((value, Source::Context));
        }
        self.defaults
            .get(key)
            .map(|value| (value.clone(), Source::Default))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Effective value of `key`, or an empty string.
    pub fn get_string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// Name of the context resolved for this invocation, if any.
    pub fn current_context(&self) -> Option<String> {
        self.get(CURRENT_CONTEXT)
    }

    pub fn api_url(&self) -> String {
        self.get_string(API_URL)
    }

    pub fn provider(&self) -> String {
        self.get_string(PROVIDER)
    }

    pub fn registry(&self) -> String {
        self.get_string(REGISTRY)
    }
}

/// String form of a scalar YAML value; `None` for null and collections.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
