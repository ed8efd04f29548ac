//! Document types stored in the context store and their recognized keys

use serde::{Deserialize, Serialize};

/// Root config key naming the active context.
pub const CURRENT_CONTEXT: &str = "current-context";
/// Context key naming the provider backing the context.
pub const PROVIDER: &str = "provider";
/// Context key holding the API endpoint.
pub const API_URL: &str = "api-url";
/// Context key holding the image registry.
pub const REGISTRY: &str = "registry";
/// Context key holding an API token.
pub const TOKEN: &str = "token";

// Keys used by the Oracle provider
pub const ORACLE_KEY_ID: &str = "key-id";
pub const ORACLE_PRIVATE_KEY: &str = "private-key";
pub const ORACLE_COMPARTMENT_ID: &str = "compartment-id";
pub const ORACLE_DISABLE_CERTS: &str = "disable-certs";

/// Keys with a defined meaning in a context file.
pub const RECOGNIZED_KEYS: &[&str] = &[
    PROVIDER,
    API_URL,
    REGISTRY,
    TOKEN,
    ORACLE_KEY_ID,
    ORACLE_PRIVATE_KEY,
    ORACLE_COMPARTMENT_ID,
    ORACLE_DISABLE_CERTS,
];

/// Name of the context that must always exist.
pub const DEFAULT_CONTEXT: &str = "default";
/// Provider used when none is configured.
pub const DEFAULT_PROVIDER: &str = "default";
/// API endpoint of a locally running server.
pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:8080/v1";

/// The root config file (`config.yaml`).
///
/// Only the pointer is modelled; other keys are preserved by the writer,
/// which edits the raw mapping instead of this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(rename = "current-context", default)]
    pub current_context: String,
}

/// Contents of a freshly created context file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(rename = "api-url", default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub registry: String,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_api_url() -> String {
    DEFAULT_LOCAL_API_URL.to_string()
}

impl Default for ContextFile {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: default_api_url(),
            registry: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_config_serializes_empty_pointer() {
        let yaml = serde_yaml::to_string(&RootConfig::default()).unwrap();
        assert_eq!(yaml, "current-context: ''\n");
    }

    #[test]
    fn context_file_fills_missing_keys_with_defaults() {
        let ctx: ContextFile = serde_yaml::from_str("registry: docker.io/me\n").unwrap();
        assert_eq!(
            ctx,
            ContextFile {
                provider: "default".into(),
                api_url: "http://localhost:8080/v1".into(),
                registry: "docker.io/me".into(),
            }
        );
    }

    #[test]
    fn context_file_tolerates_unknown_keys() {
        let ctx: ContextFile =
            serde_yaml::from_str("provider: oracle\nkey-id: abc\nsomething-else: 1\n").unwrap();
        assert_eq!(ctx.provider, "oracle");
    }
}
