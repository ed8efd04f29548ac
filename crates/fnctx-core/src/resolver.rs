//! Context selection with self-healing fallback
//!
//! Resolution picks a target context (an explicit name wins over the
//! persisted `current-context`), loads its file, and installs its values in
//! [`Settings`]. A target that cannot be loaded is not an error for the
//! caller: the persisted pointer is reset to `default` and the invocation
//! continues on built-in defaults. The next invocation then resolves
//! `default`.
//!
//! The policy is modelled by [`ResolutionState`]:
//!
//! ```text
//! load ok ───────────────► Resolved
//! load failed ───────────► FallbackTriggered ── reset ok ──► (returned as Ok)
//!                                            └─ reset err ─► Fatal
//! ```

use fnctx_fs::{YamlStore, io};
use serde_yaml::Mapping;

use crate::layout::Layout;
use crate::model::{CURRENT_CONTEXT, DEFAULT_CONTEXT, RootConfig};
use crate::settings::Settings;
use crate::writer;
use crate::{Error, Result};

/// Non-fatal outcome of [`ContextResolver::load_configuration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target context was loaded and is active for this invocation.
    Resolved { context: String },
    /// The target could not be loaded; the persisted pointer now names `default`.
    FallbackTriggered { requested: String, reason: String },
}

impl Resolution {
    /// Active context name, if one was loaded.
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Resolved { context } => Some(context.as_str()),
            Self::FallbackTriggered { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackTriggered { .. })
    }
}

/// States of the resolution policy.
#[derive(Debug)]
pub enum ResolutionState {
    Resolved { context: String, values: Mapping },
    FallbackTriggered { requested: String, reason: String },
    Fatal(Error),
}

impl ResolutionState {
    /// State after attempting to load `target`.
    pub fn from_load(target: &str, loaded: Result<Mapping>) -> Self {
        match loaded {
            Ok(values) => Self::Resolved {
                context: target.to_string(),
                values,
            },
            Err(e) => Self::FallbackTriggered {
                requested: target.to_string(),
                reason: e.to_string(),
            },
        }
    }

    /// State after attempting to reset the pointer to `default`.
    ///
    /// Only meaningful for `FallbackTriggered`; other states pass through.
    pub fn after_reset(self, reset: Result<()>) -> Self {
        match (self, reset) {
            (Self::FallbackTriggered { .. }, Err(e)) => Self::Fatal(e),
            (state, _) => state,
        }
    }

    /// Apply a resolved context to `settings` and produce the caller-facing result.
    pub fn finish(self, settings: &mut Settings) -> Result<Resolution> {
        match self {
            Self::Resolved { context, values } => {
                settings.set_context_layer(values);
                settings.set(CURRENT_CONTEXT, context.clone());
                Ok(Resolution::Resolved { context })
            }
            Self::FallbackTriggered { requested, reason } => {
                Ok(Resolution::FallbackTriggered { requested, reason })
            }
            Self::Fatal(e) => Err(e),
        }
    }
}

/// Resolves the active context for one invocation.
#[derive(Debug, Clone)]
pub struct ContextResolver<'a> {
    layout: &'a Layout,
    store: YamlStore,
}

impl<'a> ContextResolver<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            store: YamlStore::new(),
        }
    }

    /// Resolve the active context and install its values in `settings`.
    ///
    /// `explicit` names a context chosen for this invocation only; when it is
    /// `None` or empty the root config is read instead, and an unreadable root
    /// config is an error. A context that cannot be loaded triggers the
    /// fallback; only a failure to reset the pointer is returned as an error.
    pub fn load_configuration(
        &self,
        settings: &mut Settings,
        explicit: Option<&str>,
    ) -> Result<Resolution> {
        let target = match explicit.filter(|name| !name.is_empty()) {
            Some(name) => {
                tracing::debug!(context = name, "Using explicit context");
                name.to_string()
            }
            None => self.persisted_context()?,
        };

        let mut state = ResolutionState::from_load(&target, self.load_context(&target));

        if let ResolutionState::FallbackTriggered { requested, reason } = &state {
            tracing::warn!(
                context = %requested,
                %reason,
                "Context could not be loaded, resetting current context to {DEFAULT_CONTEXT}"
            );
            let reset = writer::write_current_context(self.layout, DEFAULT_CONTEXT);
            state = state.after_reset(reset);
        }

        let resolution = state.finish(settings)?;
        if let Resolution::Resolved { context } = &resolution {
            tracing::debug!(context = %context, "Resolved context");
        }
        Ok(resolution)
    }

    /// `current-context` from the root config.
    fn persisted_context(&self) -> Result<String> {
        let path = self.layout.root_config_file();
        let root: RootConfig = self
            .store
            .load(&path)
            .map_err(|source| Error::RootConfigUnreadable {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(?path, context = %root.current_context, "Read persisted context");
        Ok(root.current_context)
    }

    /// Values of the context file for `name`.
    ///
    /// An empty file is an empty context; anything else must be a mapping.
    fn load_context(&self, name: &str) -> Result<Mapping> {
        let wrap = |source| Error::ContextUnreadable {
            name: name.to_string(),
            source,
        };

        fnctx_fs::validate_identifier(name).map_err(wrap)?;
        let path = self.layout.context_file(name);
        let content = io::read_text(&path).map_err(wrap)?;
        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }
        self.store.decode_mapping(&path, &content).map_err(wrap)
    }
}
