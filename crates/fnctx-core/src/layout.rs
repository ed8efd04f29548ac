//! On-disk layout of the context store
//!
//! Every path is a pure function of the home directory:
//!
//! ```text
//! <home>/.fn/                     root directory
//! <home>/.fn/config.yaml          root config (current-context pointer)
//! <home>/.fn/contexts/            one <name>.yaml per context
//! <home>/.fn/contexts/default.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extension of context files inside the contexts directory.
pub const CONTEXT_FILE_EXTENSION: &str = "yaml";

/// Fixed members of the store hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePath {
    /// The hidden `.fn` directory inside the home directory
    RootDir,
    /// `config.yaml` inside the root directory
    RootConfig,
    /// The `contexts` directory inside the root directory
    ContextsDir,
    /// `default.yaml` inside the contexts directory
    DefaultContext,
}

impl StorePath {
    /// File or directory name of this member.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RootDir => ".fn",
            Self::RootConfig => "config.yaml",
            Self::ContextsDir => "contexts",
            Self::DefaultContext => "default.yaml",
        }
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::RootDir => ".fn directory",
            Self::RootConfig => "config.yaml file",
            Self::ContextsDir => "contexts directory",
            Self::DefaultContext => "default.yaml context file",
        }
    }
}

impl AsRef<Path> for StorePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for StorePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path to the contexts directory relative to the home directory (`.fn/contexts`).
///
/// For collaborators that list or validate context names without holding a
/// [`Layout`].
pub fn contexts_path() -> PathBuf {
    Path::new(StorePath::RootDir.as_str()).join(StorePath::ContextsDir)
}

/// Resolved store paths for one home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home: PathBuf,
}

impl Layout {
    /// Layout rooted in an explicit home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Layout rooted in the current user's home directory.
    pub fn from_home_dir() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        tracing::debug!(?home, "Resolved home directory");
        Ok(Self::new(home))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn root_dir(&self) -> PathBuf {
        self.home.join(StorePath::RootDir)
    }

    pub fn root_config_file(&self) -> PathBuf {
        self.root_dir().join(StorePath::RootConfig)
    }

    pub fn contexts_dir(&self) -> PathBuf {
        self.home.join(contexts_path())
    }

    pub fn default_context_file(&self) -> PathBuf {
        self.contexts_dir().join(StorePath::DefaultContext)
    }

    /// Absolute path of a store member.
    pub fn path_of(&self, member: StorePath) -> PathBuf {
        match member {
            StorePath::RootDir => self.root_dir(),
            StorePath::RootConfig => self.root_config_file(),
            StorePath::ContextsDir => self.contexts_dir(),
            StorePath::DefaultContext => self.default_context_file(),
        }
    }

    /// Path of the context file for `name`.
    ///
    /// The name is not validated here; callers pass it through
    /// [`fnctx_fs::validate_identifier`] before touching the file.
    pub fn context_file(&self, name: &str) -> PathBuf {
        self.contexts_dir()
            .join(format!("{name}.{CONTEXT_FILE_EXTENSION}"))
    }

    /// Whether a context file exists for `name`.
    pub fn context_exists(&self, name: &str) -> bool {
        fnctx_fs::validate_identifier(name).is_ok() && self.context_file(name).is_file()
    }

    /// Names of all contexts, sorted.
    ///
    /// A context is any `*.yaml` file directly inside the contexts directory;
    /// other entries are ignored.
    pub fn list_contexts(&self) -> Result<Vec<String>> {
        let dir = self.contexts_dir();
        let entries = fs::read_dir(&dir).map_err(|e| fnctx_fs::Error::io(&dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| fnctx_fs::Error::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(CONTEXT_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && fnctx_fs::validate_identifier(stem).is_ok()
            {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
