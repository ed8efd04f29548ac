//! Context resolution and persistence for the fnctx configuration store
//!
//! The store lives in a hidden directory in the user's home:
//!
//! - a root config file recording the *current context*
//! - a `contexts/` directory with one YAML file per named context
//!
//! This crate implements:
//!
//! - **Layout**: path derivation from the home directory ([`Layout`])
//! - **Bootstrap**: idempotent creation of the hierarchy ([`ensure_configuration`])
//! - **Resolution**: picking and loading the active context, with fallback to
//!   `default` when it is missing ([`ContextResolver`])
//! - **Settings**: the per-invocation overlay of overrides, environment,
//!   context values and defaults ([`Settings`])
//! - **Writer**: safe update of the persisted pointer ([`write_current_context`])
//!
//! # Example
//!
//! ```no_run
//! use fnctx_core::{ContextResolver, Layout, Settings, ensure_configuration};
//!
//! fn example() -> fnctx_core::Result<()> {
//!     let layout = Layout::from_home_dir()?;
//!     ensure_configuration(&layout)?;
//!
//!     let mut settings = Settings::from_process_env();
//!     ContextResolver::new(&layout).load_configuration(&mut settings, None)?;
//!     println!("API URL: {}", settings.api_url());
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod error;
pub mod layout;
pub mod model;
pub mod resolver;
pub mod settings;
pub mod writer;

pub use bootstrap::{BootstrapReport, ensure_configuration};
pub use error::{Error, Result};
pub use layout::{Layout, StorePath, contexts_path};
pub use model::{ContextFile, RootConfig};
pub use resolver::{ContextResolver, Resolution, ResolutionState};
pub use settings::{EnvBinding, EnvSource, ProcessEnv, Settings, Source};
pub use writer::{use_context, write_current_context};
