//! Filesystem primitives for the fnctx context store
//!
//! Provides YAML document loading and saving, atomic replace-on-write,
//! advisory locking for read-modify-write sequences, and validation of
//! user-supplied file identifiers.

pub mod error;
pub mod identifier;
pub mod io;
pub mod lock;
pub mod store;

pub use error::{Error, Result};
pub use identifier::validate_identifier;
pub use lock::LockGuard;
pub use store::YamlStore;
