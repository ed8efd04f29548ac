//! Persisting the current-context pointer

use std::fs::{self, File};
use std::io::Read;

use fnctx_fs::{LockGuard, YamlStore, lock};
use serde_yaml::{Mapping, Value};

use crate::layout::Layout;
use crate::model::CURRENT_CONTEXT;
use crate::{Error, Result};

/// Set `current-context` in the root config to `name`.
///
/// The root config must already exist; it is never created here. All other
/// keys are written back unchanged and in their original order. The
/// read-modify-write runs under an exclusive lock on `config.yaml.lock`, and
/// the new document replaces the old one atomically, so a failed write
/// leaves the previous content in place.
pub fn write_current_context(layout: &Layout, name: &str) -> Result<()> {
    let path = layout.root_config_file();
    let fail = |source| Error::CurrentContextWrite {
        path: path.clone(),
        source,
    };

    // Fail before creating the lock file if there is nothing to update
    fs::metadata(&path).map_err(|e| fail(fnctx_fs::Error::io(&path, e)))?;
    let _lock = LockGuard::acquire(&lock::lock_path_for(&path)).map_err(fail)?;

    // Opened under the lock so the read sees the last committed rename
    let mut file = File::open(&path)
        .map_err(|e| fail(fnctx_fs::Error::io(&path, e)))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| fail(fnctx_fs::Error::io(&path, e)))?;

    let store = YamlStore::new();
    // A blank root config is an empty document, the same as the resolver reads it
    let mut values = if content.trim().is_empty() {
        Mapping::new()
    } else {
        store.decode_mapping(&path, &content).map_err(fail)?
    };
    let previous = values.insert(
        Value::String(CURRENT_CONTEXT.to_string()),
        Value::String(name.to_string()),
    );
    store.save(&path, &values).map_err(fail)?;

    let previous = previous.as_ref().and_then(Value::as_str);
    tracing::info!(?path, previous, current = name, "Updated current context");
    Ok(())
}

/// Make `name` the persisted current context after checking it exists.
pub fn use_context(layout: &Layout, name: &str) -> Result<()> {
    fnctx_fs::validate_identifier(name)?;
    if !layout.context_exists(name) {
        return Err(Error::ContextNotFound {
            name: name.to_string(),
        });
    }
    write_current_context(layout, name)
}
