//! Validation for names that become file stems on disk

use crate::{Error, Result};

/// Check that `value` can be used as a single file stem inside a directory.
///
/// Rejects anything that could escape the directory or produce a hidden
/// file: empty names, path separators, `.`/`..` components, leading dots and
/// NUL bytes.
pub fn validate_identifier(value: &str) -> Result<&str> {
    let reason = if value.is_empty() {
        Some("must not be empty")
    } else if value.contains('/') || value.contains('\\') {
        Some("must not contain path separators")
    } else if value.starts_with('.') {
        Some("must not start with '.'")
    } else if value.contains('\0') {
        Some("must not contain NUL bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidIdentifier {
            value: value.to_string(),
            reason,
        }),
        None => Ok(value),
    }
}
