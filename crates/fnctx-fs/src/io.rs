//! Filesystem I/O: atomic replacement and create-if-absent helpers

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Permission bits for directories created by the store (`rwxr-xr-x`).
pub const DIR_MODE: u32 = 0o755;

/// Write content atomically to a file.
///
/// Content goes to a temporary sibling first, is flushed to disk, and is then
/// renamed over `path`. Readers see either the old or the new content, never
/// a truncated file. The temporary file is removed if any step fails.
///
/// A symlinked `path` is followed so the link survives and its target is
/// replaced. Permission bits of an existing target carry over to the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_link(path)?;
    let temp_path = temp_sibling(&target);

    let result = write_then_rename(&temp_path, &target, content);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// The file a write to `path` should replace.
fn resolve_link(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| Error::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_then_rename(temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    drop(temp_file);

    match fs::metadata(path) {
        Ok(existing) => fs::set_permissions(temp_path, existing.permissions())
            .map_err(|e| Error::io(temp_path, e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }

    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))
}

/// Temp file path in the same directory (same filesystem, so rename is atomic).
fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Create a single directory with [`DIR_MODE`] permissions if it is absent.
///
/// The parent must already exist. Returns `true` when the directory was
/// created by this call and `false` when it was already there.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    match builder.create(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Create `path` with `content` unless it already exists.
///
/// Uses create-new semantics, so an existing file is never truncated or
/// overwritten, even one that appears between the check and the open.
/// Returns `true` when the file was written by this call.
pub fn create_if_absent(path: &Path, content: &[u8]) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::io(path, e)),
    };

    file.write_all(content).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn temp_sibling_stays_in_same_directory() {
        let temp = temp_sibling(Path::new("/a/b/config.yaml"));
        assert_eq!(temp.parent(), Some(Path::new("/a/b")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".config.yaml."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn ensure_dir_reports_creation_once() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("root");

        assert!(ensure_dir(&target).unwrap());
        assert!(!ensure_dir(&target).unwrap());
        assert!(target.is_dir());
    }

    #[test]
    fn ensure_dir_does_not_create_missing_parents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("child");

        let err = ensure_dir(&target).unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn ensure_dir_applies_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let target = dir.path().join("root");
        ensure_dir(&target).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        // umask may only remove bits
        assert_eq!(mode & !DIR_MODE, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn create_if_absent_never_overwrites() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("file.yaml");

        assert!(create_if_absent(&target, b"first").unwrap());
        assert!(!create_if_absent(&target, b"second").unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");
    }
}
