//! Tests for atomic writes and create-if-absent semantics

use fnctx_fs::io;
use std::fs;
use tempfile::tempdir;

fn temp_files(dir: &std::path::Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect()
}

#[test]
fn write_atomic_replaces_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "a much longer original content that must not linger\n").unwrap();

    io::write_atomic(&path, b"short\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
}

#[test]
fn write_atomic_cleans_up_temp_file_on_success() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    io::write_atomic(&path, b"current-context: prod\n").unwrap();

    let leftovers = temp_files(dir.path());
    assert!(
        leftovers.is_empty(),
        "No temp files should remain after successful write, found: {:?}",
        leftovers
    );
}

#[test]
fn write_atomic_into_missing_directory_fails_without_side_effects() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("config.yaml");

    let result = io::write_atomic(&path, b"x");

    assert!(result.is_err());
    assert!(!path.exists());
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn read_text_nonexistent_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = io::read_text(&dir.path().join("nope.yaml")).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn create_if_absent_keeps_existing_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("default.yaml");
    fs::write(&path, "provider: custom\n").unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let created = io::create_if_absent(&path, b"provider: default\n").unwrap();

    assert!(!created);
    assert_eq!(fs::read_to_string(&path).unwrap(), "provider: custom\n");
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn ensure_dir_in_read_only_parent_fails() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("locked");
        fs::create_dir(&parent).unwrap();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o555)).unwrap();

        let result = io::ensure_dir(&parent.join("child"));

        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();
        // root ignores permission bits, so only assert when the write was refused
        if let Err(err) = result {
            assert!(err.to_string().contains("child"));
        }
    }

    #[test]
    fn write_atomic_follows_symlink() {
        let dir = tempdir().unwrap();
        let dotfiles = dir.path().join("dotfiles");
        fs::create_dir(&dotfiles).unwrap();
        let real = dotfiles.join("config.yaml");
        fs::write(&real, "current-context: old\n").unwrap();
        let link = dir.path().join("config.yaml");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        io::write_atomic(&link, b"current-context: new\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "current-context: new\n");
        assert!(temp_files(&dotfiles).is_empty());
    }

    #[test]
    fn write_atomic_keeps_permission_bits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "current-context: old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        io::write_atomic(&path, b"current-context: new\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
