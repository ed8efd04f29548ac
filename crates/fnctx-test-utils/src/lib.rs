//! Shared test utilities for the fnctx workspace.
//!
//! Provides [`TestHome`], a throwaway home directory with helpers to lay down
//! store files by hand. It is a dev-dependency only, never published.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// A temporary home directory for context store tests.
///
/// Paths passed to helpers are relative to the home directory.
///
/// # Example
///
/// ```rust,no_run
/// use fnctx_test_utils::TestHome;
///
/// let home = TestHome::new();
/// home.write_root_config("current-context: staging\n");
/// home.write_context("staging", "api-url: http://staging:8080/v1\n");
/// home.assert_file_contains(".fn/config.yaml", "staging");
/// ```
pub struct TestHome {
    temp_dir: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create an empty temporary home directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary home directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the home directory.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Write `.fn/config.yaml`, creating directories as needed.
    pub fn write_root_config(&self, content: &str) {
        self.write(".fn/config.yaml", content);
    }

    /// Write `.fn/contexts/<name>.yaml`, creating directories as needed.
    pub fn write_context(&self, name: &str, content: &str) {
        self.write(&format!(".fn/contexts/{name}.yaml"), content);
    }

    /// Write an arbitrary file relative to the home directory.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestHome::write: {}: {e}", path.display()));
    }

    /// Read a file relative to the home directory.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestHome::read: {}: {e}", path.display()))
    }

    /// Every file and directory below the home directory with its
    /// modification time, sorted by path. Used to compare filesystem state.
    pub fn snapshot(&self) -> Vec<(PathBuf, SystemTime)> {
        let mut entries = Vec::new();
        collect(self.path(), self.path(), &mut entries);
        entries.sort();
        entries
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, relative: &str) {
        let full_path = self.join(relative);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, relative: &str) {
        let full_path = self.join(relative);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "Expected {} to contain {:?}, got:\n{}",
            relative,
            content,
            file_content
        );
    }
}

fn collect(base: &Path, dir: &Path, out: &mut Vec<(PathBuf, SystemTime)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        let metadata = entry.metadata().unwrap();
        let relative = path.strip_prefix(base).unwrap().to_path_buf();
        out.push((relative, metadata.modified().unwrap()));
        if metadata.is_dir() {
            collect(base, &path, out);
        }
    }
}
