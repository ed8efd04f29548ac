//! Tests for store bootstrapping

use fnctx_core::{ContextFile, Layout, RootConfig, StorePath, ensure_configuration};
use fnctx_fs::YamlStore;
use fnctx_test_utils::TestHome;
use pretty_assertions::assert_eq;

#[test]
fn fresh_home_gets_default_documents() {
    let home = TestHome::new();
    let layout = Layout::new(home.path());

    ensure_configuration(&layout).unwrap();

    home.assert_exists(".fn");
    home.assert_exists(".fn/contexts");

    let store = YamlStore::new();
    let root: RootConfig = store.load(&layout.root_config_file()).unwrap();
    assert_eq!(root.current_context, "");

    let default: ContextFile = store.load(&layout.default_context_file()).unwrap();
    assert_eq!(default.provider, "default");
    assert!(!default.api_url.is_empty());
    assert_eq!(default.registry, "");
}

#[test]
fn second_bootstrap_performs_no_writes() {
    let home = TestHome::new();
    let layout = Layout::new(home.path());

    let first = ensure_configuration(&layout).unwrap();
    assert_eq!(first.created.len(), 4);
    let before = home.snapshot();

    let second = ensure_configuration(&layout).unwrap();

    assert!(second.is_noop());
    assert_eq!(home.snapshot(), before);
}

#[test]
fn existing_files_are_never_overwritten() {
    let home = TestHome::new();
    home.write_root_config("current-context: prod\nfoo: bar\n");
    home.write_context("default", "provider: oracle\n");
    let layout = Layout::new(home.path());

    let report = ensure_configuration(&layout).unwrap();

    assert!(report.is_noop());
    assert_eq!(home.read(".fn/config.yaml"), "current-context: prod\nfoo: bar\n");
    assert_eq!(home.read(".fn/contexts/default.yaml"), "provider: oracle\n");
}

#[test]
fn partial_hierarchy_is_completed() {
    let home = TestHome::new();
    home.write_root_config("current-context: staging\n");
    let layout = Layout::new(home.path());

    let report = ensure_configuration(&layout).unwrap();

    assert_eq!(
        report.created,
        vec![StorePath::ContextsDir, StorePath::DefaultContext]
    );
    assert_eq!(home.read(".fn/config.yaml"), "current-context: staging\n");
}

#[test]
fn failure_names_artifact_and_keeps_earlier_steps() {
    let home = TestHome::new();
    // A regular file where the contexts directory should be
    home.write(".fn/contexts", "not a directory");
    let layout = Layout::new(home.path());

    let err = ensure_configuration(&layout).unwrap_err();

    assert!(
        matches!(
            err,
            fnctx_core::Error::Bootstrap {
                artifact: StorePath::ContextsDir,
                ..
            }
        ),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains("contexts directory"));
    // Root config was created before the failing step and is kept
    home.assert_exists(".fn/config.yaml");
}

#[cfg(unix)]
#[test]
fn directories_allow_owner_full_access() {
    use std::os::unix::fs::PermissionsExt;

    let home = TestHome::new();
    let layout = Layout::new(home.path());
    ensure_configuration(&layout).unwrap();

    for dir in [layout.root_dir(), layout.contexts_dir()] {
        let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o700, 0o700, "{} mode {:o}", dir.display(), mode);
        assert_eq!(mode & 0o022, 0, "{} mode {:o}", dir.display(), mode);
    }
}
