//! Creation of the store hierarchy and its default documents

use fnctx_fs::{YamlStore, io};

use crate::layout::{Layout, StorePath};
use crate::model::{ContextFile, RootConfig};
use crate::{Error, Result};

/// Store members created by a call to [`ensure_configuration`], in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: Vec<StorePath>,
}

impl BootstrapReport {
    /// True when the hierarchy already existed and nothing was written.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Ensure the store hierarchy exists, creating whatever is missing.
///
/// Steps run in order: root directory, root config, contexts directory,
/// default context. Each step checks for its own artifact, so the call is a
/// no-op once everything exists and resumes where an earlier, aborted call
/// stopped. Existing files are never overwritten. The first failure aborts
/// and names the artifact; nothing already created is rolled back.
pub fn ensure_configuration(layout: &Layout) -> Result<BootstrapReport> {
    let store = YamlStore::new();
    let mut report = BootstrapReport::default();

    for artifact in [
        StorePath::RootDir,
        StorePath::RootConfig,
        StorePath::ContextsDir,
        StorePath::DefaultContext,
    ] {
        let created = ensure_artifact(layout, &store, artifact)
            .map_err(|source| Error::Bootstrap { artifact, source })?;
        if created {
            tracing::info!(path = ?layout.path_of(artifact), "Created {}", artifact.describe());
            report.created.push(artifact);
        } else {
            tracing::debug!(
                path = ?layout.path_of(artifact),
                "{} already present",
                artifact.describe()
            );
        }
    }

    Ok(report)
}

/// Create one artifact if absent. Returns `true` when it was created.
fn ensure_artifact(
    layout: &Layout,
    store: &YamlStore,
    artifact: StorePath,
) -> fnctx_fs::Result<bool> {
    let path = layout.path_of(artifact);
    match artifact {
        StorePath::RootDir | StorePath::ContextsDir => io::ensure_dir(&path),
        StorePath::RootConfig => store.create(&path, &RootConfig::default()),
        StorePath::DefaultContext => store.create(&path, &ContextFile::default()),
    }
}
