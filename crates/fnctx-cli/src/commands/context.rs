//! Listing and switching contexts

use colored::Colorize;
use fnctx_core::{Layout, RootConfig};
use fnctx_fs::YamlStore;

use crate::error::{CliError, Result};

/// List every context, marking the persisted current one.
///
/// An unreadable root config is reported rather than listed without a marker.
pub fn run_list(layout: &Layout) -> Result<()> {
    let current = YamlStore::new()
        .load::<RootConfig>(&layout.root_config_file())?
        .current_context;

    for name in layout.list_contexts()? {
        if name == current {
            println!("{} {}", "*".green().bold(), name.bold());
        } else {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Persist `name` as the current context.
pub fn run_use(layout: &Layout, name: &str) -> Result<()> {
    match fnctx_core::use_context(layout, name) {
        Ok(()) => {
            println!("{} Now using context: {}", "OK".green().bold(), name.cyan());
            Ok(())
        }
        Err(fnctx_core::Error::ContextNotFound { name }) => Err(CliError::user(format!(
            "Context '{}' not found. Run '{}' to see available contexts.",
            name,
            "fnctx list".cyan()
        ))),
        Err(e) => Err(e.into()),
    }
}
