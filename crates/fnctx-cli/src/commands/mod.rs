//! Command implementations for fnctx-cli

pub mod context;
pub mod show;

pub use context::{run_list, run_use};
pub use show::run_show;
