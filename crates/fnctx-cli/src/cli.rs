//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// fnctx - Inspect and switch client contexts
#[derive(Parser, Debug)]
#[command(name = "fnctx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Context to use for this invocation only (does not change the current context)
    #[arg(long, global = true, env = "FN_CONTEXT")]
    pub context: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved configuration and where each value comes from
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List available contexts
    ///
    /// The current context is marked with '*'.
    List,

    /// Make a context the current context
    ///
    /// Examples:
    ///   fnctx use staging
    ///   fnctx use default
    Use {
        /// Name of an existing context
        name: String,
    },
}
