//! Command implementations.

pub mod config;
pub mod update;

use crate::config::Config;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration file
    pub config: Config,

    /// Verbose output
    pub verbose: bool,
}
