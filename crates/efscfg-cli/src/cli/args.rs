//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Updates your EFS configuration to use a centrally-managed EFS
/// certificate.
///
/// Used without options, `efscfg update` selects the first
/// non-self-signed EFS certificate it finds in your personal
/// certificate store. Pass a template name to narrow selection to
/// certificates enrolled from that template.
#[derive(Parser, Debug)]
#[command(name = "efscfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select a suitable certificate and record it as the active one
    Update(UpdateArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Update command
// ============================================================================

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Only select certificates enrolled from this template
    /// (exact friendly-name match, e.g. "Company EFS certificate v2")
    #[arg(short, long)]
    pub template: Option<String>,

    /// Only select certificates enrolled from a v2 template,
    /// skipping the legacy checks (migration fast path)
    #[arg(long)]
    pub migrate_v1: bool,

    /// Distinguished name of the issuing CA (recognized but not yet
    /// enforced)
    #[arg(long)]
    pub issuing_ca: Option<String>,

    /// Certificate store directory (or set EFSCFG_STORE_DIR)
    #[arg(long, env = "EFSCFG_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// State file recording the active certificate hash
    /// (or set EFSCFG_STATE_FILE)
    #[arg(long, env = "EFSCFG_STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (template, store_dir)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
