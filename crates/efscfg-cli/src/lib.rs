//! # efscfg-cli
//!
//! Command-line front end for the EFS certificate configuration
//! updater.
//!
//! ## Behaviour
//!
//! - `efscfg update` selects the first suitable certificate from the
//!   user's personal store and records its fingerprint, but only when
//!   the current configuration is stale
//! - `efscfg update --template <NAME>` restricts selection to
//!   certificates enrolled from the named template
//! - `efscfg update --migrate-v1` restricts selection to v2-template
//!   enrollments (certificates the CA could archive)
//! - `efscfg config` manages the tool's own configuration file
//!
//! Exit status: 0 when the configuration was updated or already valid,
//! 1 when no suitable certificate exists, 2 on store or persistence
//! faults.

pub mod cli;
pub mod config;

pub use cli::run;
