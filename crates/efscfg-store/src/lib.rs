//! Filesystem collaborators for the EFS configuration updater.
//!
//! Two thin I/O wrappers around `efscfg-core`'s pure selection logic:
//!
//! - [`PersonalStore`]: the user's personal certificate store, a
//!   directory of PEM files parsed into [`efscfg_core::Candidate`]
//!   records
//! - [`SlotFile`]: the persisted configured-fingerprint value, a single
//!   named entry in a per-user TOML state file

mod error;
mod hash;
mod personal;
mod slot;

pub use error::{Result, StoreError};
pub use hash::sha256_fingerprint;
pub use personal::PersonalStore;
pub use slot::SlotFile;
