//! Core selection logic for the EFS configuration updater.
//!
//! This crate decides which of a user's certificates should become the
//! active file-encryption credential. It is pure decision logic over
//! in-memory certificate records:
//!
//! - **Types**: [`Candidate`], [`SelectionCriteria`], [`Fingerprint`]
//! - **Evaluator**: classifies one candidate against the criteria
//! - **Driver**: walks the candidate set and commits at most one write
//!
//! Enumerating the certificate store and persisting the chosen
//! fingerprint live behind the [`FingerprintSlot`] trait and the
//! `efscfg-store` crate; nothing in here touches the filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use efscfg_core::{run_selection, Outcome, SelectionCriteria};
//!
//! let criteria = SelectionCriteria::new(efscfg_core::oids::EFS_EKU);
//! let outcome = run_selection(&candidates, &criteria, &mut slot, chrono::Utc::now())?;
//! match outcome {
//!     Outcome::Updated(fp) => println!("configured {fp}"),
//!     Outcome::AlreadyValid => println!("nothing to do"),
//!     Outcome::NotFound => println!("no suitable certificate"),
//! }
//! ```

mod driver;
mod error;
mod evaluator;
pub mod oids;
pub mod types;

pub use driver::{run_selection, FingerprintSlot, Outcome};
pub use error::{ConfigUpdateError, Result};
pub use evaluator::{evaluate, Evaluation, RejectReason};
pub use types::{Candidate, Fingerprint, SelectionCriteria};
