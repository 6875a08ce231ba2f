//! Data model for certificate selection.

mod candidate;
mod fingerprint;

pub use candidate::{Candidate, SelectionCriteria};
pub use fingerprint::Fingerprint;
