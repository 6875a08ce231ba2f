//! Selection driver: walks the candidate set and commits the run's
//! single side effect.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::Result;
use crate::evaluator::{evaluate, Evaluation};
use crate::types::{Candidate, Fingerprint, SelectionCriteria};

/// Access to the persisted configured-fingerprint value.
///
/// Conceptually one named slot holding one binary value, scoped to the
/// current user. The store crate implements this against a state file;
/// tests use an in-memory double.
pub trait FingerprintSlot {
    /// Read the currently configured fingerprint, or `None` if the
    /// slot has never been written.
    fn read(&self) -> Result<Option<Fingerprint>>;

    /// Persist `fingerprint` as the configured value.
    fn write(&mut self, fingerprint: &Fingerprint) -> Result<()>;
}

/// Terminal outcome of one selection run.
///
/// Exactly one of these holds at run end; there are no run-state flags
/// beyond this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The configured certificate already satisfies the criteria;
    /// nothing was written
    AlreadyValid,
    /// A candidate was selected and its fingerprint persisted
    Updated(Fingerprint),
    /// No candidate satisfied the criteria; nothing was written
    NotFound,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::AlreadyValid | Self::Updated(_) => 0,
            Self::NotFound => 1,
        }
    }
}

/// Drive the candidate sequence through the evaluator and persist the
/// first eligible fingerprint, at most once.
///
/// Candidates are examined in the order supplied (store-enumeration
/// order, which is neither stable nor sorted). Iteration stops at the
/// first `Accept` or `AlreadyConfigured` evaluation: first eligible
/// match wins, candidates after it are never examined. The configured
/// slot is re-read for every candidate check.
///
/// # Errors
///
/// Propagates evaluator input faults and slot read/write faults. An
/// evaluation error aborts the whole run; a write failure is surfaced
/// without retry, after the selection itself was already made.
pub fn run_selection(
    candidates: &[Candidate],
    criteria: &SelectionCriteria,
    slot: &mut dyn FingerprintSlot,
    now: DateTime<Utc>,
) -> Result<Outcome> {
    let mut selected: Option<&Candidate> = None;

    for candidate in candidates {
        debug!(
            subject = %candidate.subject,
            fingerprint = %candidate.fingerprint,
            "examining certificate"
        );

        let configured = slot.read()?;
        match evaluate(candidate, criteria, configured.as_ref(), now)? {
            Evaluation::Rejected(reason) => {
                debug!(
                    subject = %candidate.subject,
                    reason = %reason,
                    "certificate rejected"
                );
            }
            Evaluation::AlreadyConfigured => {
                info!(
                    subject = %candidate.subject,
                    "selected certificate is already the active one"
                );
                return Ok(Outcome::AlreadyValid);
            }
            Evaluation::Accept => {
                info!(
                    subject = %candidate.subject,
                    fingerprint = %candidate.fingerprint,
                    "certificate accepted"
                );
                selected = Some(candidate);
                break;
            }
        }
    }

    match selected {
        Some(candidate) => {
            slot.write(&candidate.fingerprint)?;
            info!(fingerprint = %candidate.fingerprint, "configuration updated");
            Ok(Outcome::Updated(candidate.fingerprint.clone()))
        }
        None => Ok(Outcome::NotFound),
    }
}
