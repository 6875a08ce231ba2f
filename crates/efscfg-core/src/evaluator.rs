//! Eligibility evaluation for a single candidate certificate.
//!
//! The predicate chain is fixed and ordered: the first failing check
//! decides the rejection reason, and the "already configured" check
//! runs only after every eligibility predicate has passed. An
//! ineligible certificate must never short-circuit to
//! [`Evaluation::AlreadyConfigured`], even when its fingerprint happens
//! to match the configured one.

use chrono::{DateTime, Utc};

use crate::error::{ConfigUpdateError, Result};
use crate::types::{Candidate, Fingerprint, SelectionCriteria};

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not enrolled from a v2 certificate template
    NotV2Template,
    /// Validity window has ended
    Expired,
    /// Template friendly name does not match the requested one
    WrongTemplate,
    /// Issuer equals subject
    SelfSigned,
    /// Required EKU OID is absent
    MissingEku,
    /// No private key available
    NoPrivateKey,
}

impl RejectReason {
    /// Stable identifier used in trace output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotV2Template => "not-v2-template",
            Self::Expired => "expired",
            Self::WrongTemplate => "wrong-template",
            Self::SelfSigned => "self-signed",
            Self::MissingEku => "missing-eku",
            Self::NoPrivateKey => "no-private-key",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Candidate fails an eligibility predicate
    Rejected(RejectReason),
    /// Candidate passes every predicate and differs from the
    /// configured fingerprint
    Accept,
    /// Candidate passes every predicate and is already the configured
    /// certificate
    AlreadyConfigured,
}

/// Classify `candidate` against `criteria` and the currently configured
/// fingerprint.
///
/// Pure: no side effects, no I/O. `now` is the evaluation time for the
/// validity check.
///
/// # Errors
///
/// Returns `ConfigUpdateError::InvalidCriteria` when the required EKU
/// OID is empty, and `ConfigUpdateError::InvalidCandidate` when the
/// candidate carries an empty fingerprint.
pub fn evaluate(
    candidate: &Candidate,
    criteria: &SelectionCriteria,
    configured: Option<&Fingerprint>,
    now: DateTime<Utc>,
) -> Result<Evaluation> {
    if criteria.required_eku_oid.is_empty() {
        return Err(ConfigUpdateError::InvalidCriteria(
            "required EKU OID must not be empty".into(),
        ));
    }
    if candidate.fingerprint.is_empty() {
        return Err(ConfigUpdateError::InvalidCandidate {
            subject: candidate.subject.clone(),
            reason: "empty fingerprint".into(),
        });
    }

    if criteria.require_v2_template {
        // Migrate-v1 fast path: the v2-template extension implies the
        // CA had the chance to archive the keypair at enrollment, and
        // the legacy checks below are skipped for this candidate.
        if !candidate.has_v2_template {
            return Ok(Evaluation::Rejected(RejectReason::NotV2Template));
        }
    } else {
        if !candidate.is_valid_at(now) {
            return Ok(Evaluation::Rejected(RejectReason::Expired));
        }

        if let Some(template) = criteria.template_name.as_deref() {
            if candidate.template_v1_name.as_deref() != Some(template) {
                return Ok(Evaluation::Rejected(RejectReason::WrongTemplate));
            }
        }

        if candidate.is_self_signed() {
            return Ok(Evaluation::Rejected(RejectReason::SelfSigned));
        }

        if !candidate.has_eku(&criteria.required_eku_oid) {
            return Ok(Evaluation::Rejected(RejectReason::MissingEku));
        }

        if !candidate.has_private_key {
            return Ok(Evaluation::Rejected(RejectReason::NoPrivateKey));
        }
    }

    // Only a fully eligible candidate may be recognized as the one
    // already in use.
    if let Some(current) = configured {
        if current.matches(candidate.fingerprint.as_bytes()) {
            return Ok(Evaluation::AlreadyConfigured);
        }
    }

    Ok(Evaluation::Accept)
}
