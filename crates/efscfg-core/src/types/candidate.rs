use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Fingerprint;

/// Immutable view of one certificate's selection-relevant fields.
///
/// Built by the store collaborator; the selection logic treats every
/// field as inert data and performs no cryptographic verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Subject distinguished name (human-readable)
    pub subject: String,

    /// Issuer distinguished name (human-readable)
    pub issuer: String,

    /// End of the validity window
    pub not_after: DateTime<Utc>,

    /// OIDs listed in the Extended Key Usage extension
    pub eku_oids: BTreeSet<String>,

    /// Friendly name from the v1 enrollment-template extension, when
    /// present and decodable
    pub template_v1_name: Option<String>,

    /// Whether the v2 certificate-template extension is present
    pub has_v2_template: bool,

    /// Whether a private key is available for this certificate
    pub has_private_key: bool,

    /// Hash uniquely identifying this certificate instance
    pub fingerprint: Fingerprint,
}

impl Candidate {
    /// Issuer equals subject, i.e. nobody vouched for this certificate.
    ///
    /// Self-signed EFS certificates can never be archived by the
    /// issuing CA, which is the whole point of migrating off them.
    #[must_use]
    pub fn is_self_signed(&self) -> bool {
        self.issuer == self.subject
    }

    /// Whether the validity window extends strictly past `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_after > now
    }

    /// Whether the EKU set contains the given OID.
    #[must_use]
    pub fn has_eku(&self, oid: &str) -> bool {
        self.eku_oids.contains(oid)
    }
}

/// Selection criteria supplied once per run, immutable during the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// EKU OID a candidate must carry to ever be eligible
    pub required_eku_oid: String,

    /// Restrict selection to certificates enrolled from a v2 template.
    ///
    /// When set, the legacy validity/template/self-signed/EKU checks
    /// are bypassed entirely (the migrate-v1 fast path).
    pub require_v2_template: bool,

    /// Exact-match filter on the v1 template friendly name
    pub template_name: Option<String>,

    /// Issuing-CA filter. Recognized but currently inert: it is never
    /// wired into the predicate chain.
    pub issuing_ca: Option<String>,
}

impl SelectionCriteria {
    /// Criteria requiring only the given EKU OID.
    #[must_use]
    pub fn new(required_eku_oid: impl Into<String>) -> Self {
        Self {
            required_eku_oid: required_eku_oid.into(),
            ..Self::default()
        }
    }

    /// Restrict to v2-template enrollments.
    #[must_use]
    pub fn with_v2_only(mut self) -> Self {
        self.require_v2_template = true;
        self
    }

    /// Require an exact template friendly-name match.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }
}
