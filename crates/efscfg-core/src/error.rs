use thiserror::Error;

/// Result type alias for configuration-update operations
pub type Result<T> = std::result::Result<T, ConfigUpdateError>;

/// Errors that can occur while selecting and persisting a certificate
#[derive(Error, Debug)]
pub enum ConfigUpdateError {
    /// Selection criteria were malformed (e.g. empty required EKU OID)
    #[error("invalid selection criteria: {0}")]
    InvalidCriteria(String),

    /// A candidate record was structurally unusable
    #[error("invalid candidate \"{subject}\": {reason}")]
    InvalidCandidate {
        /// Subject name of the offending candidate
        subject: String,
        /// What was wrong with it
        reason: String,
    },

    /// Reading the configured fingerprint failed
    #[error("failed to read the configured fingerprint: {reason}")]
    SlotRead {
        /// Underlying failure description
        reason: String,
    },

    /// Writing the selected fingerprint failed
    #[error("failed to persist the selected fingerprint: {reason}")]
    Persistence {
        /// Underlying failure description
        reason: String,
    },
}

impl ConfigUpdateError {
    /// Process exit status for this failure.
    ///
    /// Persistence and slot faults map to 2, matching the exit code
    /// the tool has always used for configuration-write failures.
    /// Input faults also terminate with 2 since exit 1 is reserved
    /// for the "no suitable certificate" outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidCriteria(_)
            | Self::InvalidCandidate { .. }
            | Self::SlotRead { .. }
            | Self::Persistence { .. } => 2,
        }
    }

    /// Returns true if the error came from the persistence collaborator
    #[must_use]
    pub const fn is_persistence_error(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::SlotRead { .. })
    }
}
