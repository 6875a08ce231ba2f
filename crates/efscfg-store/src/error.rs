use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the certificate store and the state file
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// PEM decoding failed for a whole file
    #[error("failed to decode PEM data in {path}: {reason}")]
    PemDecode {
        /// File being decoded
        path: String,
        /// Decoder message
        reason: String,
    },

    /// DER certificate parsing failed
    #[error("failed to parse certificate in {path}: {reason}")]
    CertParse {
        /// File being parsed
        path: String,
        /// Parser message
        reason: String,
    },

    /// The certificate store directory is missing
    #[error("certificate store {path} does not exist")]
    StoreMissing {
        /// Directory that was expected to exist
        path: String,
    },

    /// The state file exists but holds an unusable value
    #[error("state file {path} holds a malformed value: {reason}")]
    MalformedState {
        /// State file path
        path: String,
        /// What was wrong with the stored value
        reason: String,
    },

    /// No per-user state directory could be determined
    #[error("could not determine a state directory for this user")]
    NoStateDir,
}

impl StoreError {
    /// Build an [`StoreError::Io`] from a path and an I/O error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
