//! Certificate fingerprinting via `ring::digest`.

use efscfg_core::Fingerprint;
use ring::digest::{digest, SHA256};

/// SHA-256 fingerprint of a certificate's DER encoding.
#[must_use]
pub fn sha256_fingerprint(der: &[u8]) -> Fingerprint {
    Fingerprint::new(digest(&SHA256, der).as_ref().to_vec())
}
