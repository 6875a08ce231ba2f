use serde::{Deserialize, Serialize};

/// Cryptographic hash identifying one certificate instance.
///
/// The bytes are opaque to the selection logic; the same certificate
/// always yields the same fingerprint, byte for byte. Displayed as
/// lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(Vec<u8>);

impl Fingerprint {
    /// Wrap raw digest bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded fingerprint.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(Self)
    }

    /// The raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// True when the fingerprint has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact-length, exact-content comparison against raw bytes.
    ///
    /// A length mismatch is simply not-equal, never an error.
    #[must_use]
    pub fn matches(&self, other: &[u8]) -> bool {
        fingerprints_match(&self.0, other)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Vec<u8>> for Fingerprint {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Byte-for-byte fingerprint comparison.
///
/// Order- and length-sensitive: `[0x01, 0x02]` never matches
/// `[0x01, 0x02, 0x03]`.
#[must_use]
pub fn fingerprints_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_arrays_match() {
        assert!(fingerprints_match(&[0xAA, 0xBB], &[0xAA, 0xBB]));
    }

    #[test]
    fn length_mismatch_is_not_equal() {
        assert!(!fingerprints_match(&[0x01, 0x02], &[0x01, 0x02, 0x03]));
        assert!(!fingerprints_match(&[0x01, 0x02, 0x03], &[0x01, 0x02]));
    }

    #[test]
    fn order_matters() {
        assert!(!fingerprints_match(&[0x01, 0x02], &[0x02, 0x01]));
    }

    #[test]
    fn empty_arrays_match_each_other() {
        assert!(fingerprints_match(&[], &[]));
        assert!(!fingerprints_match(&[], &[0x00]));
    }

    #[test]
    fn hex_round_trip() {
        let fp = Fingerprint::from_hex("c480c669c22270ba").unwrap();
        assert_eq!(fp.to_hex(), "c480c669c22270ba");
        assert_eq!(fp.to_string(), "c480c669c22270ba");
        assert!(fp.matches(&[0xC4, 0x80, 0xC6, 0x69, 0xC2, 0x22, 0x70, 0xBA]));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(Fingerprint::from_hex("not hex").is_err());
    }
}
