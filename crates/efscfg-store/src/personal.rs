//! Personal certificate store enumeration and parsing.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use efscfg_core::types::Candidate;
use efscfg_core::oids;
use x509_parser::extensions::ParsedExtension;

use crate::error::{Result, StoreError};
use crate::hash::sha256_fingerprint;

/// EKU purpose OIDs that `x509-parser` exposes as named flags.
const EKU_ANY: &str = "2.5.29.37.0";
const EKU_SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";
const EKU_CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";
const EKU_CODE_SIGNING: &str = "1.3.6.1.5.5.7.3.3";
const EKU_EMAIL_PROTECTION: &str = "1.3.6.1.5.5.7.3.4";
const EKU_TIME_STAMPING: &str = "1.3.6.1.5.5.7.3.8";

/// The user's personal certificate store, modeled as a directory of
/// PEM files.
///
/// The store is opened read-only and must already exist; candidate
/// records are built once per enumeration. A certificate's private key
/// is considered present when a sibling `<stem>.key` file exists.
#[derive(Debug, Clone)]
pub struct PersonalStore {
    dir: PathBuf,
}

impl PersonalStore {
    /// Open an existing store directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StoreMissing` when the directory does not
    /// exist; the store is never created here.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(StoreError::StoreMissing {
                path: dir.display().to_string(),
            });
        }
        Ok(Self { dir })
    }

    /// Store directory path.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerate candidate certificates.
    ///
    /// Files are visited in name order; `*.pem`, `*.crt` and `*.cer`
    /// files are parsed as PEM bundles. Certificates without an
    /// Extended Key Usage extension are filtered out here, before
    /// selection ever sees them. Unparseable files and certificates
    /// are logged and skipped; only a store-level I/O failure is an
    /// error.
    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        let dir_str = self.dir.display().to_string();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .map_err(|e| StoreError::io(&dir_str, e))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                matches!(ext, "pem" | "crt" | "cer")
            })
            .collect();
        paths.sort();

        let mut candidates = Vec::new();
        for path in paths {
            match parse_candidate_file(&path) {
                Ok(found) => candidates.extend(found),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping certificate file"),
            }
        }

        debug!(store = %dir_str, count = candidates.len(), "enumerated candidate certificates");
        Ok(candidates)
    }
}

/// Parse one PEM bundle into candidate records.
fn parse_candidate_file(path: &Path) -> Result<Vec<Candidate>> {
    let path_str = path.display().to_string();
    let content = std::fs::read(path).map_err(|e| StoreError::io(&path_str, e))?;

    let pems = pem::parse_many(&content).map_err(|e| StoreError::PemDecode {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    let has_private_key = path.with_extension("key").is_file();

    let mut candidates = Vec::new();
    for p in &pems {
        if p.tag() != "CERTIFICATE" {
            continue;
        }
        match candidate_from_der(p.contents(), &path_str, has_private_key) {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => {
                debug!(path = %path_str, "certificate has no EKU extension, not a candidate");
            }
            Err(e) => debug!(path = %path_str, error = %e, "skipping certificate in bundle"),
        }
    }

    Ok(candidates)
}

/// Build a candidate from a DER-encoded certificate.
///
/// Returns `Ok(None)` for certificates carrying no EKU extension at
/// all: the store only surfaces certificates that declare some key
/// usage purpose.
fn candidate_from_der(
    der: &[u8],
    source_path: &str,
    has_private_key: bool,
) -> Result<Option<Candidate>> {
    let (_, cert) =
        x509_parser::parse_x509_certificate(der).map_err(|e| StoreError::CertParse {
            path: source_path.to_string(),
            reason: e.to_string(),
        })?;

    let mut eku_oids = BTreeSet::new();
    let mut has_eku_extension = false;
    let mut template_v1_name = None;
    let mut has_v2_template = false;

    for ext in cert.extensions() {
        if let ParsedExtension::ExtendedKeyUsage(eku) = ext.parsed_extension() {
            has_eku_extension = true;
            if eku.any {
                eku_oids.insert(EKU_ANY.to_string());
            }
            if eku.server_auth {
                eku_oids.insert(EKU_SERVER_AUTH.to_string());
            }
            if eku.client_auth {
                eku_oids.insert(EKU_CLIENT_AUTH.to_string());
            }
            if eku.code_signing {
                eku_oids.insert(EKU_CODE_SIGNING.to_string());
            }
            if eku.email_protection {
                eku_oids.insert(EKU_EMAIL_PROTECTION.to_string());
            }
            if eku.time_stamping {
                eku_oids.insert(EKU_TIME_STAMPING.to_string());
            }
            for oid in &eku.other {
                eku_oids.insert(oid.to_id_string());
            }
            continue;
        }

        let oid = ext.oid.to_id_string();
        if oid == oids::ENROLL_CERTTYPE_EXTENSION {
            // The friendly name is only present when the issuing CA
            // recorded it; an undecodable value is treated as absent.
            template_v1_name = decode_bmp_string(ext.value);
        } else if oid == oids::CERTIFICATE_TEMPLATE {
            has_v2_template = true;
        }
    }

    if !has_eku_extension {
        return Ok(None);
    }

    Ok(Some(Candidate {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        not_after: asn1_to_utc(cert.validity().not_after),
        eku_oids,
        template_v1_name,
        has_v2_template,
        has_private_key,
        fingerprint: sha256_fingerprint(der),
    }))
}

/// Convert an ASN.1 `GeneralizedTime` / `UTCTime` to `DateTime<Utc>`.
fn asn1_to_utc(t: x509_parser::time::ASN1Time) -> DateTime<Utc> {
    let epoch = t.timestamp();
    Utc.timestamp_opt(epoch, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Decode a DER BMPString (tag `0x1E`, UTF-16BE content).
///
/// Enrollment-template friendly names are stored this way. Returns
/// `None` for anything that is not a well-formed BMPString.
fn decode_bmp_string(der: &[u8]) -> Option<String> {
    let (&tag, rest) = der.split_first()?;
    if tag != 0x1E {
        return None;
    }
    let (&first_len, rest) = rest.split_first()?;
    let (len, content) = match first_len {
        l if l < 0x80 => (usize::from(l), rest),
        0x81 => {
            let (&l, tail) = rest.split_first()?;
            (usize::from(l), tail)
        }
        0x82 => {
            let bytes = rest.get(..2)?;
            (usize::from(u16::from_be_bytes([bytes[0], bytes[1]])), rest.get(2..)?)
        }
        _ => return None,
    };
    let content = content.get(..len)?;
    if content.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = content
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    char::decode_utf16(units).collect::<std::result::Result<String, _>>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcgen::{
        CertificateParams, CustomExtension, DistinguishedName, DnType, ExtendedKeyUsagePurpose,
        KeyPair,
    };
    use std::fs;
    use tempfile::TempDir;

    const EFS_EKU_ARC: &[u64] = &[1, 3, 6, 1, 4, 1, 311, 10, 3, 4];
    const V1_TEMPLATE_ARC: &[u64] = &[1, 3, 6, 1, 4, 1, 311, 20, 2];
    const V2_TEMPLATE_ARC: &[u64] = &[1, 3, 6, 1, 4, 1, 311, 21, 7];

    fn bmp_string(s: &str) -> Vec<u8> {
        let content: Vec<u8> = s.encode_utf16().flat_map(u16::to_be_bytes).collect();
        let mut out = vec![0x1E, u8::try_from(content.len()).unwrap()];
        out.extend(content);
        out
    }

    fn base_params(cn: &str) -> CertificateParams {
        let mut params = CertificateParams::default();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, cn);
        params.distinguished_name = dn;
        params.not_before = time::OffsetDateTime::now_utc() - time::Duration::days(1);
        params.not_after = time::OffsetDateTime::now_utc() + time::Duration::days(365);
        params
    }

    fn efs_params(cn: &str) -> CertificateParams {
        let mut params = base_params(cn);
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::Other(EFS_EKU_ARC.to_vec())];
        params
    }

    fn write_self_signed(dir: &Path, name: &str, params: CertificateParams, with_key: bool) {
        let key = KeyPair::generate().unwrap();
        let cert = params.self_signed(&key).unwrap();
        fs::write(dir.join(format!("{name}.pem")), cert.pem()).unwrap();
        if with_key {
            fs::write(dir.join(format!("{name}.key")), key.serialize_pem()).unwrap();
        }
    }

    #[test]
    fn open_missing_store_fails() {
        let err = PersonalStore::open("/nonexistent/certificate/store").unwrap_err();
        assert!(matches!(err, StoreError::StoreMissing { .. }));
    }

    #[test]
    fn empty_store_yields_no_candidates() {
        let tmp = TempDir::new().unwrap();
        let store = PersonalStore::open(tmp.path()).unwrap();
        assert!(store.candidates().unwrap().is_empty());
    }

    #[test]
    fn self_signed_efs_cert_is_enumerated() {
        let tmp = TempDir::new().unwrap();
        write_self_signed(tmp.path(), "selfsigned", efs_params("alice"), true);

        let store = PersonalStore::open(tmp.path()).unwrap();
        let candidates = store.candidates().unwrap();
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert!(c.is_self_signed());
        assert!(c.has_eku("1.3.6.1.4.1.311.10.3.4"));
        assert!(c.has_private_key);
        assert!(!c.has_v2_template);
        assert_eq!(c.fingerprint.as_bytes().len(), 32);
    }

    #[test]
    fn cert_without_eku_extension_is_filtered_out() {
        let tmp = TempDir::new().unwrap();
        write_self_signed(tmp.path(), "noeku", base_params("bob"), true);

        let store = PersonalStore::open(tmp.path()).unwrap();
        assert!(store.candidates().unwrap().is_empty());
    }

    #[test]
    fn missing_key_file_means_no_private_key() {
        let tmp = TempDir::new().unwrap();
        write_self_signed(tmp.path(), "nokey", efs_params("carol"), false);

        let store = PersonalStore::open(tmp.path()).unwrap();
        let candidates = store.candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(!candidates[0].has_private_key);
    }

    #[test]
    fn template_extensions_are_decoded() {
        let tmp = TempDir::new().unwrap();
        let mut params = efs_params("dave");
        params.custom_extensions = vec![
            CustomExtension::from_oid_content(V1_TEMPLATE_ARC, bmp_string("Corp EFS")),
            CustomExtension::from_oid_content(V2_TEMPLATE_ARC, vec![0x30, 0x00]),
        ];
        write_self_signed(tmp.path(), "templated", params, true);

        let store = PersonalStore::open(tmp.path()).unwrap();
        let candidates = store.candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].template_v1_name.as_deref(), Some("Corp EFS"));
        assert!(candidates[0].has_v2_template);
    }

    #[test]
    fn ca_issued_cert_is_not_self_signed() {
        let tmp = TempDir::new().unwrap();

        let ca_key = KeyPair::generate().unwrap();
        let mut ca_params = base_params("Corp Issuing CA");
        ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
        let ca_cert = ca_params.self_signed(&ca_key).unwrap();

        let ee_key = KeyPair::generate().unwrap();
        let ee_cert = efs_params("erin").signed_by(&ee_key, &ca_cert, &ca_key).unwrap();
        fs::write(tmp.path().join("issued.pem"), ee_cert.pem()).unwrap();
        fs::write(tmp.path().join("issued.key"), ee_key.serialize_pem()).unwrap();

        let store = PersonalStore::open(tmp.path()).unwrap();
        let candidates = store.candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(!candidates[0].is_self_signed());
        assert!(candidates[0].has_eku("1.3.6.1.4.1.311.10.3.4"));
    }

    #[test]
    fn garbage_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("junk.pem"), "not a certificate").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored entirely").unwrap();
        write_self_signed(tmp.path(), "real", efs_params("frank"), true);

        let store = PersonalStore::open(tmp.path()).unwrap();
        assert_eq!(store.candidates().unwrap().len(), 1);
    }

    #[test]
    fn bmp_string_decoding() {
        assert_eq!(decode_bmp_string(&bmp_string("EFS")).as_deref(), Some("EFS"));
        assert_eq!(decode_bmp_string(&bmp_string("")).as_deref(), Some(""));
        // Wrong tag
        assert_eq!(decode_bmp_string(&[0x0C, 0x01, 0x41]), None);
        // Odd content length
        assert_eq!(decode_bmp_string(&[0x1E, 0x01, 0x00]), None);
        // Truncated
        assert_eq!(decode_bmp_string(&[0x1E, 0x04, 0x00, 0x41]), None);
        assert_eq!(decode_bmp_string(&[]), None);
    }
}
