//! Well-known object identifiers used during selection.

/// Encrypting File System EKU.
pub const EFS_EKU: &str = "1.3.6.1.4.1.311.10.3.4";

/// Enrollment certificate-type extension ("v1 template").
///
/// Carries the template friendly name as a BMPString when the issuing
/// CA recorded one.
pub const ENROLL_CERTTYPE_EXTENSION: &str = "1.3.6.1.4.1.311.20.2";

/// Certificate-template information extension ("v2 template").
///
/// Presence signals enrollment from a v2 template, which is what makes
/// key archival on the CA side possible.
pub const CERTIFICATE_TEMPLATE: &str = "1.3.6.1.4.1.311.21.7";
