//! Persisted configured-fingerprint slot.
//!
//! The original registry value `EFS\CurrentKeys\CertificateHash`
//! becomes one named entry in a per-user TOML state file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use efscfg_core::{ConfigUpdateError, Fingerprint, FingerprintSlot};

use crate::error::{Result, StoreError};

/// On-disk shape of the state file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SlotState {
    /// Hex-encoded fingerprint of the active certificate
    certificate_hash: Option<String>,
}

/// File-backed configured-fingerprint slot.
#[derive(Debug, Clone)]
pub struct SlotFile {
    path: PathBuf,
}

impl SlotFile {
    /// Slot backed by an explicit state file path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot at the default per-user location.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoStateDir` when no home directory can be
    /// determined for the current user.
    pub fn default_for_user() -> Result<Self> {
        let dirs = ProjectDirs::from("io", "efscfg", "efscfg").ok_or(StoreError::NoStateDir)?;
        Ok(Self::at(dirs.config_dir().join("state.toml")))
    }

    /// State file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configured fingerprint.
    ///
    /// An absent file or absent value is `Ok(None)`; a value that is
    /// present but not valid hex is a fault, not a silent `None`.
    pub fn read_fingerprint(&self) -> Result<Option<Fingerprint>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let path_str = self.path.display().to_string();
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&path_str, e))?;
        let state: SlotState = toml::from_str(&content).map_err(|e| StoreError::MalformedState {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        match state.certificate_hash {
            None => Ok(None),
            Some(hash) => {
                let fp = Fingerprint::from_hex(&hash).map_err(|e| StoreError::MalformedState {
                    path: path_str,
                    reason: format!("certificate_hash is not valid hex: {e}"),
                })?;
                Ok(Some(fp))
            }
        }
    }

    /// Persist `fingerprint` as the configured value.
    pub fn write_fingerprint(&self, fingerprint: &Fingerprint) -> Result<()> {
        let path_str = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::io(parent.display().to_string(), e))?;
        }

        let state = SlotState {
            certificate_hash: Some(fingerprint.to_hex()),
        };
        let content = toml::to_string_pretty(&state).map_err(|e| StoreError::MalformedState {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::io(&path_str, e))?;

        debug!(path = %path_str, fingerprint = %fingerprint, "configured fingerprint written");
        Ok(())
    }
}

impl FingerprintSlot for SlotFile {
    fn read(&self) -> efscfg_core::Result<Option<Fingerprint>> {
        self.read_fingerprint().map_err(|e| ConfigUpdateError::SlotRead {
            reason: e.to_string(),
        })
    }

    fn write(&mut self, fingerprint: &Fingerprint) -> efscfg_core::Result<()> {
        self.write_fingerprint(fingerprint)
            .map_err(|e| ConfigUpdateError::Persistence {
                reason: e.to_string(),
            })
    }
}
