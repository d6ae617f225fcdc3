//! Filesystem artifact store.
//!
//! Loads a complete model registry from a directory of JSON parameter
//! exports. Expected layout under the root:
//!
//! ```text
//! checksums.json            (optional) relative path -> sha256 hex
//! lifespan/
//!   regressor.json
//!   columns.json
//! basic/
//!   classifier_<disease>.json   one per disease category
//!   scaler.json
//!   encoders.json
//!   features.json
//! detailed/                 (optional) same layout as basic/
//! ```
//!
//! When `checksums.json` is present every listed file is verified against
//! its digest before parsing; a mismatch aborts the whole load.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::adapters::linear::{LabelEncoder, LinearModel, LogisticModel, StandardScaler};
use crate::application::{ClassifierFamily, LifespanModel, ModelRegistry};
use crate::domain::{AliasTable, AucTable, ColumnManifest, Disease};

/// Registry built from the linear JSON exports this store understands.
pub type LinearRegistry = ModelRegistry<LogisticModel, LinearModel, StandardScaler, LabelEncoder>;

/// Errors raised while loading artifacts from disk.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Checksum mismatch for artifact {path}")]
    ChecksumMismatch { path: PathBuf },
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Read-only view over an artifact directory.
pub struct ArtifactStore {
    root: PathBuf,
    checksums: BTreeMap<String, String>,
}

impl ArtifactStore {
    /// Open an artifact directory, reading `checksums.json` if present.
    ///
    /// # Errors
    /// Fails if the checksum manifest exists but cannot be read or parsed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let root = root.into();
        let manifest_path = root.join("checksums.json");
        let checksums = if manifest_path.exists() {
            let bytes = std::fs::read(&manifest_path).map_err(|source| ArtifactError::Io {
                path: manifest_path.clone(),
                source,
            })?;
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Format {
                path: manifest_path,
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { root, checksums })
    }

    /// Read a file relative to the root, verifying its digest when the
    /// checksum manifest lists it.
    fn read(&self, relative: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.root.join(relative);
        if !path.exists() {
            return Err(ArtifactError::Missing { path });
        }
        let bytes = std::fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        if let Some(expected) = self.checksums.get(relative) {
            let actual = sha256_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected) {
                tracing::error!(artifact = relative, "artifact digest mismatch");
                return Err(ArtifactError::ChecksumMismatch { path });
            }
        }
        Ok(bytes)
    }

    fn load_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, ArtifactError> {
        let bytes = self.read(relative)?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Format {
            path: self.root.join(relative),
            source,
        })
    }

    fn load_family(
        &self,
        dir: &str,
        auc: AucTable,
    ) -> Result<ClassifierFamily<LogisticModel, StandardScaler, LabelEncoder>, ArtifactError>
    {
        let mut classifiers = BTreeMap::new();
        for disease in Disease::ALL {
            let model: LogisticModel =
                self.load_json(&format!("{dir}/classifier_{}.json", disease.key()))?;
            classifiers.insert(disease, model);
        }

        Ok(ClassifierFamily {
            classifiers,
            scaler: self.load_json(&format!("{dir}/scaler.json"))?,
            encoders: self.load_json(&format!("{dir}/encoders.json"))?,
            manifest: self.load_json(&format!("{dir}/features.json"))?,
            auc,
        })
    }

    /// Load the full registry.
    ///
    /// The lifespan manifest gets the built-in alias table attached so the
    /// historical column misnamings resolve regardless of how the columns
    /// file spells them. The detailed family loads only when its directory
    /// exists.
    ///
    /// # Errors
    /// Fails on any missing, unreadable, malformed or digest-mismatched
    /// artifact within a family that must load.
    pub fn load_registry(&self) -> Result<LinearRegistry, ArtifactError> {
        tracing::info!(root = %self.root.display(), "loading model artifacts");

        let regressor: LinearModel = self.load_json("lifespan/regressor.json")?;
        let manifest: ColumnManifest = self.load_json("lifespan/columns.json")?;
        let lifespan = LifespanModel {
            regressor,
            manifest: manifest.with_aliases(AliasTable::default()),
        };

        let basic = self.load_family("basic", AucTable::BASIC)?;
        let detailed = if self.root.join("detailed").is_dir() {
            Some(self.load_family("detailed", AucTable::ADVANCED)?)
        } else {
            tracing::info!("detailed classifier family not present, skipping");
            None
        };

        Ok(ModelRegistry::new(basic, detailed, lifespan))
    }
}
