//! The loaded kit catalog and kit / Cordova CLI version resolution.

use taco_util::errors::TacoError;

use crate::metadata::{self, Kit};
use crate::version::CordovaVersion;

/// An ordered, read-only catalog of kits with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitRegistry {
    kits: Vec<Kit>,
}

impl KitRegistry {
    /// Build a registry from kit metadata JSON.
    pub fn from_json(content: &str) -> Result<Self, TacoError> {
        let registry = Self::from_kits(metadata::parse_kits(content)?)?;
        tracing::debug!("Loaded kit catalog with {} kits", registry.len());
        Ok(registry)
    }

    /// Build a registry from already-parsed kits, rejecting duplicate ids.
    pub fn from_kits(kits: Vec<Kit>) -> Result<Self, TacoError> {
        for (i, kit) in kits.iter().enumerate() {
            if kits[..i].iter().any(|k| k.id == kit.id) {
                return Err(TacoError::KitMetadata {
                    message: format!("duplicate kit id '{}'", kit.id),
                });
            }
        }
        Ok(Self { kits })
    }

    /// Look up a kit by id.
    pub fn resolve_kit(&self, id: &str) -> Result<&Kit, TacoError> {
        self.kits
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| TacoError::InvalidKit { kit: id.to_string() })
    }

    /// Validate a raw Cordova CLI version string.
    ///
    /// Any semantic version is accepted; it does not have to belong to a kit.
    pub fn resolve_cordova_version(&self, version: &str) -> Result<CordovaVersion, TacoError> {
        version.parse::<CordovaVersion>().map_err(|e| {
            tracing::debug!("Rejected Cordova CLI version '{version}': {e}");
            TacoError::InvalidVersion {
                version: version.to_string(),
            }
        })
    }

    /// Kits in catalog order. Each call starts a fresh pass.
    pub fn kits(&self) -> impl Iterator<Item = &Kit> + '_ {
        self.kits.iter()
    }

    /// The kit new projects use when none is requested: the kit flagged as
    /// default, otherwise the newest non-deprecated kit, otherwise the newest kit.
    pub fn default_kit(&self) -> Option<&Kit> {
        self.kits
            .iter()
            .find(|k| k.default)
            .or_else(|| {
                self.kits
                    .iter()
                    .filter(|k| !k.deprecated)
                    .max_by(|a, b| a.cordova_cli.cmp(&b.cordova_cli))
            })
            .or_else(|| self.kits.iter().max_by(|a, b| a.cordova_cli.cmp(&b.cordova_cli)))
    }

    /// Kits that pin the given Cordova CLI version.
    pub fn kits_for_cordova(&self, version: &CordovaVersion) -> impl Iterator<Item = &Kit> + '_ {
        let version = version.clone();
        self.kits.iter().filter(move |k| k.cordova_cli == version)
    }

    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }
}
