//! Kit metadata model and JSON parsing.
//!
//! The catalog is a JSON object whose `kits` member maps kit ids to their
//! pinned Cordova CLI version and recommended platform and plugin versions.
//! Catalog order is preserved, duplicates included; the registry rejects them.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use taco_util::errors::TacoError;

use crate::version::CordovaVersion;

/// A named bundle pinning a Cordova CLI version and compatible platform and
/// plugin versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    pub id: String,
    #[serde(rename = "cordova-cli")]
    pub cordova_cli: CordovaVersion,
    pub platforms: BTreeMap<String, String>,
    pub plugins: BTreeMap<String, String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_reason_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes_uri: Option<String>,
    pub default: bool,
}

/// A plugin constraint, either a bare version or an object with a `version`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PluginSpec {
    Version(String),
    Detailed { version: String },
}

impl PluginSpec {
    fn into_version(self) -> String {
        match self {
            Self::Version(v) | Self::Detailed { version: v } => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKit {
    #[serde(rename = "cordova-cli")]
    cordova_cli: String,
    #[serde(default)]
    platforms: BTreeMap<String, String>,
    #[serde(default)]
    plugins: BTreeMap<String, PluginSpec>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    deprecated_reason_uri: Option<String>,
    #[serde(default)]
    release_notes_uri: Option<String>,
    #[serde(default)]
    default: bool,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    kits: KitEntries,
}

/// The `kits` object as an ordered list of entries, duplicates included.
#[derive(Debug)]
struct KitEntries(Vec<(String, RawKit)>);

impl<'de> Deserialize<'de> for KitEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = KitEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping kit ids to kit definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((id, kit)) = map.next_entry::<String, RawKit>()? {
                    entries.push((id, kit));
                }
                Ok(KitEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parse kit metadata JSON into kits in catalog order.
///
/// Fails with [`TacoError::KitMetadata`] on malformed JSON or a kit whose
/// Cordova CLI version is not a semantic version.
pub fn parse_kits(content: &str) -> Result<Vec<Kit>, TacoError> {
    let raw: RawCatalog = serde_json::from_str(content).map_err(|e| TacoError::KitMetadata {
        message: format!("malformed kit metadata: {e}"),
    })?;

    let mut kits: Vec<Kit> = Vec::with_capacity(raw.kits.0.len());
    for (id, raw_kit) in raw.kits.0 {
        let cordova_cli = raw_kit
            .cordova_cli
            .parse::<CordovaVersion>()
            .map_err(|e| TacoError::KitMetadata {
                message: format!(
                    "kit '{id}' has invalid cordova-cli version '{}': {e}",
                    raw_kit.cordova_cli
                ),
            })?;
        kits.push(Kit {
            id,
            cordova_cli,
            platforms: raw_kit.platforms,
            plugins: raw_kit
                .plugins
                .into_iter()
                .map(|(name, spec)| (name, spec.into_version()))
                .collect(),
            deprecated: raw_kit.deprecated,
            deprecated_reason_uri: raw_kit.deprecated_reason_uri,
            release_notes_uri: raw_kit.release_notes_uri,
            default: raw_kit.default,
        });
    }
    Ok(kits)
}
