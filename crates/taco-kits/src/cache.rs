//! Process-scoped kit catalog cache.
//!
//! The binary creates one [`KitCatalogCache`] and hands it to every operation
//! that needs the catalog, so the metadata is read and parsed at most once per
//! source. Tests create their own cache or call [`KitCatalogCache::reset`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use taco_util::errors::{TacoError, TacoResult};

use crate::registry::KitRegistry;

/// Kit metadata shipped with the binary.
const BUILTIN_METADATA: &str = include_str!("../data/kit-metadata.json");

/// Where kit metadata comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KitSource {
    /// The catalog bundled with this build.
    #[default]
    Builtin,
    /// A metadata file in the bundled catalog's format.
    File(PathBuf),
}

impl KitSource {
    /// `File` when an override path is configured, otherwise `Builtin`.
    pub fn from_override(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Builtin, Self::File)
    }

    /// Read and parse the catalog, bypassing any cache.
    pub fn load(&self) -> TacoResult<KitRegistry> {
        match self {
            Self::Builtin => Ok(KitRegistry::from_json(BUILTIN_METADATA)?),
            Self::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| TacoError::FailedFileRead {
                        path: path.clone(),
                        source: e,
                    })?;
                Ok(KitRegistry::from_json(&content)?)
            }
        }
    }
}

/// Memoizes the first successful catalog load.
///
/// Failed loads are not cached. Asking for a different source than the one
/// cached replaces the entry.
#[derive(Debug, Default)]
pub struct KitCatalogCache {
    loaded: Mutex<Option<(KitSource, Arc<KitRegistry>)>>,
}

impl KitCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `source`, loading it on first use.
    pub fn get_or_load(&self, source: &KitSource) -> TacoResult<Arc<KitRegistry>> {
        let mut slot = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_source, registry)) = slot.as_ref() {
            if cached_source == source {
                return Ok(Arc::clone(registry));
            }
        }

        tracing::debug!("Loading kit catalog from {source:?}");
        let registry = Arc::new(source.load()?);
        *slot = Some((source.clone(), Arc::clone(&registry)));
        Ok(registry)
    }

    /// Drop the cached catalog so the next call reloads it.
    pub fn reset(&self) {
        *self.loaded.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
