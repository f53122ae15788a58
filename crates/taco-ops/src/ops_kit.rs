//! Kit operations: list the catalog and select a kit or Cordova CLI version
//! for a project.
//!
//! A project is either in kit mode (`{"kit": ..}`) or CLI mode
//! (`{"cordova-cli": ..}`). Selection validates the target against the
//! catalog before touching `taco.json`, so a rejected target leaves the
//! previous selection in place.

use std::path::{Path, PathBuf};

use serde::Serialize;

use taco_core::manifest::{self, ProjectManifest};
use taco_core::telemetry::TelemetryProperties;
use taco_kits::metadata::Kit;
use taco_kits::registry::KitRegistry;
use taco_kits::version::CordovaVersion;
use taco_util::errors::{TacoError, TacoResult};

/// Options accepted by the `kit` sub-commands.
#[derive(Debug, Clone, Default)]
pub struct KitCommandOptions {
    pub kit: Option<String>,
    pub cordova: Option<String>,
    pub json: Option<PathBuf>,
}

impl KitCommandOptions {
    /// Telemetry for `sub_command`. The JSON output path is PII; kit ids
    /// and Cordova versions are not.
    pub fn telemetry(&self, sub_command: &str) -> TelemetryProperties {
        let mut props = TelemetryProperties::for_sub_command(sub_command);
        props.set_option("kit", self.kit.as_deref(), false);
        props.set_option("cordova", self.cordova.as_deref(), false);
        let json = self.json.as_ref().map(|p| p.to_string_lossy());
        props.set_option("json", json.as_deref(), true);
        props
    }
}

/// What a project should be switched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTarget {
    Kit(String),
    Cordova(String),
}

impl SelectTarget {
    /// Exactly one of `kit` / `cordova` must be given.
    pub fn from_options(options: &KitCommandOptions) -> Result<Self, TacoError> {
        match (&options.kit, &options.cordova) {
            (Some(kit), None) => Ok(Self::Kit(kit.clone())),
            (None, Some(version)) => Ok(Self::Cordova(version.clone())),
            (Some(_), Some(_)) => Err(TacoError::Generic {
                message: "Specify either --kit or --cordova, not both".to_string(),
            }),
            (None, None) => Err(TacoError::Generic {
                message: "Specify what to select.\n  \
                          Examples:\n    \
                            taco kit select --kit 5.1.1-Kit\n    \
                            taco kit select --cordova 5.1.1"
                    .to_string(),
            }),
        }
    }
}

/// Result of a successful `kit select`.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// The manifest before the selection.
    pub previous: ProjectManifest,
    /// The manifest now on disk.
    pub manifest: ProjectManifest,
    /// The selected kit, in kit mode.
    pub kit: Option<Kit>,
    /// The Cordova CLI version the project now uses.
    pub cordova_cli: CordovaVersion,
    pub telemetry: TelemetryProperties,
}

impl SelectionOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.manifest
    }
}

/// Switch the project at `project_dir` to the kit or Cordova CLI version in
/// `options`.
///
/// The project must already have a readable `taco.json`. Validation happens
/// before the manifest is written; on any error the file is unchanged.
pub fn select(
    project_dir: &Path,
    options: &KitCommandOptions,
    registry: &KitRegistry,
) -> TacoResult<SelectionOutcome> {
    let target = SelectTarget::from_options(options)?;
    let previous = manifest::read(project_dir)?;

    let (selection, kit, cordova_cli) = match &target {
        SelectTarget::Kit(id) => {
            let kit = registry.resolve_kit(id)?;
            if kit.deprecated {
                tracing::warn!("Kit {} is deprecated", kit.id);
            }
            (
                ProjectManifest::Kit(kit.id.clone()),
                Some(kit.clone()),
                kit.cordova_cli.clone(),
            )
        }
        SelectTarget::Cordova(version) => {
            let version = registry.resolve_cordova_version(version)?;
            (ProjectManifest::CordovaCli(version.to_string()), None, version)
        }
    };

    manifest::write(project_dir, &selection)?;
    tracing::info!("Switched {} from {previous} to {selection}", project_dir.display());

    let telemetry = options.telemetry("select");
    telemetry.emit("kit");

    Ok(SelectionOutcome {
        previous,
        manifest: selection,
        kit,
        cordova_cli,
        telemetry,
    })
}

/// Catalog snapshot written by `kit list --json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_kit: Option<String>,
    pub kits: Vec<Kit>,
}

/// Result of `kit list`.
#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub listing: KitListing,
    /// Where the listing was written, if `--json` was given.
    pub json_path: Option<PathBuf>,
    pub telemetry: TelemetryProperties,
}

/// List the catalog, or a single kit when `options.kit` is set, optionally
/// writing the listing as JSON to `options.json`.
pub fn list(options: &KitCommandOptions, registry: &KitRegistry) -> TacoResult<ListOutcome> {
    let kits: Vec<Kit> = match options.kit.as_deref() {
        Some(id) => vec![registry.resolve_kit(id)?.clone()],
        None => registry.kits().cloned().collect(),
    };
    let listing = KitListing {
        default_kit: registry.default_kit().map(|k| k.id.clone()),
        kits,
    };

    if let Some(path) = &options.json {
        write_listing(path, &listing)?;
    }

    let telemetry = options.telemetry("list");
    telemetry.emit("kit");

    Ok(ListOutcome {
        listing,
        json_path: options.json.clone(),
        telemetry,
    })
}

fn write_listing(path: &Path, listing: &KitListing) -> Result<(), TacoError> {
    let mut json = serde_json::to_string_pretty(listing).map_err(|e| TacoError::Generic {
        message: format!("Failed to serialize kit listing: {e}"),
    })?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| TacoError::FailedFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("Wrote kit listing to {}", path.display());
    Ok(())
}
