//! The per-project `taco.json` manifest.
//!
//! A project follows either a kit (`{"kit": "5.1.1-Kit"}`) or a raw Cordova
//! CLI version (`{"cordova-cli": "5.1.1"}`), never both. Writes replace the
//! whole file atomically so a failed write leaves the previous selection in
//! place.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use taco_util::errors::{TacoError, TacoResult};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "taco.json";

/// The selection recorded in `taco.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectManifest {
    /// The project follows a kit from the kit catalog.
    Kit(String),
    /// The project pins a Cordova CLI version directly.
    CordovaCli(String),
}

/// On-disk shape; both keys are optional so malformed files can be reported.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kit: Option<String>,
    #[serde(
        default,
        rename = "cordova-cli",
        skip_serializing_if = "Option::is_none"
    )]
    cordova_cli: Option<String>,
}

impl ProjectManifest {
    pub fn kit_id(&self) -> Option<&str> {
        match self {
            Self::Kit(id) => Some(id),
            Self::CordovaCli(_) => None,
        }
    }

    pub fn cordova_cli(&self) -> Option<&str> {
        match self {
            Self::Kit(_) => None,
            Self::CordovaCli(version) => Some(version),
        }
    }

    /// Parse manifest JSON. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, TacoError> {
        let parse_error = |message: String| TacoError::ManifestParseError {
            path: path.to_path_buf(),
            message,
        };

        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        match (raw.kit, raw.cordova_cli) {
            (Some(kit), None) => Ok(Self::Kit(kit)),
            (None, Some(version)) => Ok(Self::CordovaCli(version)),
            (Some(_), Some(_)) => Err(parse_error(
                "both \"kit\" and \"cordova-cli\" are set; exactly one is allowed".to_string(),
            )),
            (None, None) => Err(parse_error(
                "expected a \"kit\" or \"cordova-cli\" entry".to_string(),
            )),
        }
    }

    /// Render the manifest as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> String {
        let raw = match self {
            Self::Kit(id) => RawManifest {
                kit: Some(id.clone()),
                cordova_cli: None,
            },
            Self::CordovaCli(version) => RawManifest {
                kit: None,
                cordova_cli: Some(version.clone()),
            },
        };
        let mut json = serde_json::to_string_pretty(&raw).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}

impl fmt::Display for ProjectManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kit(id) => write!(f, "kit {id}"),
            Self::CordovaCli(version) => write!(f, "Cordova CLI {version}"),
        }
    }
}

/// Path of the manifest inside `project_dir`.
pub fn manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_FILE)
}

/// Walk up from `start` to the nearest directory containing `taco.json`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    taco_util::fs::find_ancestor_with(start, MANIFEST_FILE)
}

/// Read and validate `taco.json` from `project_dir`.
pub fn read(project_dir: &Path) -> TacoResult<ProjectManifest> {
    let path = manifest_path(project_dir);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TacoError::ManifestNotFound { path: path.clone() }
        } else {
            TacoError::FailedFileRead {
                path: path.clone(),
                source: e,
            }
        }
    })?;
    Ok(ProjectManifest::parse(&content, &path)?)
}

/// Replace `taco.json` in `project_dir` with `manifest`.
///
/// The content is written to a temporary file in the same directory and then
/// renamed over the manifest, so readers see either the old or the new file.
pub fn write(project_dir: &Path, manifest: &ProjectManifest) -> TacoResult<()> {
    let path = manifest_path(project_dir);
    let write_error = |e: std::io::Error| TacoError::FailedFileWrite {
        path: path.clone(),
        source: e,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".taco.json.")
        .tempfile_in(project_dir)
        .map_err(write_error)?;
    tmp.write_all(manifest.to_json().as_bytes())
        .map_err(write_error)?;
    let permissions = match std::fs::metadata(&path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions()),
        Err(_) => set_new_file_permissions(tmp.as_file()),
    };
    permissions.map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(&path).map_err(|e| write_error(e.error))?;

    tracing::debug!("Wrote {} ({manifest})", path.display());
    Ok(())
}

/// Temp files are created owner-only; a new manifest should be world-readable.
#[cfg(unix)]
fn set_new_file_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}
