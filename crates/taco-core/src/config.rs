use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use taco_util::errors::TacoError;

/// Environment variable overriding the TACO state directory.
pub const TACO_HOME_ENV: &str = "TACO_HOME";

/// User configuration loaded from `$TACO_HOME/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TacoConfig {
    #[serde(default)]
    pub cordova: CordovaConfig,

    #[serde(default)]
    pub kits: KitsConfig,
}

/// Cordova CLI settings from `[cordova]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CordovaConfig {
    /// Executable used for `cordova create`.
    #[serde(default = "default_cordova_bin")]
    pub bin: String,
}

impl Default for CordovaConfig {
    fn default() -> Self {
        Self {
            bin: default_cordova_bin(),
        }
    }
}

fn default_cordova_bin() -> String {
    if cfg!(windows) {
        "cordova.cmd".to_string()
    } else {
        "cordova".to_string()
    }
}

/// Kit catalog settings from `[kits]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KitsConfig {
    /// Kit metadata file used instead of the bundled catalog.
    #[serde(default)]
    pub metadata: Option<PathBuf>,
}

impl TacoConfig {
    /// Load `config.toml` from TACO_HOME, or return defaults if it doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from an explicit path, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| TacoError::FailedFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| {
            TacoError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the config file.
    pub fn default_path() -> Result<PathBuf, TacoError> {
        Ok(taco_home()?.join("config.toml"))
    }
}

/// Returns the TACO state directory, honouring `TACO_HOME`.
pub fn taco_home() -> Result<PathBuf, TacoError> {
    resolve_taco_home(std::env::var_os(TACO_HOME_ENV).as_deref())
}

/// Resolve the TACO state directory from an optional override.
///
/// Without an override this is `%APPDATA%\taco_home` on Windows and
/// `~/.taco_home` on other Unix-like hosts.
pub fn resolve_taco_home(override_dir: Option<&OsStr>) -> Result<PathBuf, TacoError> {
    match override_dir {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_taco_home(),
    }
}

#[cfg(windows)]
fn default_taco_home() -> Result<PathBuf, TacoError> {
    let app_data = std::env::var_os("APPDATA").ok_or_else(|| TacoError::Config {
        message: "APPDATA is not set; set TACO_HOME instead".to_string(),
    })?;
    Ok(PathBuf::from(app_data).join("taco_home"))
}

#[cfg(unix)]
fn default_taco_home() -> Result<PathBuf, TacoError> {
    let home = std::env::var_os("HOME").ok_or_else(|| TacoError::Config {
        message: "HOME is not set; set TACO_HOME instead".to_string(),
    })?;
    Ok(PathBuf::from(home).join(".taco_home"))
}

#[cfg(not(any(windows, unix)))]
fn default_taco_home() -> Result<PathBuf, TacoError> {
    Err(TacoError::UnexpectedPlatform {
        platform: std::env::consts::OS.to_string(),
    })
}
