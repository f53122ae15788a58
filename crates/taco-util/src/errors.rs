use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all TACO operations.
///
/// Every variant carries a stable diagnostic code (`taco::<kind>`) so callers
/// and scripts can tell failures apart without parsing messages.
#[derive(Debug, Error, Diagnostic)]
pub enum TacoError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    #[diagnostic(code(taco::io))]
    Io(#[from] std::io::Error),

    /// The requested kit id is not present in the kit catalog.
    #[error("Invalid kit: '{kit}' is not a known kit")]
    #[diagnostic(
        code(taco::invalid_kit),
        help("Run `taco kit list` to see the available kits")
    )]
    InvalidKit { kit: String },

    /// A Cordova CLI version string is not a valid semantic version.
    #[error("Invalid Cordova CLI version: '{version}'")]
    #[diagnostic(
        code(taco::invalid_version),
        help("Use a semantic version such as 5.1.1")
    )]
    InvalidVersion { version: String },

    /// No `taco.json` was found where one is required.
    #[error("Manifest not found: {}", path.display())]
    #[diagnostic(
        code(taco::manifest_not_found),
        help("Run this command inside a project created with `taco create`")
    )]
    ManifestNotFound { path: PathBuf },

    /// `taco.json` exists but is malformed.
    #[error("Failed to parse {}: {message}", path.display())]
    #[diagnostic(code(taco::manifest_parse_error))]
    ManifestParseError { path: PathBuf, message: String },

    /// Reading a file failed.
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(taco::failed_file_read))]
    FailedFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("Failed to write {}", path.display())]
    #[diagnostic(code(taco::failed_file_write))]
    FailedFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Copying a single file failed.
    #[error("Failed to copy {} to {}", source_path.display(), target.display())]
    #[diagnostic(code(taco::failed_copy))]
    FailedCopy {
        source_path: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },

    /// Copying a directory tree failed.
    #[error("Failed to copy directory {} to {}", source_path.display(), target.display())]
    #[diagnostic(code(taco::failed_recursive_copy))]
    FailedRecursiveCopy {
        source_path: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },

    /// The host platform has no known TACO_HOME layout.
    #[error("Unexpected platform: {platform}")]
    #[diagnostic(
        code(taco::unexpected_platform),
        help("Set TACO_HOME explicitly")
    )]
    UnexpectedPlatform { platform: String },

    /// The kit catalog could not be loaded.
    #[error("Kit metadata error: {message}")]
    #[diagnostic(code(taco::kit_metadata))]
    KitMetadata { message: String },

    /// An application name contains characters Cordova rejects.
    #[error("Invalid app name '{name}'{}", format_invalid(invalid))]
    #[diagnostic(code(taco::invalid_app_name))]
    InvalidAppName { name: String, invalid: Vec<char> },

    /// A path contains segments the host filesystem cannot represent.
    #[error("Invalid path: {path}")]
    #[diagnostic(code(taco::invalid_path))]
    InvalidPath { path: String },

    /// A child process exited unsuccessfully.
    #[error("Command `{command}` failed with exit code {}: {stderr}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    #[diagnostic(code(taco::command_failed))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The user configuration is unreadable or invalid.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(taco::config),
        help("Check config.toml in your TACO_HOME directory")
    )]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    #[diagnostic(code(taco::generic))]
    Generic { message: String },
}

fn format_invalid(chars: &[char]) -> String {
    if chars.is_empty() {
        return String::new();
    }
    let listed: Vec<String> = chars.iter().map(|c| format!("{c:?}")).collect();
    format!(": contains {}", listed.join(", "))
}

/// Convenience alias for `miette::Result<T>`.
pub type TacoResult<T> = miette::Result<T>;
