use std::path::PathBuf;

use miette::Diagnostic;
use taco_util::errors::TacoError;

fn code_of(err: &TacoError) -> String {
    err.code().map(|c| c.to_string()).unwrap_or_default()
}

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = TacoError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_invalid_kit_display_and_code() {
    let err = TacoError::InvalidKit {
        kit: "InvalidKit".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid kit: 'InvalidKit' is not a known kit");
    assert_eq!(code_of(&err), "taco::invalid_kit");
}

#[test]
fn test_invalid_version_display_and_code() {
    let err = TacoError::InvalidVersion {
        version: "InvalidCordovaCliVersion".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid Cordova CLI version: 'InvalidCordovaCliVersion'"
    );
    assert_eq!(code_of(&err), "taco::invalid_version");
}

#[test]
fn test_manifest_not_found_mentions_path() {
    let err = TacoError::ManifestNotFound {
        path: PathBuf::from("/projects/app/taco.json"),
    };
    assert!(err.to_string().contains("/projects/app/taco.json"));
    assert_eq!(code_of(&err), "taco::manifest_not_found");
}

#[test]
fn test_failed_file_write_keeps_source() {
    let err = TacoError::FailedFileWrite {
        path: PathBuf::from("out.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let source = std::error::Error::source(&err).expect("io source attached");
    assert_eq!(source.to_string(), "denied");
    assert_eq!(code_of(&err), "taco::failed_file_write");
}

#[test]
fn test_recursive_copy_mentions_both_paths() {
    let err = TacoError::FailedRecursiveCopy {
        source_path: PathBuf::from("from"),
        target: PathBuf::from("to"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(err.to_string(), "Failed to copy directory from to to");
}

#[test]
fn test_invalid_app_name_lists_characters() {
    let err = TacoError::InvalidAppName {
        name: "a<b".to_string(),
        invalid: vec!['<'],
    };
    assert_eq!(err.to_string(), "Invalid app name 'a<b': contains '<'");
}

#[test]
fn test_command_failed_display() {
    let err = TacoError::CommandFailed {
        command: "cordova create app".to_string(),
        code: Some(2),
        stderr: "boom".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Command `cordova create app` failed with exit code 2: boom"
    );
}

#[test]
fn test_unexpected_platform_code() {
    let err = TacoError::UnexpectedPlatform {
        platform: "wasi".to_string(),
    };
    assert_eq!(code_of(&err), "taco::unexpected_platform");
}

#[test]
fn test_generic_error_display() {
    let err = TacoError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}
