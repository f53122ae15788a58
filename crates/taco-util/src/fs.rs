use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{TacoError, TacoResult};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Returns `true` if `path` is missing or is a directory without entries.
pub fn is_missing_or_empty_dir(path: &Path) -> io::Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Ok(false);
    }
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Check whether every segment of `candidate` can exist as a file name on
/// this host.
///
/// Each segment is created as a directory inside a fresh scratch directory.
/// A segment is rejected only when the attempt fails the way invalid names
/// fail (not found, interior NUL, or `ERROR_INVALID_NAME` on Windows); any
/// other error is treated as valid so unrelated OS trouble does not produce
/// false negatives. The scratch directory is always removed best-effort.
pub fn is_path_valid(candidate: &str) -> bool {
    is_path_valid_in(&std::env::temp_dir(), candidate)
}

/// Like [`is_path_valid`], creating the scratch directory under `scratch_root`.
pub fn is_path_valid_in(scratch_root: &Path, candidate: &str) -> bool {
    let scratch = match tempfile::Builder::new()
        .prefix("taco-path-check-")
        .tempdir_in(scratch_root)
    {
        Ok(dir) => dir,
        Err(e) => {
            tracing::debug!("Could not create scratch directory for path check: {e}");
            return true;
        }
    };

    let valid = create_segments(scratch.path(), candidate);

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        tracing::warn!(
            "Failed to remove scratch directory {}: {e}",
            scratch_path.display()
        );
    }
    valid
}

fn create_segments(scratch: &Path, candidate: &str) -> bool {
    let mut segments: Vec<&str> = candidate.split(is_separator).collect();

    if cfg!(windows) && segments.first().is_some_and(|s| is_drive_letter(s)) {
        segments.remove(0);
    }

    for segment in segments {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        match std::fs::create_dir(scratch.join(segment)) {
            Ok(()) => {}
            Err(e) if is_invalid_name_error(&e) => {
                tracing::debug!("Path segment '{segment}' rejected: {e}");
                return false;
            }
            Err(e) => {
                tracing::trace!("Ignoring error for segment '{segment}': {e}");
            }
        }
    }
    true
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// `C:`-style leading segment.
pub fn is_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_invalid_name_error(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput
    ) {
        return true;
    }
    #[cfg(windows)]
    {
        const ERROR_INVALID_NAME: i32 = 123;
        if err.raw_os_error() == Some(ERROR_INVALID_NAME) {
            return true;
        }
    }
    false
}

/// Copy a single file. Resolves once the copy has fully completed.
///
/// The target's parent directory must already exist. A failed copy is not
/// cleaned up.
pub async fn copy_file(source: &Path, target: &Path) -> TacoResult<()> {
    tokio::fs::copy(source, target)
        .await
        .map_err(|e| TacoError::FailedCopy {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
            source: e,
        })?;
    Ok(())
}

/// Recursively copy the directory `source` into `target`, creating `target`
/// if needed. Existing files in `target` are overwritten; nothing written
/// before a failure is rolled back.
pub async fn copy_recursive(source: &Path, target: &Path) -> TacoResult<()> {
    let wrap = |e: io::Error| TacoError::FailedRecursiveCopy {
        source_path: source.to_path_buf(),
        target: target.to_path_buf(),
        source: e,
    };

    let root = source.to_path_buf();
    let entries = tokio::task::spawn_blocking(move || collect_entries(&root))
        .await
        .map_err(|e| wrap(io::Error::other(e)))?
        .map_err(wrap)?;

    tokio::fs::create_dir_all(target).await.map_err(wrap)?;
    for (relative, is_dir) in entries {
        let dest = target.join(&relative);
        if is_dir {
            tokio::fs::create_dir_all(&dest).await.map_err(wrap)?;
        } else {
            tokio::fs::copy(source.join(&relative), &dest)
                .await
                .map_err(wrap)?;
        }
    }
    tracing::debug!("Copied {} to {}", source.display(), target.display());
    Ok(())
}

/// Relative paths of everything below `root`, parents before children.
/// Symlinks are followed; a link cycle is an error.
fn collect_entries(root: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_path_buf();
        let is_dir = entry.file_type().is_dir();
        entries.push((relative, is_dir));
    }
    Ok(entries)
}
