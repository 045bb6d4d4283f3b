//! Filesystem operations
//!
//! Directory wrappers, the content-aware merge copy used by source
//! preparation, and post-build library discovery.

use std::path::Path;
use std::time::Duration;

use walkdir::WalkDir;

use crate::core::linker::artifact_base_name;
use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents, if it exists
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Rename a file, creating the destination's parent directories
pub fn rename(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::rename(from, to).map_err(|e| FilesystemError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Copy a single file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(from, to).map_err(|e| FilesystemError::CopyFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Counters returned by [`merge_copy`], used to observe idempotence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files written to the destination
    pub copied: usize,
    /// Files left untouched because the destination was up to date
    pub skipped: usize,
}

/// Merge-copy a tree into a destination.
///
/// A file is written only if it does not yet exist at the destination or
/// its source modification time is newer than the destination's by more
/// than `epsilon` (tolerates timestamp jitter, keeps re-runs cheap).
/// Entries whose file name appears in `ignore` are never copied and, for
/// directories, never descended into. Running twice with unchanged sources
/// copies zero files on the second run.
pub fn merge_copy(
    src: &Path,
    dst: &Path,
    ignore: &[&str],
    epsilon: Duration,
) -> Result<CopyStats, FilesystemError> {
    let mut stats = CopyStats::default();
    create_dir_all(dst)?;

    let walker = WalkDir::new(src).min_depth(1).into_iter().filter_entry(|e| {
        e.file_name()
            .to_str()
            .map_or(true, |name| !ignore.contains(&name))
    });

    for entry in walker {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: src.to_path_buf(),
            error: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .expect("walked entry is under the source root");
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else if needs_copy(entry.path(), &target, epsilon) {
            copy_file(entry.path(), &target)?;
            stats.copied += 1;
        } else {
            stats.skipped += 1;
        }
    }

    Ok(stats)
}

fn needs_copy(src: &Path, dst: &Path, epsilon: Duration) -> bool {
    if !dst.exists() {
        return true;
    }
    let (Ok(src_meta), Ok(dst_meta)) = (std::fs::metadata(src), std::fs::metadata(dst)) else {
        return true;
    };
    match (src_meta.modified(), dst_meta.modified()) {
        (Ok(src_mtime), Ok(dst_mtime)) => match src_mtime.duration_since(dst_mtime) {
            Ok(age) => age > epsilon,
            // Destination is newer than the source
            Err(_) => false,
        },
        // No usable timestamps on this filesystem, copy to be safe
        _ => true,
    }
}

/// Discover library artifacts in a directory, as base names with the
/// platform decoration (`lib` prefix, extension) stripped. Order is
/// whatever the directory listing yields; the caller sorts.
pub fn discover_libs(lib_dir: &Path) -> Result<Vec<String>, FilesystemError> {
    if !lib_dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(lib_dir).map_err(|e| FilesystemError::ReadDir {
        path: lib_dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut libs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: lib_dir.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            if let Some(name) = entry.file_name().to_str().and_then(artifact_base_name) {
                libs.push(name);
            }
        }
    }
    Ok(libs)
}
