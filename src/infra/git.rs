//! Source fetching via the external git tool
//!
//! The recipe needs a shallow clone with submodules at an exact ref; that
//! is delegated to the `git` executable as an opaque blocking call. Retry
//! policy belongs to git itself, not to this crate.

use std::path::Path;
use std::process::Command;

use crate::config::defaults::GIT_CLONE_DEPTH;
use crate::core::lifecycle::SourceFetcher;
use crate::error::GitError;

/// Fetches upstream source with the git CLI
#[derive(Debug, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

impl SourceFetcher for GitCli {
    /// Shallow-clone `url` at `reference` (branch or tag) into `dest`,
    /// including nested submodules.
    fn fetch(&self, url: &str, reference: &str, dest: &Path) -> Result<(), GitError> {
        let git = which::which("git").map_err(|_| GitError::NotFound)?;

        tracing::info!("cloning {url} at {reference} into {}", dest.display());
        let output = Command::new(git)
            .arg("clone")
            .arg("-b")
            .arg(reference)
            .arg("--depth")
            .arg(GIT_CLONE_DEPTH.to_string())
            .arg("--recursive")
            .arg("--recurse-submodules")
            .arg(url)
            .arg(dest)
            .output()
            .map_err(|e| GitError::IoError {
                path: dest.to_path_buf(),
                error: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(GitError::CloneFailed {
                url: url.to_string(),
                reference: reference.to_string(),
                error: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
