//! Source preparation pipeline
//!
//! Fetches upstream source into the download directory and transforms it
//! into the layout the wrapped build descriptor expects. The steps are
//! strictly ordered and fail fast; a partial failure leaves the working
//! tree inconsistent by design, and a re-run repairs it because the fetch
//! starts clean and the merge-copy is idempotent.

use std::path::Path;
use std::time::Duration;

use crate::config::defaults::{COPY_IGNORE_LIST, COPY_MTIME_EPSILON_SECS, DOWNLOAD_SUBFOLDER};
use crate::core::lifecycle::SourceFetcher;
use crate::core::recipe::Recipe;
use crate::error::SourceError;
use crate::infra::filesystem;

fn step_failed(step: &str, error: impl ToString) -> SourceError {
    SourceError::StepFailed {
        step: step.to_string(),
        error: error.to_string(),
    }
}

/// Prepare the source tree for a recipe under `project_dir`
pub fn prepare(
    project_dir: &Path,
    recipe: &Recipe,
    fetcher: &dyn SourceFetcher,
) -> Result<(), SourceError> {
    let downloads = project_dir.join(DOWNLOAD_SUBFOLDER);

    // 1. A prior working tree is never merged with a fresh fetch
    filesystem::remove_dir_all(&downloads).map_err(|e| step_failed("clean-downloads", e))?;

    // 2. Shallow fetch at the exact recipe version, submodules included
    fetcher
        .fetch(&recipe.package.repository, &recipe.package.version, &downloads)
        .map_err(|e| step_failed("fetch", e))?;
    tracing::info!("downloaded source into {}", downloads.display());

    // 3. The upstream tree may carry this recipe's own packaging
    //    artifacts; prune them so the recipe's copies stay authoritative
    for entry in &recipe.source.prune {
        let path = downloads.join(entry);
        if path.is_dir() {
            filesystem::remove_dir_all(&path).map_err(|e| step_failed("prune", e))?;
        } else if path.is_file() {
            std::fs::remove_file(&path).map_err(|e| step_failed("prune", e))?;
        }
    }

    // 4. Content-aware merge into the build working directory
    let stats = filesystem::merge_copy(
        &downloads,
        project_dir,
        COPY_IGNORE_LIST,
        Duration::from_secs(COPY_MTIME_EPSILON_SECS),
    )
    .map_err(|e| step_failed("merge-copy", e))?;
    tracing::debug!(
        "merge-copy: {} copied, {} up to date",
        stats.copied,
        stats.skipped
    );

    // 5. File-name-addressed swaps: wrap the upstream build descriptor
    //    and replace the designated sources
    for substitution in &recipe.source.substitutions {
        let target = project_dir.join(&substitution.target);
        let backup = project_dir.join(&substitution.backup);
        let replacement = project_dir.join(&substitution.replacement);

        filesystem::rename(&target, &backup).map_err(|e| step_failed("substitute", e))?;
        filesystem::rename(&replacement, &target).map_err(|e| step_failed("substitute", e))?;
    }

    Ok(())
}
