//! Source command implementation
//!
//! Runs the pipeline through source preparation: fetch, prune, merge-copy
//! and the build-descriptor substitutions.

use anyhow::Result;

use super::{orchestrator, PlatformArgs, RecipeArgs};
use crate::cli::output::status;
use crate::core::lifecycle::Phase;
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Execute the source command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs) -> Result<()> {
    let fetcher = GitCli::new();
    let build_tool = CMakeDriver::new();
    let mut orchestrator = orchestrator(args, platform, &fetcher, &build_tool)?;

    orchestrator.run_until(Phase::PrepareSource)?;
    println!("{} source tree prepared", status::SUCCESS);
    Ok(())
}
