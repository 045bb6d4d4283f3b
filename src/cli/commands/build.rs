//! Build command implementation
//!
//! Runs the pipeline through the build phase: validation, requirement
//! resolution, source preparation, cmake configure and build.

use anyhow::Result;

use super::{orchestrator, PlatformArgs, RecipeArgs};
use crate::cli::output::status;
use crate::core::lifecycle::Phase;
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Execute the build command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs) -> Result<()> {
    let fetcher = GitCli::new();
    let build_tool = CMakeDriver::new();
    let mut orchestrator = orchestrator(args, platform, &fetcher, &build_tool)?;

    orchestrator.run_until(Phase::Build)?;
    println!("{} build finished", status::SUCCESS);
    Ok(())
}
