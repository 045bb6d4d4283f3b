//! Package command implementation
//!
//! Runs the pipeline through the package phase: everything `build` does,
//! then cmake install plus the license copy into the install tree.

use anyhow::Result;

use super::{orchestrator, PlatformArgs, RecipeArgs};
use crate::cli::output::status;
use crate::core::lifecycle::Phase;
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Execute the package command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs) -> Result<()> {
    let fetcher = GitCli::new();
    let build_tool = CMakeDriver::new();
    let mut orchestrator = orchestrator(args, platform, &fetcher, &build_tool)?;

    orchestrator.run_until(Phase::Package)?;
    println!("{} package installed", status::SUCCESS);
    Ok(())
}
