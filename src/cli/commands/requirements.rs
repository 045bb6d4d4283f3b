//! Requirements command implementation
//!
//! Validates the configuration, then prints the resolved build-time tool
//! requirement set.

use anyhow::Result;

use super::{orchestrator, PlatformArgs, RecipeArgs};
use crate::core::lifecycle::Phase;
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Execute the requirements command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs, json: bool) -> Result<()> {
    let fetcher = GitCli::new();
    let build_tool = CMakeDriver::new();
    let mut orchestrator = orchestrator(args, platform, &fetcher, &build_tool)?;

    let outcome = orchestrator.run_until(Phase::ResolveBuildRequirements)?;
    let requirements = outcome
        .requirements
        .expect("requirement resolution phase ran");

    if json {
        println!("{}", serde_json::to_string_pretty(&requirements)?);
    } else {
        for requirement in &requirements {
            println!("{requirement}");
        }
    }
    Ok(())
}
