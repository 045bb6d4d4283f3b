//! Info command implementation
//!
//! Runs the full pipeline and prints the published package metadata,
//! including the final library link order.

use anyhow::Result;

use super::{orchestrator, PlatformArgs, RecipeArgs};
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Execute the info command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs, json: bool) -> Result<()> {
    let fetcher = GitCli::new();
    let build_tool = CMakeDriver::new();
    let mut orchestrator = orchestrator(args, platform, &fetcher, &build_tool)?;

    let info = orchestrator.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("name:     {}", info.name);
        println!("version:  {}", info.version);
        println!("license:  {}", info.license);
        if let Some(homepage) = &info.homepage {
            println!("homepage: {homepage}");
        }
        println!("libs:     {}", info.libs.join(" "));
    }
    Ok(())
}
