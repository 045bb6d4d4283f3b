//! Check command implementation
//!
//! Runs ConfigureOptions and validation only; no network or build work.

use anyhow::Result;

use super::{load_context, PlatformArgs, RecipeArgs};
use crate::cli::output::status;
use crate::core::validate;

/// Execute the check command
pub fn execute(args: &RecipeArgs, platform: &PlatformArgs) -> Result<()> {
    let (recipe, mut config) = load_context(args)?;
    let settings = platform.to_settings();

    config.configure_for(&settings);
    let report = validate::validate(&config, &settings)?;

    for warning in &report.warnings {
        println!("{} {warning}", status::WARNING);
    }
    println!(
        "{} {} {} configuration is valid for {} {}",
        status::SUCCESS,
        recipe.package.name,
        recipe.package.version,
        settings.os,
        settings.compiler,
    );
    Ok(())
}
