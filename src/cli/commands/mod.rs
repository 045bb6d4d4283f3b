//! CLI command implementations
//!
//! Each command is implemented in its own submodule. They all share the
//! same recipe/platform arguments and differ only in how far down the
//! lifecycle they run.

pub mod build;
pub mod check;
pub mod info;
pub mod package;
pub mod requirements;
pub mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::core::lifecycle::Orchestrator;
use crate::core::options::Configuration;
use crate::core::platform::{BuildType, Compiler, CompilerFamily, PlatformSettings, TargetOs};
use crate::core::recipe::Recipe;
use crate::infra::cmake::CMakeDriver;
use crate::infra::git::GitCli;

/// Arguments shared by every lifecycle command
#[derive(Args, Debug)]
pub struct RecipeArgs {
    /// Project directory holding the recipe and packaging files
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Recipe file (defaults to recipe.toml in the project directory)
    #[arg(long)]
    pub recipe: Option<PathBuf>,

    /// Option overrides as name=value pairs
    #[arg(short = 'o', long = "option")]
    pub options: Vec<String>,
}

/// Target platform arguments
#[derive(Args, Debug)]
pub struct PlatformArgs {
    /// Target operating system
    #[arg(long, default_value_t = TargetOs::host())]
    pub target_os: TargetOs,

    /// Target CPU architecture
    #[arg(long, default_value = std::env::consts::ARCH)]
    pub arch: String,

    /// Compiler family (gcc, clang, apple-clang, msvc)
    #[arg(long, default_value_t = CompilerFamily::Gcc)]
    pub compiler: CompilerFamily,

    /// Compiler major version
    #[arg(long, default_value_t = 12)]
    pub compiler_version: u32,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long, default_value_t = BuildType::Release)]
    pub build_type: BuildType,
}

impl PlatformArgs {
    pub fn to_settings(&self) -> PlatformSettings {
        PlatformSettings::new(
            self.target_os,
            &self.arch,
            Compiler::new(self.compiler, self.compiler_version),
            self.build_type,
        )
    }
}

/// Load the recipe and assemble the configuration for one run
pub fn load_context(args: &RecipeArgs) -> Result<(Recipe, Configuration)> {
    let recipe_path = args
        .recipe
        .clone()
        .unwrap_or_else(|| args.project_dir.join("recipe.toml"));
    let recipe = Recipe::load(&recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;

    let mut config = recipe.options.clone();
    config.read_env_toggles();
    config.apply_overrides(&args.options)?;

    Ok((recipe, config))
}

/// Build a production orchestrator for the given arguments
pub fn orchestrator<'a>(
    args: &RecipeArgs,
    platform: &PlatformArgs,
    fetcher: &'a GitCli,
    build_tool: &'a CMakeDriver,
) -> Result<Orchestrator<'a>> {
    let (recipe, config) = load_context(args)?;
    Ok(Orchestrator::new(
        recipe,
        config,
        platform.to_settings(),
        args.project_dir.clone(),
        fetcher,
        build_tool,
    ))
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration without doing any work
    Check {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Print the resolved build-time tool requirements
    Requirements {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Fetch and prepare the upstream source tree
    Source {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Run the pipeline through the build phase
    Build {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Build and install the package
    Package {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Run the full pipeline and print the package metadata
    Info {
        #[command(flatten)]
        recipe: RecipeArgs,

        #[command(flatten)]
        platform: PlatformArgs,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self, json: bool) -> Result<()> {
        match self {
            Commands::Check { recipe, platform } => check::execute(&recipe, &platform),
            Commands::Requirements { recipe, platform } => {
                requirements::execute(&recipe, &platform, json)
            }
            Commands::Source { recipe, platform } => source::execute(&recipe, &platform),
            Commands::Build { recipe, platform } => build::execute(&recipe, &platform),
            Commands::Package { recipe, platform } => package::execute(&recipe, &platform),
            Commands::Info { recipe, platform } => info::execute(&recipe, &platform, json),
        }
    }
}
