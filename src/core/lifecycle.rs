//! Lifecycle orchestration
//!
//! Sequences the pipeline through its fixed phases. Each phase runs at most
//! once, only if every earlier phase succeeded, and a failure halts the
//! pipeline carrying the phase that failed. There is no automatic retry;
//! re-running the whole pipeline is safe because source preparation is
//! idempotent.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::{BUILD_SUBFOLDER, DEBUG_LIB_SUFFIX, LICENSES_SUBFOLDER};
use crate::core::build_options;
use crate::core::linker::sort_libs;
use crate::core::options::Configuration;
use crate::core::platform::{BuildType, PlatformSettings};
use crate::core::recipe::Recipe;
use crate::core::requirements::{self, ToolRequirement};
use crate::core::source;
use crate::core::validate;
use crate::error::{BuildToolError, GitError, SmithError};
use crate::infra::filesystem;

/// Acquires upstream source; implemented by the git CLI in production
pub trait SourceFetcher {
    fn fetch(&self, url: &str, reference: &str, dest: &Path) -> Result<(), GitError>;
}

/// The external build tool's configure/build/install surface
pub trait BuildTool {
    fn configure(
        &self,
        definitions: &BTreeMap<String, String>,
        source_dir: &Path,
        build_dir: &Path,
        install_prefix: &Path,
    ) -> Result<(), BuildToolError>;

    fn build(&self, build_dir: &Path) -> Result<(), BuildToolError>;

    fn install(&self, build_dir: &Path) -> Result<(), BuildToolError>;
}

/// The fixed lifecycle phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    ConfigureOptions,
    ValidateConfiguration,
    ResolveBuildRequirements,
    PrepareSource,
    ConfigureBuildTool,
    Build,
    Package,
    PublishMetadata,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 8] = [
        Phase::ConfigureOptions,
        Phase::ValidateConfiguration,
        Phase::ResolveBuildRequirements,
        Phase::PrepareSource,
        Phase::ConfigureBuildTool,
        Phase::Build,
        Phase::Package,
        Phase::PublishMetadata,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConfigureOptions => "configure-options",
            Self::ValidateConfiguration => "validate-configuration",
            Self::ResolveBuildRequirements => "resolve-build-requirements",
            Self::PrepareSource => "prepare-source",
            Self::ConfigureBuildTool => "configure-build-tool",
            Self::Build => "build",
            Self::Package => "package",
            Self::PublishMetadata => "publish-metadata",
        };
        write!(f, "{name}")
    }
}

/// A pipeline failure, carrying the phase that failed
#[derive(Debug)]
pub struct PhaseFailure {
    pub phase: Phase,
    pub error: SmithError,
}

impl fmt::Display for PhaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase '{}' failed: {}", self.phase, self.error)
    }
}

impl std::error::Error for PhaseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Package metadata published after a successful pipeline
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub license: String,
    pub homepage: Option<String>,
    /// Libraries in link order
    pub libs: Vec<String>,
}

/// Outcome of a partial pipeline run
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// Resolved build-time tool requirements, if that phase ran
    pub requirements: Option<BTreeSet<ToolRequirement>>,
    /// Published package metadata, if the pipeline ran to completion
    pub info: Option<PackageInfo>,
}

/// Drives one recipe through the lifecycle
pub struct Orchestrator<'a> {
    recipe: Recipe,
    platform: PlatformSettings,
    config: Configuration,
    project_dir: PathBuf,
    fetcher: &'a dyn SourceFetcher,
    build_tool: &'a dyn BuildTool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        recipe: Recipe,
        config: Configuration,
        platform: PlatformSettings,
        project_dir: PathBuf,
        fetcher: &'a dyn SourceFetcher,
        build_tool: &'a dyn BuildTool,
    ) -> Self {
        Self {
            recipe,
            platform,
            config,
            project_dir,
            fetcher,
            build_tool,
        }
    }

    /// The configuration as it stands (final once validated)
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn build_dir(&self) -> PathBuf {
        self.project_dir.join(BUILD_SUBFOLDER)
    }

    fn install_prefix(&self) -> PathBuf {
        self.project_dir.join("install")
    }

    /// Run the pipeline up to and including `last`, halting at the first
    /// failure. No phase after a failed one is attempted.
    pub fn run_until(&mut self, last: Phase) -> Result<PipelineOutcome, PhaseFailure> {
        let mut outcome = PipelineOutcome::default();

        for phase in Phase::ALL {
            if phase > last {
                break;
            }
            tracing::info!("phase {phase}");
            self.run_phase(phase, &mut outcome)
                .map_err(|error| PhaseFailure { phase, error })?;
        }

        Ok(outcome)
    }

    /// Run the full pipeline
    pub fn run(&mut self) -> Result<PackageInfo, PhaseFailure> {
        let outcome = self.run_until(Phase::PublishMetadata)?;
        Ok(outcome
            .info
            .expect("publish-metadata always yields package info"))
    }

    fn run_phase(&mut self, phase: Phase, outcome: &mut PipelineOutcome) -> Result<(), SmithError> {
        match phase {
            Phase::ConfigureOptions => {
                self.config.configure_for(&self.platform);
                Ok(())
            }
            Phase::ValidateConfiguration => {
                validate::validate(&self.config, &self.platform)?;
                Ok(())
            }
            Phase::ResolveBuildRequirements => {
                outcome.requirements = Some(requirements::resolve(&self.config));
                Ok(())
            }
            Phase::PrepareSource => {
                source::prepare(&self.project_dir, &self.recipe, self.fetcher)?;
                Ok(())
            }
            Phase::ConfigureBuildTool => {
                let definitions = build_options::definitions(&self.config, &self.platform);
                self.build_tool.configure(
                    &definitions,
                    &self.project_dir,
                    &self.build_dir(),
                    &self.install_prefix(),
                )?;
                Ok(())
            }
            Phase::Build => {
                self.build_tool.build(&self.build_dir())?;
                Ok(())
            }
            Phase::Package => {
                self.build_tool.install(&self.build_dir())?;
                let license_src = self.project_dir.join(&self.recipe.package.license_file);
                if license_src.exists() {
                    let license_dst = self
                        .install_prefix()
                        .join(LICENSES_SUBFOLDER)
                        .join(&self.recipe.package.license_file);
                    filesystem::copy_file(&license_src, &license_dst)?;
                }
                Ok(())
            }
            Phase::PublishMetadata => {
                outcome.info = Some(self.package_info()?);
                Ok(())
            }
        }
    }

    /// Assemble the published metadata from the install tree
    fn package_info(&self) -> Result<PackageInfo, SmithError> {
        let suffix = if self.platform.build_type == BuildType::Debug {
            DEBUG_LIB_SUFFIX
        } else {
            ""
        };
        let discovered = filesystem::discover_libs(&self.install_prefix().join("lib"))?;
        // The linker consumes dependencies least-depended-first, so the
        // priority-ordered result is reversed
        let libs = sort_libs(&self.recipe.link.priority, &discovered, suffix, true);

        Ok(PackageInfo {
            name: self.recipe.package.name.clone(),
            version: self.recipe.package.version.clone(),
            license: self.recipe.package.license.clone(),
            homepage: self.recipe.package.homepage.clone(),
            libs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Compiler, CompilerFamily, TargetOs};
    use crate::core::recipe::{LinkSpec, PackageMeta, SourceSpec};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Records every collaborator call in order
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&self, call: &str) -> bool {
            self.calls.borrow_mut().push(call.to_string());
            self.fail_on != Some(call)
        }
    }

    impl SourceFetcher for Recorder {
        fn fetch(&self, url: &str, _reference: &str, dest: &Path) -> Result<(), GitError> {
            if self.record("fetch") {
                fs::create_dir_all(dest).unwrap();
                fs::write(dest.join("README.md"), "upstream").unwrap();
                Ok(())
            } else {
                Err(GitError::CloneFailed {
                    url: url.to_string(),
                    reference: "v1".to_string(),
                    error: "refused".to_string(),
                })
            }
        }
    }

    impl BuildTool for Recorder {
        fn configure(
            &self,
            _definitions: &BTreeMap<String, String>,
            _source_dir: &Path,
            _build_dir: &Path,
            _install_prefix: &Path,
        ) -> Result<(), BuildToolError> {
            if self.record("configure") {
                Ok(())
            } else {
                Err(BuildToolError::ConfigureFailed {
                    stderr: "bad generator".to_string(),
                })
            }
        }

        fn build(&self, _build_dir: &Path) -> Result<(), BuildToolError> {
            if self.record("build") {
                Ok(())
            } else {
                Err(BuildToolError::BuildFailed {
                    stderr: "compile error".to_string(),
                })
            }
        }

        fn install(&self, _build_dir: &Path) -> Result<(), BuildToolError> {
            if self.record("install") {
                Ok(())
            } else {
                Err(BuildToolError::InstallFailed {
                    stderr: "no permission".to_string(),
                })
            }
        }
    }

    fn recipe() -> Recipe {
        Recipe {
            package: PackageMeta {
                name: "corrade".to_string(),
                version: "v2020.06".to_string(),
                repository: "https://example.invalid/corrade.git".to_string(),
                description: None,
                license: "MIT".to_string(),
                license_file: "COPYING".to_string(),
                homepage: Some("https://magnum.graphics/corrade".to_string()),
                topics: vec![],
            },
            source: SourceSpec {
                prune: vec![],
                substitutions: vec![],
            },
            options: Configuration::default(),
            link: LinkSpec {
                priority: vec![
                    "CorradeUtility".to_string(),
                    "CorradeContainers".to_string(),
                    "CorradeTestSuite".to_string(),
                ],
            },
        }
    }

    fn platform(build_type: BuildType) -> PlatformSettings {
        PlatformSettings::new(
            TargetOs::Linux,
            "x86_64",
            Compiler::new(CompilerFamily::Clang, 10),
            build_type,
        )
    }

    #[test]
    fn test_full_pipeline_runs_collaborators_in_order() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let info = orchestrator.run().unwrap();
        assert_eq!(
            *recorder.calls.borrow(),
            vec!["fetch", "configure", "build", "install"]
        );
        assert_eq!(info.name, "corrade");
        assert_eq!(info.license, "MIT");
    }

    #[test]
    fn test_invalid_configuration_halts_before_any_work() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let mut config = Configuration::default();
        config.enable_asan = true;
        config.with_testsuite = true;

        let mut orchestrator = Orchestrator::new(
            recipe(),
            config,
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let failure = orchestrator.run().unwrap_err();
        assert_eq!(failure.phase, Phase::ValidateConfiguration);
        // Fail fast: no fetch, no build tool invocation
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_fetch_failure_stops_the_pipeline() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder {
            fail_on: Some("fetch"),
            ..Recorder::default()
        };

        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let failure = orchestrator.run().unwrap_err();
        assert_eq!(failure.phase, Phase::PrepareSource);
        assert_eq!(*recorder.calls.borrow(), vec!["fetch"]);
    }

    #[test]
    fn test_build_failure_does_not_reach_package() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder {
            fail_on: Some("build"),
            ..Recorder::default()
        };

        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let failure = orchestrator.run().unwrap_err();
        assert_eq!(failure.phase, Phase::Build);
        assert_eq!(*recorder.calls.borrow(), vec!["fetch", "configure", "build"]);
    }

    #[test]
    fn test_run_until_stops_at_requested_phase() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();
        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let outcome = orchestrator
            .run_until(Phase::ResolveBuildRequirements)
            .unwrap();
        assert!(outcome.requirements.is_some());
        assert!(outcome.info.is_none());
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_publish_metadata_orders_discovered_libs() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();

        // Pretend the build produced these artifacts
        let lib_dir = project.path().join("install/lib");
        fs::create_dir_all(&lib_dir).unwrap();
        fs::write(lib_dir.join("libCorradeTestSuite.a"), "").unwrap();
        fs::write(lib_dir.join("libCorradeUtility.a"), "").unwrap();
        fs::write(lib_dir.join("libSomethingElse.a"), "").unwrap();

        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let info = orchestrator.run().unwrap();
        // Priority order reversed for the linker; unknown libs dropped
        assert_eq!(info.libs, vec!["CorradeTestSuite", "CorradeUtility"]);
    }

    #[test]
    fn test_debug_build_matches_suffixed_artifacts() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();

        let lib_dir = project.path().join("install/lib");
        fs::create_dir_all(&lib_dir).unwrap();
        fs::write(lib_dir.join("libCorradeUtility-d.a"), "").unwrap();
        fs::write(lib_dir.join("libCorradeContainers.a"), "").unwrap();

        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Debug),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        let info = orchestrator.run().unwrap();
        // Only the -d artifact matches on Debug
        assert_eq!(info.libs, vec!["CorradeUtility-d"]);
    }

    #[test]
    fn test_package_copies_license_into_install_tree() {
        let project = TempDir::new().unwrap();
        let recorder = Recorder::default();
        fs::write(project.path().join("COPYING"), "MIT license text").unwrap();

        let mut orchestrator = Orchestrator::new(
            recipe(),
            Configuration::default(),
            platform(BuildType::Release),
            project.path().to_path_buf(),
            &recorder,
            &recorder,
        );

        orchestrator.run().unwrap();
        assert_eq!(
            fs::read_to_string(project.path().join("install/licenses/COPYING")).unwrap(),
            "MIT license text"
        );
    }
}
