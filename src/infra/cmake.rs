//! CMake build/install driver
//!
//! Thin adapter over the external `cmake` executable: configure, build,
//! install. Failures carry the tool's own stderr verbatim; nothing is
//! reinterpreted here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::lifecycle::BuildTool;
use crate::error::BuildToolError;

/// Drives the external cmake executable
#[derive(Debug, Default)]
pub struct CMakeDriver;

impl CMakeDriver {
    pub fn new() -> Self {
        Self
    }

    fn cmake() -> Result<PathBuf, BuildToolError> {
        which::which("cmake").map_err(|_| BuildToolError::NotFound)
    }

    fn run(
        mut command: Command,
        on_failure: impl FnOnce(String) -> BuildToolError,
    ) -> Result<(), BuildToolError> {
        let rendered = format!("{command:?}");
        tracing::debug!("running {rendered}");
        let output = command.output().map_err(|e| BuildToolError::SpawnFailed {
            command: rendered,
            error: e.to_string(),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(on_failure(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

impl BuildTool for CMakeDriver {
    fn configure(
        &self,
        definitions: &BTreeMap<String, String>,
        source_dir: &Path,
        build_dir: &Path,
        install_prefix: &Path,
    ) -> Result<(), BuildToolError> {
        let mut command = Command::new(Self::cmake()?);
        command
            .arg("-S")
            .arg(source_dir)
            .arg("-B")
            .arg(build_dir)
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                install_prefix.display()
            ));
        for (name, value) in definitions {
            command.arg(format!("-D{name}={value}"));
        }
        Self::run(command, |stderr| BuildToolError::ConfigureFailed { stderr })
    }

    fn build(&self, build_dir: &Path) -> Result<(), BuildToolError> {
        let mut command = Command::new(Self::cmake()?);
        command
            .arg("--build")
            .arg(build_dir)
            .arg("--parallel")
            .arg(num_cpus::get().to_string());
        Self::run(command, |stderr| BuildToolError::BuildFailed { stderr })
    }

    fn install(&self, build_dir: &Path) -> Result<(), BuildToolError> {
        let mut command = Command::new(Self::cmake()?);
        command.arg("--install").arg(build_dir);
        Self::run(command, |stderr| BuildToolError::InstallFailed { stderr })
    }
}
