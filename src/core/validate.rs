//! Configuration validation
//!
//! Checks a configuration snapshot against the recipe's mutual-exclusion
//! and platform rules before any network or build work begins. Every rule
//! is checked independently and all violations are reported together.
//! Pure and idempotent: no I/O beyond warning logs, safe to call twice.

use std::fmt;

use crate::config::defaults::MSVC_MINIMUM_VERSION;
use crate::core::options::Configuration;
use crate::core::platform::{BuildType, CompilerFamily, PlatformSettings};
use crate::error::ConfigError;

/// Non-fatal advisories produced alongside a successful validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Advisory messages, already logged, never fatal
    pub warnings: Vec<String>,
}

/// A rejected configuration, carrying every rule violation found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<ConfigError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Validate a configuration against a platform
pub fn validate(
    config: &Configuration,
    platform: &PlatformSettings,
) -> Result<ValidationReport, ValidationFailure> {
    let mut violations = Vec::new();
    let mut report = ValidationReport::default();

    // Compiler version floor
    if platform.compiler.family == CompilerFamily::Msvc
        && platform.compiler.version < MSVC_MINIMUM_VERSION
    {
        violations.push(ConfigError::UnsupportedToolchain {
            compiler: platform.compiler.family.to_string(),
            version: platform.compiler.version,
            minimum: MSVC_MINIMUM_VERSION,
        });
    }

    // Sanitizers conflict with the exception-dependent test suite, and
    // need the llvm toolkit installed
    if config.sanitizers_enabled() {
        let sanitizer = config
            .enabled_sanitizers()
            .first()
            .copied()
            .unwrap_or("sanitizer")
            .to_string();

        if config.with_testsuite {
            violations.push(ConfigError::IncompatibleOptions {
                first: sanitizer.clone(),
                second: "with_testsuite".to_string(),
                reason: "the test suite requires exceptions, which sanitized builds disable"
                    .to_string(),
            });
        }
        if !config.llvm_tools {
            violations.push(ConfigError::IncompatibleOptions {
                first: sanitizer,
                second: "llvm_tools".to_string(),
                reason: "sanitized builds require the llvm toolkit (set ENABLE_LLVM_TOOLS)"
                    .to_string(),
            });
        }
    }

    if config.compile_with_llvm_tools && !config.llvm_tools {
        violations.push(ConfigError::IncompatibleOptions {
            first: "compile_with_llvm_tools".to_string(),
            second: "llvm_tools".to_string(),
            reason: "compiling with the llvm toolkit requires it to be installed".to_string(),
        });
    }

    // Advisory only: debug-class builds benefit from the llvm toolkit
    if platform.build_type != BuildType::Release && !config.llvm_tools {
        let warning = format!(
            "consider enabling llvm_tools for {} builds",
            platform.build_type
        );
        tracing::warn!("{warning}");
        report.warnings.push(warning);
    }

    if violations.is_empty() {
        Ok(report)
    } else {
        Err(ValidationFailure { violations })
    }
}
