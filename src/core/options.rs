//! Package configuration options
//!
//! The configuration is a strongly typed record with one field per option,
//! created once from recipe defaults plus caller overrides and immutable
//! after validation. The two llvm toggles come from the environment and are
//! read exactly once, at configuration time, so every later phase sees the
//! same values.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{ENV_COMPILE_WITH_LLVM_TOOLS, ENV_ENABLE_LLVM_TOOLS};
use crate::core::platform::{PlatformSettings, TargetOs};
use crate::error::RecipeError;

/// Configuration snapshot for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    /// Undefined-behavior sanitizer
    #[serde(default)]
    pub enable_ubsan: bool,

    /// Address sanitizer
    #[serde(default)]
    pub enable_asan: bool,

    /// Memory sanitizer
    #[serde(default)]
    pub enable_msan: bool,

    /// Thread sanitizer
    #[serde(default)]
    pub enable_tsan: bool,

    /// Build shared libraries instead of static
    #[serde(default)]
    pub shared: bool,

    /// Position-independent code; not applicable on Windows, where the
    /// ConfigureOptions phase clears it to None
    #[serde(default = "default_true_opt")]
    pub fpic: Option<bool>,

    /// Build deprecated APIs
    #[serde(default = "default_true")]
    pub build_deprecated: bool,

    /// Build the Interconnect library
    #[serde(default = "default_true")]
    pub with_interconnect: bool,

    /// Build the PluginManager library
    #[serde(default = "default_true")]
    pub with_pluginmanager: bool,

    /// Build the resource compiler
    #[serde(default = "default_true")]
    pub with_rc: bool,

    /// Build the TestSuite library (requires exceptions, so it conflicts
    /// with the sanitizers)
    #[serde(default)]
    pub with_testsuite: bool,

    /// Build the Utility library
    #[serde(default = "default_true")]
    pub with_utility: bool,

    /// Install the llvm toolkit (clang-tidy, IWYU, scan-build, ...).
    /// Environment-derived, never read from the recipe.
    #[serde(skip)]
    pub llvm_tools: bool,

    /// Compile with the llvm toolkit's clang. Environment-derived.
    #[serde(skip)]
    pub compile_with_llvm_tools: bool,
}

fn default_true() -> bool {
    true
}

fn default_true_opt() -> Option<bool> {
    Some(true)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enable_ubsan: false,
            enable_asan: false,
            enable_msan: false,
            enable_tsan: false,
            shared: false,
            fpic: Some(true),
            build_deprecated: true,
            with_interconnect: true,
            with_pluginmanager: true,
            with_rc: true,
            with_testsuite: false,
            with_utility: true,
            llvm_tools: false,
            compile_with_llvm_tools: false,
        }
    }
}

/// A single configuration entry as seen by the build tool transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl Configuration {
    /// Read the environment-derived toggles into the record.
    ///
    /// Called once when the configuration is created; later phases never
    /// touch the environment again.
    pub fn read_env_toggles(&mut self) {
        self.llvm_tools = env_flag(ENV_ENABLE_LLVM_TOOLS);
        self.compile_with_llvm_tools = env_flag(ENV_COMPILE_WITH_LLVM_TOOLS);
    }

    /// True if any of the four sanitizer toggles is set
    pub fn sanitizers_enabled(&self) -> bool {
        self.enable_ubsan || self.enable_asan || self.enable_msan || self.enable_tsan
    }

    /// Names of the sanitizer options currently enabled
    pub fn enabled_sanitizers(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.enable_ubsan {
            names.push("enable_ubsan");
        }
        if self.enable_asan {
            names.push("enable_asan");
        }
        if self.enable_msan {
            names.push("enable_msan");
        }
        if self.enable_tsan {
            names.push("enable_tsan");
        }
        names
    }

    /// The ConfigureOptions phase: platform-conditional option removal.
    /// fPIC has no meaning on Windows, so the toggle is dropped there.
    pub fn configure_for(&mut self, platform: &PlatformSettings) {
        if platform.os == TargetOs::Windows {
            self.fpic = None;
        }
    }

    /// Apply one `name=value` caller override
    pub fn apply_override(&mut self, name: &str, value: &str) -> Result<(), RecipeError> {
        match name {
            "enable_ubsan" => self.enable_ubsan = parse_bool(name, value)?,
            "enable_asan" => self.enable_asan = parse_bool(name, value)?,
            "enable_msan" => self.enable_msan = parse_bool(name, value)?,
            "enable_tsan" => self.enable_tsan = parse_bool(name, value)?,
            "shared" => self.shared = parse_bool(name, value)?,
            "fPIC" | "fpic" => self.fpic = Some(parse_bool(name, value)?),
            "build_deprecated" => self.build_deprecated = parse_bool(name, value)?,
            "with_interconnect" => self.with_interconnect = parse_bool(name, value)?,
            "with_pluginmanager" => self.with_pluginmanager = parse_bool(name, value)?,
            "with_rc" => self.with_rc = parse_bool(name, value)?,
            "with_testsuite" => self.with_testsuite = parse_bool(name, value)?,
            "with_utility" => self.with_utility = parse_bool(name, value)?,
            _ => {
                return Err(RecipeError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Apply a list of `name=value` overrides
    pub fn apply_overrides(&mut self, overrides: &[String]) -> Result<(), RecipeError> {
        for entry in overrides {
            let (name, value) = entry.split_once('=').ok_or_else(|| RecipeError::InvalidValue {
                name: entry.clone(),
                value: String::new(),
                expected: "name=value".to_string(),
            })?;
            self.apply_override(name.trim(), value.trim())?;
        }
        Ok(())
    }

    /// All present options as (name, value) pairs, in declaration order.
    ///
    /// This is the surface the build tool transform iterates; an option
    /// removed by ConfigureOptions (fPIC on Windows) does not appear.
    pub fn entries(&self) -> Vec<(&'static str, OptionValue)> {
        let mut entries = vec![
            ("enable_ubsan", OptionValue::Bool(self.enable_ubsan)),
            ("enable_asan", OptionValue::Bool(self.enable_asan)),
            ("enable_msan", OptionValue::Bool(self.enable_msan)),
            ("enable_tsan", OptionValue::Bool(self.enable_tsan)),
            ("shared", OptionValue::Bool(self.shared)),
        ];
        if let Some(fpic) = self.fpic {
            entries.push(("fPIC", OptionValue::Bool(fpic)));
        }
        entries.extend([
            ("build_deprecated", OptionValue::Bool(self.build_deprecated)),
            ("with_interconnect", OptionValue::Bool(self.with_interconnect)),
            (
                "with_pluginmanager",
                OptionValue::Bool(self.with_pluginmanager),
            ),
            ("with_rc", OptionValue::Bool(self.with_rc)),
            ("with_testsuite", OptionValue::Bool(self.with_testsuite)),
            ("with_utility", OptionValue::Bool(self.with_utility)),
        ]);
        entries
    }
}

/// strtobool-style flag parser for environment toggles
fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value).unwrap_or(false),
        Err(_) => false,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" => Some(true),
        "0" | "false" | "no" | "off" | "n" | "" => Some(false),
        _ => None,
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, RecipeError> {
    parse_flag(value).ok_or_else(|| RecipeError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        expected: "a boolean (true/false, yes/no, on/off, 1/0)".to_string(),
    })
}
