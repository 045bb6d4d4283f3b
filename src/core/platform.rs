//! Target platform settings
//!
//! Operating system, CPU architecture, compiler identity and build mode.
//! Supplied by the caller, read-only for the rest of the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Windows,
    Macos,
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::Macos => write!(f, "macos"),
        }
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::Macos),
            other => Err(format!("unknown os '{other}' (linux, windows, macos)")),
        }
    }
}

impl TargetOs {
    /// Detect the host operating system
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Linux
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gcc => write!(f, "gcc"),
            Self::Clang => write!(f, "clang"),
            Self::AppleClang => write!(f, "apple-clang"),
            Self::Msvc => write!(f, "msvc"),
        }
    }
}

impl FromStr for CompilerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" | "appleclang" => Ok(Self::AppleClang),
            "msvc" | "visual-studio" => Ok(Self::Msvc),
            other => Err(format!(
                "unknown compiler '{other}' (gcc, clang, apple-clang, msvc)"
            )),
        }
    }
}

/// Compiler identity: family plus major version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub version: u32,
}

impl Compiler {
    pub fn new(family: CompilerFamily, version: u32) -> Self {
        Self { family, version }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

/// Build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// CMake's name for this build type
    pub fn as_cmake(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cmake())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            other => Err(format!(
                "unknown build type '{other}' (Debug, Release, RelWithDebInfo, MinSizeRel)"
            )),
        }
    }
}

/// Platform settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// Target operating system
    pub os: TargetOs,
    /// CPU architecture (e.g. "x86_64", "armv8")
    pub arch: String,
    /// Compiler identity
    pub compiler: Compiler,
    /// Build mode
    pub build_type: BuildType,
}

impl PlatformSettings {
    pub fn new(os: TargetOs, arch: &str, compiler: Compiler, build_type: BuildType) -> Self {
        Self {
            os,
            arch: arch.to_string(),
            compiler,
            build_type,
        }
    }
}
