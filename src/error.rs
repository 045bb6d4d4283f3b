//! Error types for buildsmith
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
///
/// All of these are detected before any network or build work begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Compiler is below the supported version floor
    #[error("{compiler} version {version} is not supported: version {minimum} or greater required")]
    UnsupportedToolchain {
        compiler: String,
        version: u32,
        minimum: u32,
    },

    /// Two options conflict with each other
    #[error("Option '{first}' is incompatible with '{second}': {reason}")]
    IncompatibleOptions {
        first: String,
        second: String,
        reason: String,
    },
}

/// Recipe manifest errors
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Recipe file not found
    #[error("Recipe not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Failed to read the recipe file
    #[error("Failed to read recipe '{path}': {error}")]
    ReadFailed { path: PathBuf, error: String },

    /// Recipe parse error
    #[error("Failed to parse recipe: {source}")]
    Parse { source: toml::de::Error },

    /// Unknown option name in an override
    #[error("Unknown option '{name}' (no such option in the recipe)")]
    UnknownOption { name: String },

    /// Option override value could not be parsed
    #[error("Invalid value '{value}' for option '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: String,
    },
}

/// Source preparation errors
///
/// Carries the name of the failing pipeline step. A failure leaves the
/// working tree in an inconsistent state; a re-run repairs it through the
/// same idempotent steps, there is no rollback.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A preparation step failed
    #[error("Source preparation failed at step '{step}': {error}")]
    StepFailed { step: String, error: String },
}

/// Git fetch errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Git executable not found
    #[error("git executable not found in PATH")]
    NotFound,

    /// Failed to clone repository
    #[error("Failed to clone '{url}' at '{reference}': {error}")]
    CloneFailed {
        url: String,
        reference: String,
        error: String,
    },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// External build tool errors
///
/// The tool's own diagnostics are propagated verbatim, never reinterpreted.
#[derive(Error, Debug)]
pub enum BuildToolError {
    /// CMake executable not found
    #[error("cmake executable not found in PATH")]
    NotFound,

    /// Configure step failed
    #[error("cmake configure failed: {stderr}")]
    ConfigureFailed { stderr: String },

    /// Build step failed
    #[error("cmake build failed: {stderr}")]
    BuildFailed { stderr: String },

    /// Install step failed
    #[error("cmake install failed: {stderr}")]
    InstallFailed { stderr: String },

    /// Failed to spawn the tool at all
    #[error("Failed to run '{command}': {error}")]
    SpawnFailed { command: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to rename file
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to read directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Top-level buildsmith error type
#[derive(Error, Debug)]
pub enum SmithError {
    /// Recipe error
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// Configuration rejected by the validator
    #[error("Configuration error: {0}")]
    Validation(#[from] crate::core::validate::ValidationFailure),

    /// Source preparation error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// External build tool error
    #[error("Build tool error: {0}")]
    BuildTool(#[from] BuildToolError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
