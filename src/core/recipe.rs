//! Recipe (recipe.toml) parsing
//!
//! The recipe is the declarative description of one package: identity
//! metadata, where upstream source lives, which files of the fetched tree
//! must be pruned or swapped out, and the hand-authored link order of the
//! libraries the build produces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::options::Configuration;
use crate::error::RecipeError;

/// A single build recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Package identity
    pub package: PackageMeta,

    /// Source fetch and transformation rules
    pub source: SourceSpec,

    /// Default option values (overridable by the caller)
    #[serde(default)]
    pub options: Configuration,

    /// Link order metadata
    pub link: LinkSpec,
}

/// Package identity metadata
///
/// Carries no behavior; consumed by downstream packaging tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageMeta {
    /// Package name
    pub name: String,

    /// Exact upstream version (used as the clone ref)
    pub version: String,

    /// Upstream git repository URL
    pub repository: String,

    /// Package description
    #[serde(default)]
    pub description: Option<String>,

    /// SPDX license identifier
    pub license: String,

    /// License file name within the source tree
    #[serde(default = "default_license_file")]
    pub license_file: String,

    /// Package homepage
    #[serde(default)]
    pub homepage: Option<String>,

    /// Search keywords
    #[serde(default)]
    pub topics: Vec<String>,
}

fn default_license_file() -> String {
    "COPYING".to_string()
}

/// Source preparation rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceSpec {
    /// Entries removed from the fetched tree before the merge-copy.
    /// The upstream tree may re-include this recipe's own packaging
    /// artifacts; pruning them keeps the recipe's copies authoritative.
    #[serde(default)]
    pub prune: Vec<PathBuf>,

    /// File swaps applied after the merge-copy
    #[serde(default, rename = "substitute")]
    pub substitutions: Vec<Substitution>,
}

/// One unconditional file-name-addressed swap: the upstream `target` is
/// moved aside to `backup` and `replacement` takes its place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Substitution {
    /// Upstream file to displace, relative to the project directory
    pub target: PathBuf,

    /// Where the upstream file is moved to
    pub backup: PathBuf,

    /// The recipe's replacement file
    pub replacement: PathBuf,
}

/// Link order metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkSpec {
    /// Canonical library names, most-depended-upon first
    pub priority: Vec<String>,
}

impl Recipe {
    /// Parse a recipe from TOML content
    pub fn from_toml(content: &str) -> Result<Self, RecipeError> {
        toml::from_str(content).map_err(|source| RecipeError::Parse { source })
    }

    /// Load a recipe from a file
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        if !path.exists() {
            return Err(RecipeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| RecipeError::ReadFailed {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Serialize the recipe back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
