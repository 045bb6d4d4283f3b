//! Build-time tool requirement resolution
//!
//! Given a validated configuration, produces the set of auxiliary tools to
//! acquire before the build. Pure function of the configuration; consumers
//! only care about membership, not order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::options::Configuration;

/// One auxiliary build-time tool requirement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolRequirement {
    /// Tool name
    pub name: String,
    /// Channel reference the tool is acquired from
    pub reference: String,
}

impl ToolRequirement {
    fn stable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            reference: format!("{name}/master@conan/stable"),
        }
    }
}

impl fmt::Display for ToolRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}

/// Resolve the build-time tool requirements for a configuration
pub fn resolve(config: &Configuration) -> BTreeSet<ToolRequirement> {
    let mut requirements = BTreeSet::new();

    // Baseline platform-detection and build-helper tools, always needed
    requirements.insert(ToolRequirement::stable("cmake_platform_detection"));
    requirements.insert(ToolRequirement::stable("cmake_build_options"));
    requirements.insert(ToolRequirement::stable("cmake_helper_utils"));

    if config.sanitizers_enabled() {
        requirements.insert(ToolRequirement::stable("cmake_sanitizers"));
    }

    // Provides clang-tidy, clang-format, IWYU, scan-build, etc.
    if config.llvm_tools {
        requirements.insert(ToolRequirement::stable("llvm_tools"));
    }

    requirements
}
