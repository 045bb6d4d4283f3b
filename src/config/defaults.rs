//! Default configuration values

/// History depth for the shallow source clone
pub const GIT_CLONE_DEPTH: u32 = 100;

/// Merge-copy overwrites only when the source is newer than the
/// destination by more than this many seconds (tolerates timestamp jitter)
pub const COPY_MTIME_EPSILON_SECS: u64 = 1;

/// Subdirectory the upstream source is fetched into
pub const DOWNLOAD_SUBFOLDER: &str = "downloads";

/// Subdirectory CMake configures and builds in
pub const BUILD_SUBFOLDER: &str = "build_subfolder";

/// Subdirectory the package license is copied into
pub const LICENSES_SUBFOLDER: &str = "licenses";

/// Version-control and build-cache names never copied by the merge-copy
pub const COPY_IGNORE_LIST: &[&str] = &[
    ".travis.yml",
    ".git",
    ".make",
    ".o",
    ".obj",
    ".marks",
    ".internal",
    "CMakeFiles",
    "CMakeCache",
];

/// Environment variable enabling installation of the llvm toolkit
pub const ENV_ENABLE_LLVM_TOOLS: &str = "ENABLE_LLVM_TOOLS";

/// Environment variable enabling compilation with the llvm toolkit
pub const ENV_COMPILE_WITH_LLVM_TOOLS: &str = "COMPILE_WITH_LLVM_TOOLS";

/// Library name suffix applied on Debug builds
pub const DEBUG_LIB_SUFFIX: &str = "-d";

/// Minimum supported Visual Studio compiler version
pub const MSVC_MINIMUM_VERSION: u32 = 14;
