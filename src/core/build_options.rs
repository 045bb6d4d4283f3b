//! Configuration to CMake definition translation
//!
//! Fixed name-and-value transform: option names are uppercased, booleans
//! become ON/OFF, strings pass through, plus a handful of hard-coded
//! platform-derived definitions.

use std::collections::BTreeMap;

use crate::core::options::{Configuration, OptionValue};
use crate::core::platform::{CompilerFamily, PlatformSettings};

fn marker(enabled: bool) -> String {
    if enabled { "ON" } else { "OFF" }.to_string()
}

/// Translate a validated configuration into the CMake definition map
pub fn definitions(
    config: &Configuration,
    platform: &PlatformSettings,
) -> BTreeMap<String, String> {
    let mut defs = BTreeMap::new();

    for (name, value) in config.entries() {
        let value = match value {
            OptionValue::Bool(b) => marker(b),
            OptionValue::Str(s) => s,
        };
        defs.insert(name.to_uppercase(), value);
    }

    // The upstream build suffixes the install lib dir (e.g. "64") unless
    // told otherwise; the package layout expects plain "lib"
    defs.insert("LIB_SUFFIX".to_string(), String::new());

    defs.insert("BUILD_STATIC".to_string(), marker(!config.shared));

    defs.insert(
        "CMAKE_BUILD_TYPE".to_string(),
        platform.build_type.as_cmake().to_string(),
    );

    defs.insert(
        "COMPILE_WITH_LLVM_TOOLS".to_string(),
        marker(config.compile_with_llvm_tools),
    );

    if platform.compiler.family == CompilerFamily::Msvc {
        defs.insert(
            "MSVC2015_COMPATIBILITY".to_string(),
            marker(platform.compiler.version == 14),
        );
        defs.insert(
            "MSVC2017_COMPATIBILITY".to_string(),
            marker(platform.compiler.version == 17),
        );
    }

    defs
}
