//! Library link ordering
//!
//! Post-build, the recipe's hand-authored priority list (most-depended-upon
//! first) is matched against the artifacts the build actually produced to
//! yield the final link order. Libraries the priority list does not know
//! about are silently dropped; that is deliberate, the priority list is the
//! authority on what gets linked.

/// Order discovered libraries by a priority list.
///
/// `suffix` is appended to every priority entry before matching (e.g. the
/// `-d` decoration of debug builds), so an unsuffixed artifact of the same
/// base name will not match. With `reverse` the final sequence is reversed,
/// for linkers that consume dependencies least-depended-first.
///
/// Pure: no I/O, never fails; absent libraries are omitted, not an error.
pub fn sort_libs(
    priority: &[String],
    discovered: &[String],
    suffix: &str,
    reverse: bool,
) -> Vec<String> {
    let mut result = Vec::new();

    for expected in priority {
        let expected = format!("{expected}{suffix}");
        for lib in discovered {
            if *lib == expected {
                result.push(lib.clone());
            }
        }
    }

    if reverse {
        result.reverse();
    }

    result
}

/// Strip the platform library decoration from a file name, yielding the
/// base artifact name (`libCorradeUtility.a` -> `CorradeUtility`).
///
/// Returns None for files that are not libraries.
pub fn artifact_base_name(file_name: &str) -> Option<String> {
    let stem = file_name
        .strip_suffix(".a")
        .or_else(|| file_name.strip_suffix(".so"))
        .or_else(|| file_name.strip_suffix(".lib"))
        .or_else(|| file_name.strip_suffix(".dylib"))
        .or_else(|| file_name.strip_suffix(".dll"))?;
    let base = stem.strip_prefix("lib").unwrap_or(stem);
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_orders_by_priority_rank() {
        let result = sort_libs(&strings(&["A", "B", "C"]), &strings(&["C", "A"]), "", false);
        assert_eq!(result, strings(&["A", "C"]));
    }

    #[test]
    fn test_reverse_flips_the_result() {
        let result = sort_libs(&strings(&["A", "B", "C"]), &strings(&["C", "A"]), "", true);
        assert_eq!(result, strings(&["C", "A"]));
    }

    #[test]
    fn test_suffix_must_match_exactly() {
        let priority = strings(&["CorradeUtility", "CorradeContainers"]);
        let discovered = strings(&["CorradeUtility-d", "CorradeContainers"]);
        let result = sort_libs(&priority, &discovered, "-d", false);
        // The unsuffixed CorradeContainers does not match
        assert_eq!(result, strings(&["CorradeUtility-d"]));
    }

    #[test]
    fn test_unknown_libraries_are_silently_dropped() {
        let result = sort_libs(
            &strings(&["A", "B"]),
            &strings(&["B", "Mystery", "A"]),
            "",
            false,
        );
        assert_eq!(result, strings(&["A", "B"]));
    }

    #[test]
    fn test_duplicates_are_emitted_per_occurrence() {
        let result = sort_libs(&strings(&["A"]), &strings(&["A", "A"]), "", false);
        assert_eq!(result, strings(&["A", "A"]));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(sort_libs(&[], &strings(&["A"]), "", false).is_empty());
        assert!(sort_libs(&strings(&["A"]), &[], "", false).is_empty());
    }

    #[test]
    fn test_artifact_base_name_strips_decoration() {
        assert_eq!(
            artifact_base_name("libCorradeUtility.a"),
            Some("CorradeUtility".to_string())
        );
        assert_eq!(
            artifact_base_name("CorradeUtility.lib"),
            Some("CorradeUtility".to_string())
        );
        assert_eq!(
            artifact_base_name("libCorradeUtility-d.so"),
            Some("CorradeUtility-d".to_string())
        );
        assert_eq!(artifact_base_name("README.md"), None);
        assert_eq!(artifact_base_name("lib.a"), None);
    }

    proptest! {
        /// The output only ever contains names from the priority list
        /// (with the suffix applied).
        #[test]
        fn prop_output_is_subset_of_priority(
            priority in proptest::collection::vec("[A-Z][a-z]{0,8}", 0..6),
            discovered in proptest::collection::vec("[A-Za-z-]{1,10}", 0..10),
            reverse: bool,
        ) {
            let result = sort_libs(&priority, &discovered, "", reverse);
            for lib in &result {
                prop_assert!(priority.contains(lib));
                prop_assert!(discovered.contains(lib));
            }
        }

        /// Reversing twice round-trips.
        #[test]
        fn prop_reverse_is_exact_reversal(
            priority in proptest::collection::vec("[A-Z][a-z]{0,8}", 0..6),
            discovered in proptest::collection::vec("[A-Za-z-]{1,10}", 0..10),
        ) {
            let forward = sort_libs(&priority, &discovered, "", false);
            let mut reversed = sort_libs(&priority, &discovered, "", true);
            reversed.reverse();
            prop_assert_eq!(forward, reversed);
        }
    }
}
