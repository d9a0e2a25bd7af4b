//! Property-based tests for the generated-artifact rules.
//!
//! These tests use proptest to generate random file names and verify that
//! cleaning only ever touches names carrying the `.gen.` infix.

#[cfg(test)]
mod proptest_tests {
    use crate::clean::{clean_generated, is_generated_artifact};
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    proptest! {
        /// Property: names built as `<stem>.gen.<ext>` are always artifacts
        #[test]
        fn gen_infix_is_always_detected(stem in "[a-z_]{1,12}", ext in "[a-z]{1,4}") {
            let name = format!("{}.gen.{}", stem, ext);
            prop_assert!(is_generated_artifact(&name));
        }

        /// Property: names without the `.gen.` infix are never artifacts
        #[test]
        fn names_without_infix_are_kept(name in "[a-zA-Z0-9_.-]{1,24}") {
            prop_assume!(!name.contains(".gen."));
            prop_assert!(!is_generated_artifact(&name));
        }

        /// Property: after cleaning, exactly the non-generated files remain
        #[test]
        fn clean_leaves_exactly_hand_written_files(
            names in prop::collection::btree_set("[a-z]{1,6}(\\.gen)?\\.[a-z]{1,3}", 0..12)
        ) {
            let temp = TempDir::new().unwrap();
            for name in &names {
                fs::write(temp.path().join(name), "x").unwrap();
            }

            let report = clean_generated(temp.path());

            let remaining: BTreeSet<String> = fs::read_dir(temp.path())
                .unwrap()
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            let expected: BTreeSet<String> = names
                .iter()
                .filter(|name| !is_generated_artifact(name))
                .cloned()
                .collect();

            prop_assert!(report.is_complete());
            prop_assert_eq!(report.removed.len(), names.len() - expected.len());
            prop_assert_eq!(remaining, expected);
        }
    }
}
