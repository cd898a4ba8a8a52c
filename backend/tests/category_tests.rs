//! Category tests
//!
//! Covers make/model enumeration maintenance and the minimum-stock
//! cascade to products.

use proptest::prelude::*;
use shared::validation::{dedupe_preserving_order, push_unique, remove_value};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_add_make_is_idempotent() {
        let mut makes: Vec<String> = vec![];
        assert!(push_unique(&mut makes, "X".to_string()));
        assert!(!push_unique(&mut makes, "X".to_string()));
        assert_eq!(makes, vec!["X"]);
    }

    #[test]
    fn test_make_dedupe_is_case_sensitive() {
        let mut makes: Vec<String> = vec!["Bosch".to_string()];
        // different case is a different entry
        assert!(push_unique(&mut makes, "bosch".to_string()));
        assert_eq!(makes.len(), 2);
    }

    #[test]
    fn test_remove_make_filters_value() {
        let mut makes: Vec<String> = vec!["A".into(), "B".into(), "A".into()];
        assert!(remove_value(&mut makes, "A"));
        assert_eq!(makes, vec!["B"]);
    }

    #[test]
    fn test_remove_missing_make_is_noop() {
        let mut makes: Vec<String> = vec!["A".into()];
        assert!(!remove_value(&mut makes, "Z"));
        assert_eq!(makes, vec!["A"]);
    }

    #[test]
    fn test_create_input_lists_deduped() {
        let makes = dedupe_preserving_order(vec![
            "ABC".to_string(),
            "DEF".to_string(),
            "ABC".to_string(),
        ]);
        assert_eq!(makes, vec!["ABC", "DEF"]);
    }

    /// Simulation of the create-uniqueness rule: a second category with
    /// an existing name is rejected, but a different casing is a
    /// different name.
    #[test]
    fn test_duplicate_category_name_conflicts() {
        fn create(names: &mut Vec<String>, name: &str) -> Result<(), &'static str> {
            if names.iter().any(|n| n == name) {
                return Err("Category with this name already exists");
            }
            names.push(name.to_string());
            Ok(())
        }

        let mut names = Vec::new();
        assert!(create(&mut names, "Sensors").is_ok());
        assert!(create(&mut names, "Sensors").is_err());
        assert!(create(&mut names, "sensors").is_ok());
        assert_eq!(names, vec!["Sensors", "sensors"]);
    }

    /// Simulation of the min-stock cascade: every product under the
    /// category reports the new threshold after the update.
    #[test]
    fn test_min_stock_cascade() {
        let mut category_min_stock = 5i64;
        let mut products = vec![("Gyro", category_min_stock), ("Accel", category_min_stock)];

        category_min_stock = 20;
        for (_, min_stock) in products.iter_mut() {
            *min_stock = category_min_stock;
        }

        assert_eq!(category_min_stock, 20);
        assert!(products.iter().all(|(_, m)| *m == 20));
    }

    /// Category deletion removes every product referencing it.
    #[test]
    fn test_category_delete_cascades_to_products() {
        let mut products = vec![("Gyro", "Sensors"), ("Relay", "Switches")];
        products.retain(|(_, category)| *category != "Sensors");
        assert_eq!(products, vec![("Relay", "Switches")]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn entry_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9]{1,8}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Adding the same entry twice leaves exactly one occurrence.
        #[test]
        fn prop_push_unique_single_occurrence(
            mut list in prop::collection::vec(entry_strategy(), 0..10),
            value in entry_strategy()
        ) {
            push_unique(&mut list, value.clone());
            push_unique(&mut list, value.clone());
            let count = list.iter().filter(|v| **v == value).count();
            prop_assert_eq!(count, 1);
        }

        /// De-duplication never reorders surviving entries.
        #[test]
        fn prop_dedupe_preserves_relative_order(
            list in prop::collection::vec(entry_strategy(), 0..20)
        ) {
            let deduped = dedupe_preserving_order(list.clone());

            // no duplicates remain
            for (i, v) in deduped.iter().enumerate() {
                prop_assert!(!deduped[i + 1..].contains(v));
            }

            // surviving entries appear in first-occurrence order
            let indices: Vec<_> = deduped
                .iter()
                .map(|v| list.iter().position(|x| x == v).unwrap())
                .collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }

        /// After removal, the value is gone; after add, it is present.
        #[test]
        fn prop_add_then_remove_round_trip(
            mut list in prop::collection::vec(entry_strategy(), 0..10),
            value in entry_strategy()
        ) {
            push_unique(&mut list, value.clone());
            prop_assert!(list.contains(&value));
            remove_value(&mut list, &value);
            prop_assert!(!list.contains(&value));
        }
    }
}
