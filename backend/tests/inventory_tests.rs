//! Inventory tests
//!
//! Covers the derived-stock contract:
//! - available stock = instock minus the consumption sum
//! - consumption is rejected when it exceeds available stock
//! - receive merges on the (name, make, model, category) tuple

use proptest::prelude::*;
use shared::models::{available_stock, can_consume, product_status};
use shared::types::StockStatus;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_available_stock_derivation() {
        assert_eq!(available_stock(10, 0), 10);
        assert_eq!(available_stock(10, 7), 3);
        assert_eq!(available_stock(10, 10), 0);
    }

    #[test]
    fn test_consume_within_available() {
        let available = available_stock(10, 0);
        assert!(can_consume(available, 7));
    }

    #[test]
    fn test_consume_rejected_beyond_available() {
        // after consuming 7 of 10, only 3 remain
        let available = available_stock(10, 7);
        assert!(!can_consume(available, 4));
        assert!(can_consume(available, 3));
    }

    #[test]
    fn test_consume_rejects_non_positive_quantity() {
        assert!(!can_consume(10, 0));
        assert!(!can_consume(10, -5));
    }

    /// Category min_stock 5, receive 10, consume 7, then try to consume 4.
    #[test]
    fn test_sensors_gyro_scenario() {
        let instock = 10;
        let min_stock = 5;
        let mut consumed = 0;

        assert_eq!(available_stock(instock, consumed), 10);
        assert_eq!(product_status(instock, consumed, min_stock), StockStatus::Available);

        // consume 7
        assert!(can_consume(available_stock(instock, consumed), 7));
        consumed += 7;
        assert_eq!(available_stock(instock, consumed), 3);
        assert_eq!(product_status(instock, consumed, min_stock), StockStatus::LowStock);

        // consume 4 must fail and leave state unchanged
        assert!(!can_consume(available_stock(instock, consumed), 4));
        assert_eq!(available_stock(instock, consumed), 3);
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(product_status(10, 10, 5), StockStatus::OutOfStock);
        assert_eq!(product_status(10, 5, 5), StockStatus::LowStock);
        assert_eq!(product_status(10, 4, 5), StockStatus::Available);
    }
}

// ============================================================================
// Receive-merge simulation
// ============================================================================

#[cfg(test)]
mod merge_tests {
    /// Composite product identity used by receive
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct ProductKey {
        name: String,
        make: String,
        model: String,
        category: &'static str,
    }

    #[derive(Debug, Default)]
    struct ProductState {
        instock: i64,
        opening_stock: i64,
        allocations: Vec<(&'static str, i64)>,
    }

    /// Mirrors the receive merge-or-create rule: same tuple merges,
    /// allocations merge per location.
    fn receive(
        products: &mut std::collections::HashMap<ProductKey, ProductState>,
        key: ProductKey,
        location: &'static str,
        quantity: i64,
    ) {
        let entry = products.entry(key).or_insert_with(|| ProductState {
            instock: 0,
            opening_stock: quantity,
            allocations: Vec::new(),
        });
        entry.instock += quantity;
        match entry.allocations.iter_mut().find(|(l, _)| *l == location) {
            Some((_, q)) => *q += quantity,
            None => entry.allocations.push((location, quantity)),
        }
    }

    fn key(name: &str) -> ProductKey {
        ProductKey {
            name: name.to_string(),
            make: "ABC".to_string(),
            model: "X1".to_string(),
            category: "Sensors",
        }
    }

    #[test]
    fn test_double_receive_same_tuple_merges() {
        let mut products = std::collections::HashMap::new();
        receive(&mut products, key("Gyro"), "Lab1", 10);
        receive(&mut products, key("Gyro"), "Lab1", 5);

        assert_eq!(products.len(), 1);
        let state = &products[&key("Gyro")];
        assert_eq!(state.instock, 15);
        assert_eq!(state.opening_stock, 10);
        assert_eq!(state.allocations, vec![("Lab1", 15)]);
    }

    #[test]
    fn test_double_receive_different_location_splits_allocation() {
        let mut products = std::collections::HashMap::new();
        receive(&mut products, key("Gyro"), "Lab1", 10);
        receive(&mut products, key("Gyro"), "Lab2", 5);

        let state = &products[&key("Gyro")];
        assert_eq!(state.instock, 15);
        assert_eq!(state.allocations, vec![("Lab1", 10), ("Lab2", 5)]);
    }

    #[test]
    fn test_receive_different_tuple_creates_new_product() {
        let mut products = std::collections::HashMap::new();
        receive(&mut products, key("Gyro"), "Lab1", 10);
        let mut other = key("Gyro");
        other.model = "X2".to_string();
        receive(&mut products, other, "Lab1", 5);

        assert_eq!(products.len(), 2);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = i64> {
        1i64..=10_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// After a permitted consumption of q, available stock drops by
        /// exactly q.
        #[test]
        fn prop_consume_reduces_available_by_quantity(
            instock in quantity_strategy(),
            already_consumed in 0i64..=10_000,
            q in quantity_strategy()
        ) {
            let before = available_stock(instock, already_consumed);
            if can_consume(before, q) {
                let after = available_stock(instock, already_consumed + q);
                prop_assert_eq!(before - after, q);
            }
        }

        /// A consumption exceeding available stock is always rejected.
        #[test]
        fn prop_overdraw_rejected(
            instock in quantity_strategy(),
            consumed in 0i64..=10_000,
            extra in quantity_strategy()
        ) {
            let available = available_stock(instock, consumed);
            let q = available.max(0) + extra;
            prop_assert!(!can_consume(available, q));
        }

        /// Available stock never goes negative through permitted
        /// consumptions.
        #[test]
        fn prop_available_never_negative(
            instock in quantity_strategy(),
            requests in prop::collection::vec(quantity_strategy(), 1..20)
        ) {
            let mut consumed = 0i64;
            for q in requests {
                let available = available_stock(instock, consumed);
                if can_consume(available, q) {
                    consumed += q;
                }
            }
            prop_assert!(available_stock(instock, consumed) >= 0);
        }

        /// Status derivation is consistent with the available amount.
        #[test]
        fn prop_status_matches_available(
            instock in quantity_strategy(),
            consumed in 0i64..=20_000,
            min_stock in 0i64..=1_000
        ) {
            let available = available_stock(instock, consumed);
            let status = product_status(instock, consumed, min_stock);
            match status {
                StockStatus::OutOfStock => prop_assert!(available <= 0),
                StockStatus::LowStock => {
                    prop_assert!(available > 0 && available <= min_stock)
                }
                StockStatus::Available => prop_assert!(available > min_stock),
            }
        }

        /// However receipts are split across locations, the per-location
        /// allocations always sum to the merged instock total.
        #[test]
        fn prop_allocations_conserve_instock(
            receipts in prop::collection::vec(
                (quantity_strategy(), 0usize..4),
                1..20
            )
        ) {
            let mut instock = 0i64;
            let mut allocations = std::collections::HashMap::new();
            for (quantity, location) in receipts {
                instock += quantity;
                *allocations.entry(location).or_insert(0i64) += quantity;
            }
            let allocated: i64 = allocations.values().sum();
            prop_assert_eq!(instock, allocated);
        }
    }
}
