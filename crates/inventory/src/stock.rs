//! Stock status classification.
//!
//! The same rule drives the per-row badge and the dashboard/alert counters,
//! so both always agree on which bucket a product is in.

use serde::{Deserialize, Serialize};

/// Tri-state stock level of a product relative to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Bajo,
    Medio,
    Suficiente,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Bajo => "bajo",
            StockStatus::Medio => "medio",
            StockStatus::Suficiente => "suficiente",
        }
    }

    /// Badge text shown next to a product.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Bajo => "Stock bajo",
            StockStatus::Medio => "Stock medio",
            StockStatus::Suficiente => "Stock suficiente",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a stock level. First matching rule wins:
///
/// 1. `stock <= min` is [`StockStatus::Bajo`]
/// 2. `stock >= max` is [`StockStatus::Suficiente`]
/// 3. anything else is [`StockStatus::Medio`]
///
/// Thresholds typed the wrong way round (`min >= max`) are not rejected here;
/// rule 1 simply takes precedence.
pub fn classify(stock: i64, min: i64, max: i64) -> StockStatus {
    if stock <= min {
        StockStatus::Bajo
    } else if stock >= max {
        StockStatus::Suficiente
    } else {
        StockStatus::Medio
    }
}

/// Anything carrying a stock level and its configured thresholds.
pub trait StockLevels {
    fn stock(&self) -> i64;
    fn min_stock(&self) -> i64;
    fn max_stock(&self) -> i64;

    fn stock_status(&self) -> StockStatus {
        classify(self.stock(), self.min_stock(), self.max_stock())
    }
}

/// Per-bucket counts over a set of products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub bajo: usize,
    pub medio: usize,
    pub suficiente: usize,
    pub total: usize,
}

impl StockSummary {
    pub fn from_items<T: StockLevels>(items: &[T]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            match item.stock_status() {
                StockStatus::Bajo => summary.bajo += 1,
                StockStatus::Medio => summary.medio += 1,
                StockStatus::Suficiente => summary.suficiente += 1,
            }
            summary.total += 1;
            summary
        })
    }

    pub fn count(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::Bajo => self.bajo,
            StockStatus::Medio => self.medio,
            StockStatus::Suficiente => self.suficiente,
        }
    }
}

/// Items currently at or below their minimum.
pub fn low_stock<T: StockLevels>(items: &[T]) -> Vec<&T> {
    items
        .iter()
        .filter(|item| item.stock_status() == StockStatus::Bajo)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Levels(i64, i64, i64);

    impl StockLevels for Levels {
        fn stock(&self) -> i64 {
            self.0
        }
        fn min_stock(&self) -> i64 {
            self.1
        }
        fn max_stock(&self) -> i64 {
            self.2
        }
    }

    #[test]
    fn classifies_documented_examples() {
        assert_eq!(classify(5, 10, 50), StockStatus::Bajo);
        assert_eq!(classify(30, 10, 50), StockStatus::Medio);
        assert_eq!(classify(50, 10, 50), StockStatus::Suficiente);
        assert_eq!(classify(5, 10, 5), StockStatus::Bajo);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(classify(10, 10, 50), StockStatus::Bajo);
        assert_eq!(classify(11, 10, 50), StockStatus::Medio);
        assert_eq!(classify(49, 10, 50), StockStatus::Medio);
        assert_eq!(classify(51, 10, 50), StockStatus::Suficiente);
        assert_eq!(classify(0, 0, 0), StockStatus::Bajo);
    }

    #[test]
    fn summary_buckets_sum_to_total_even_with_inverted_thresholds() {
        let items = vec![
            Levels(5, 10, 50),
            Levels(30, 10, 50),
            Levels(60, 10, 50),
            // min > max: both "low" and "sufficient" hold, counted once as low.
            Levels(5, 10, 5),
        ];
        let summary = StockSummary::from_items(&items);
        assert_eq!(
            summary,
            StockSummary { bajo: 2, medio: 1, suficiente: 1, total: 4 }
        );
        assert_eq!(summary.count(StockStatus::Bajo), 2);
        assert_eq!(low_stock(&items).len(), 2);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&StockStatus::Suficiente).unwrap(), "\"suficiente\"");
        assert_eq!(StockStatus::Medio.label(), "Stock medio");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: at or below the minimum is always low, whatever the maximum.
            #[test]
            fn at_or_below_min_is_always_low(
                min in 0i64..10_000,
                max in 0i64..10_000,
                below in 0i64..10_000,
            ) {
                let stock = min.saturating_sub(below).max(0);
                prop_assert_eq!(classify(stock, min, max), StockStatus::Bajo);
            }

            /// Property: above the minimum, the status only depends on the maximum.
            #[test]
            fn above_min_splits_on_max(
                min in 0i64..10_000,
                above in 1i64..10_000,
                max in 0i64..20_000,
            ) {
                let stock = min + above;
                let expected = if stock >= max { StockStatus::Suficiente } else { StockStatus::Medio };
                prop_assert_eq!(classify(stock, min, max), expected);
            }

            /// Property: summary buckets partition the input.
            #[test]
            fn summary_partitions_input(
                rows in proptest::collection::vec((0i64..200, 0i64..200, 0i64..200), 0..50)
            ) {
                let items: Vec<Levels> = rows.into_iter().map(|(s, lo, hi)| Levels(s, lo, hi)).collect();
                let summary = StockSummary::from_items(&items);
                prop_assert_eq!(summary.bajo + summary.medio + summary.suficiente, summary.total);
                prop_assert_eq!(summary.total, items.len());
            }
        }
    }
}
