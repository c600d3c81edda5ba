use crate::value_objects::price_bar::{PriceBar, PriceField};
use std::collections::BTreeMap;

/// Unix second -> price, built once per join so each anchor lookup does not
/// rescan the price table.
#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    by_second: BTreeMap<i64, f64>,
}

impl PriceIndex {
    /// When several bars share a second, the first one in table order wins.
    pub fn build(bars: &[PriceBar], field: PriceField) -> Self {
        let mut by_second = BTreeMap::new();
        for bar in bars {
            if let Some(second) = bar.timestamp_seconds() {
                by_second.entry(second).or_insert_with(|| bar.price(field));
            }
        }
        Self { by_second }
    }

    /// Exact-second lookup with no nearest-minute or interpolated fallback: a
    /// second without a bar has no price.
    pub fn price_at(&self, second: i64) -> Option<f64> {
        self.by_second.get(&second).copied()
    }

    pub fn len(&self) -> usize {
        self.by_second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_second.is_empty()
    }

    pub fn first_second(&self) -> Option<i64> {
        self.by_second.keys().next().copied()
    }

    pub fn last_second(&self) -> Option<i64> {
        self.by_second.keys().next_back().copied()
    }
}
