use serde::Serialize;

/// Unix seconds of the five anchors of one post. Derived anchors are `None`
/// when their local wall-clock time does not exist in the configured zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorTimestamps {
    pub day_start: Option<i64>,
    pub post_time: i64,
    pub short_after: Option<i64>,
    pub hour_after: Option<i64>,
    pub day_end: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResolvedPrices {
    pub day_start: Option<f64>,
    pub post_time: Option<f64>,
    pub short_after: Option<f64>,
    pub hour_after: Option<f64>,
    pub day_end: Option<f64>,
}

impl ResolvedPrices {
    pub fn values(&self) -> [Option<f64>; 5] {
        [
            self.day_start,
            self.post_time,
            self.short_after,
            self.hour_after,
            self.day_end,
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.values().iter().all(Option::is_some)
    }
}

/// Percentage changes, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceChanges {
    pub short_pct: Option<f64>,
    pub hour_pct: Option<f64>,
    pub day_pct: Option<f64>,
}

impl PriceChanges {
    pub fn values(&self) -> [Option<f64>; 3] {
        [self.short_pct, self.hour_pct, self.day_pct]
    }

    pub fn is_complete(&self) -> bool {
        self.values().iter().all(Option::is_some)
    }
}
