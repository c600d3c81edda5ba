use serde::{Deserialize, Serialize};

/// One exchange kline, timestamp in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    /// Whole Unix second of this bar, `None` when the millisecond timestamp
    /// carries a sub-second remainder and so can never equal an anchor second.
    pub fn timestamp_seconds(&self) -> Option<i64> {
        (self.timestamp_ms.rem_euclid(1000) == 0).then(|| self.timestamp_ms.div_euclid(1000))
    }

    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

/// Which OHLC field is reported as "the price" at an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    #[default]
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    pub fn label(&self) -> &'static str {
        match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
        }
    }
}
