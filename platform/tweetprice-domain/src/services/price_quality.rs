use crate::value_objects::price_bar::PriceBar;
use serde::Serialize;

pub const ONE_MINUTE_SECONDS: i64 = 60;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PriceQualityReport {
    pub rows: usize,
    pub duplicates: usize,
    pub gaps: usize,
    pub missing_bars: usize,
    pub out_of_order: usize,
    /// Bars whose timestamp is not a whole second and so can never match an anchor.
    pub sub_second: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub first_gap: Option<i64>,
    pub first_duplicate: Option<i64>,
    pub first_out_of_order: Option<i64>,
    pub max_gap_seconds: Option<i64>,
}

impl PriceQualityReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0 && self.out_of_order == 0 && self.sub_second == 0
    }
}

/// Scans price bars (in table order) for duplicates, reordering and gaps
/// larger than `expected_step_seconds`. Timestamps in the report are seconds.
pub fn price_quality_report(bars: &[PriceBar], expected_step_seconds: i64) -> PriceQualityReport {
    let mut report = PriceQualityReport {
        rows: bars.len(),
        ..PriceQualityReport::default()
    };
    let step = expected_step_seconds.max(1);

    let mut last_ts: Option<i64> = None;
    let mut max_gap: Option<i64> = None;

    for bar in bars {
        if bar.timestamp_seconds().is_none() {
            report.sub_second += 1;
        }
        let ts = bar.timestamp_ms.div_euclid(1000);
        if report.first_timestamp.is_none() {
            report.first_timestamp = Some(ts);
        }

        if let Some(prev) = last_ts {
            if ts == prev {
                report.duplicates += 1;
                if report.first_duplicate.is_none() {
                    report.first_duplicate = Some(ts);
                }
            } else if ts < prev {
                report.out_of_order += 1;
                if report.first_out_of_order.is_none() {
                    report.first_out_of_order = Some(ts);
                }
            } else {
                let diff = ts - prev;
                if diff > step {
                    report.gaps += 1;
                    report.missing_bars += ((diff - 1) / step) as usize;
                    if report.first_gap.is_none() {
                        report.first_gap = Some(ts);
                    }
                    max_gap = Some(max_gap.map_or(diff, |current| current.max(diff)));
                }
            }
        }

        last_ts = Some(ts);
        report.last_timestamp = Some(ts);
    }

    report.max_gap_seconds = max_gap;
    report
}
