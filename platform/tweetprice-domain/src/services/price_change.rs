use crate::value_objects::resolved::{PriceChanges, ResolvedPrices};

/// Percentage changes relative to the post-time price.
///
/// Without a post-time price nothing is computed. Otherwise a metric is
/// withheld when any term of its own formula is missing, so a half-resolved
/// day never produces a day change.
pub fn derive_price_changes(prices: &ResolvedPrices) -> PriceChanges {
    let Some(base) = prices.post_time.filter(|p| *p != 0.0) else {
        return PriceChanges::default();
    };

    PriceChanges {
        short_pct: prices.short_after.map(|p| pct(p - base, base)),
        hour_pct: prices.hour_after.map(|p| pct(p - base, base)),
        day_pct: prices
            .day_end
            .zip(prices.day_start)
            .map(|(end, start)| pct(end - start, base)),
    }
}

fn pct(delta: f64, base: f64) -> f64 {
    round2(delta / base * 100.0)
}

// Decimal formatting rounds exact ties to even (0.125 -> 0.12).
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
