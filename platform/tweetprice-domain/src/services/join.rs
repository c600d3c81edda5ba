use crate::errors::JoinError;
use crate::services::assembler::{assemble, AssembleOptions};
use crate::services::normalizer::{normalize_posts, normalize_prices};
use crate::services::price_index::PriceIndex;
use crate::services::price_quality::{price_quality_report, PriceQualityReport, ONE_MINUTE_SECONDS};
use crate::services::resolver::IntervalResolver;
use crate::value_objects::joined::JoinedTable;
use crate::value_objects::options::JoinOptions;
use crate::value_objects::raw_table::RawTable;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinProgress {
    pub resolved: usize,
    pub total: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinStats {
    pub price_rows: usize,
    pub indexed_seconds: usize,
    pub first_indexed_second: Option<i64>,
    pub last_indexed_second: Option<i64>,
    pub posts_in: usize,
    pub posts_selected: usize,
    pub rows_complete: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub table: JoinedTable,
    pub stats: JoinStats,
    pub price_quality: PriceQualityReport,
}

pub fn join_tables(
    prices: &RawTable,
    posts: &RawTable,
    options: &JoinOptions,
) -> Result<JoinOutcome, JoinError> {
    join_tables_with_progress(prices, posts, options, |_| {})
}

/// Runs normalize -> resolve -> assemble. `on_progress` is called after each
/// post is resolved and has no influence on the result.
pub fn join_tables_with_progress<F>(
    prices: &RawTable,
    posts: &RawTable,
    options: &JoinOptions,
    mut on_progress: F,
) -> Result<JoinOutcome, JoinError>
where
    F: FnMut(JoinProgress),
{
    options.validate()?;

    let bars = normalize_prices(prices)?;
    let price_quality = price_quality_report(&bars, ONE_MINUTE_SECONDS);
    let post_table = normalize_posts(posts, &options.post_filter)?;
    let post_headers = post_table.headers();

    let resolver = IntervalResolver::new(
        PriceIndex::build(&bars, options.price_field),
        options.intervals,
        options.timezone,
    );

    let total = post_table.len();
    let started = Instant::now();
    let mut resolved = Vec::with_capacity(total);
    for post in post_table.posts {
        let row_prices = resolver.resolve(&post)?;
        resolved.push((post, row_prices));
        on_progress(JoinProgress {
            resolved: resolved.len(),
            total,
            elapsed: started.elapsed(),
        });
    }

    let table = assemble(
        post_headers,
        resolved,
        &options.intervals,
        AssembleOptions {
            compute_percentage: options.compute_percentage,
            sort_by_percentage: options.sort_by_percentage,
            ascending: options.ascending,
        },
    );

    let stats = JoinStats {
        price_rows: bars.len(),
        indexed_seconds: resolver.index().len(),
        first_indexed_second: resolver.index().first_second(),
        last_indexed_second: resolver.index().last_second(),
        posts_in: posts.len(),
        posts_selected: total,
        rows_complete: table.len(),
        rows_dropped: total - table.len(),
    };

    Ok(JoinOutcome {
        table,
        stats,
        price_quality,
    })
}
