use crate::config::Config;
use crate::joining::log_price_quality;
use crate::shared::{posts_query, price_query, resolve_join_options};
use std::time::Instant;
use tracing::info_span;
use tweetprice_domain::repositories::tables::TableSource;
use tweetprice_domain::services::normalizer::{normalize_posts, normalize_prices};
use tweetprice_domain::services::price_index::PriceIndex;
use tweetprice_domain::services::price_quality::{price_quality_report, ONE_MINUTE_SECONDS};
use tweetprice_domain::services::resolver::IntervalResolver;
use tweetprice_domain::value_objects::post::PostFilter;

/// Checks that both inputs can be joined with the configured options and
/// reports price-table quality. In strict mode duplicates, reordering,
/// sub-second bars or malformed post timestamps are errors.
pub fn validate(
    config: &Config,
    strict: bool,
    tables: &dyn TableSource,
) -> Result<serde_json::Value, String> {
    let _span = info_span!("validate_inputs", strict = strict, run_id = %config.run.run_id).entered();

    let stage_start = Instant::now();
    let options = resolve_join_options(config)?;
    let price_table = tables.load_table(&price_query(config))?;
    let post_table = tables.load_table(&posts_query(config))?;

    let bars = normalize_prices(&price_table).map_err(|err| err.to_string())?;
    let price_report = price_quality_report(&bars, ONE_MINUTE_SECONDS);
    log_price_quality(&price_report);

    // Every raw post is checked, not only the ones the filters keep.
    let unfiltered = PostFilter {
        min_engagement: None,
        keyword_pattern: None,
        sort_by_engagement: false,
        ..options.post_filter.clone()
    };
    let all_posts = normalize_posts(&post_table, &unfiltered).map_err(|err| err.to_string())?;
    let selected = normalize_posts(&post_table, &options.post_filter)
        .map_err(|err| err.to_string())?
        .len();

    let resolver = IntervalResolver::new(
        PriceIndex::build(&bars, options.price_field),
        options.intervals,
        options.timezone,
    );
    let mut malformed = 0usize;
    let mut first_malformed: Option<String> = None;
    let mut post_time_resolved = 0usize;
    for post in &all_posts.posts {
        match resolver.resolve(post) {
            Ok(prices) => {
                if prices.post_time.is_some() {
                    post_time_resolved += 1;
                }
            }
            Err(err) => {
                malformed += 1;
                if first_malformed.is_none() {
                    first_malformed = Some(err.to_string());
                }
            }
        }
    }
    metrics::histogram!("tweetprice.validate.ms").record(stage_start.elapsed().as_millis() as f64);

    let report = serde_json::json!({
        "run_id": config.run.run_id,
        "price": price_report,
        "indexed_seconds": resolver.index().len(),
        "posts": {
            "rows": all_posts.len(),
            "selected": selected,
            "malformed_timestamps": malformed,
            "first_malformed": first_malformed,
            "post_time_resolved": post_time_resolved,
        },
    });

    if strict && (!price_report.is_clean() || malformed > 0) {
        return Err(format!(
            "validation failed (strict): price duplicates={}, out_of_order={}, sub_second={}, malformed post timestamps={}",
            price_report.duplicates, price_report.out_of_order, price_report.sub_second, malformed
        ));
    }

    tracing::info!(
        price_rows = price_report.rows,
        posts = all_posts.len(),
        selected,
        malformed,
        "validation complete"
    );
    Ok(report)
}
