use std::path::PathBuf;
use tweetprice_application::config::Config;
use tweetprice_application::meta::engine_name;
use tweetprice_application::resolve_join_options;

pub(super) fn print_config_summary(
    command: &str,
    config: &Config,
    out: Option<&PathBuf>,
) -> Result<(), String> {
    let options = resolve_join_options(config)?;
    let filter = &options.post_filter;

    println!(
        "{} cli: {} (run_id={})",
        engine_name(),
        command,
        config.run.run_id
    );
    println!(
        "inputs: prices={} (headers={}), posts={}",
        config.inputs.price_path,
        config.inputs.price_has_headers.unwrap_or(false),
        config.inputs.posts_path
    );
    println!(
        "posts: columns={}/{}/{} extra={:?} min_engagement={} keyword={} sort_by_engagement={}",
        filter.columns.date,
        filter.columns.time,
        filter.columns.text,
        filter.extra_columns,
        filter
            .min_engagement
            .map(|v| format!("{v} ({})", filter.engagement_column))
            .unwrap_or_else(|| "none".to_string()),
        filter.keyword_pattern.as_deref().unwrap_or("none"),
        filter.sort_by_engagement
    );
    let [short, hour] = options.intervals.tokens();
    println!(
        "join: intervals={short},{hour} price_field={} timezone={} percentages={} sort={} ascending={}",
        options.price_field.label(),
        options.timezone.name(),
        options.compute_percentage,
        options
            .sort_by_percentage
            .map(|s| format!("{s:?}").to_lowercase())
            .unwrap_or_else(|| "none".to_string()),
        options.ascending
    );
    if let Some(out) = out {
        println!("output: out_dir={}", out.display());
    }
    Ok(())
}
