use crate::config::{Config, OutputFormat};
use crate::meta::{engine_name, engine_version};
use crate::shared::{
    config_fingerprint, posts_query, price_query, resolve_join_options, validate_run_id,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info_span;
use tweetprice_domain::repositories::artifacts::JoinArtifactWriter;
use tweetprice_domain::repositories::tables::TableSource;
use tweetprice_domain::services::join::{join_tables_with_progress, JoinOutcome, JoinProgress, JoinStats};
use tweetprice_domain::services::price_quality::PriceQualityReport;
use tweetprice_domain::value_objects::joined::JoinedTable;

#[derive(Debug, Clone, Serialize)]
pub struct JoinReport {
    pub run_id: String,
    pub engine: String,
    pub version: String,
    pub config_hash: String,
    pub intervals: [String; 2],
    pub price_field: String,
    pub timezone: String,
    pub stats: JoinStats,
    pub price_quality: PriceQualityReport,
}

#[derive(Debug, Clone)]
pub struct JoinRun {
    pub run_dir: PathBuf,
    pub table: JoinedTable,
    pub report: JoinReport,
}

/// Loads both tables, joins them and writes `joined.{csv,json}`,
/// `summary.json` and `config_snapshot.toml` into `<out>/<run_id>/`.
pub fn run_join(
    config: &Config,
    config_toml: &str,
    out: Option<PathBuf>,
    tables: &dyn TableSource,
    artifacts: &dyn JoinArtifactWriter,
) -> Result<JoinRun, String> {
    let _span = info_span!("run_join", run_id = %config.run.run_id).entered();

    validate_run_id(&config.run.run_id)?;
    let options = resolve_join_options(config)?;

    let stage_start = Instant::now();
    let prices = tables.load_table(&price_query(config))?;
    let posts = tables.load_table(&posts_query(config))?;
    metrics::histogram!("tweetprice.join.load_tables_ms")
        .record(stage_start.elapsed().as_millis() as f64);
    tracing::info!(
        price_rows = prices.len(),
        post_rows = posts.len(),
        "input tables loaded"
    );

    let stage_start = Instant::now();
    let outcome = join_tables_with_progress(&prices, &posts, &options, log_estimate)
        .map_err(|err| format!("join failed: {err}"))?;
    let join_ms = stage_start.elapsed().as_millis() as f64;
    metrics::histogram!("tweetprice.join.resolve_ms").record(join_ms);
    record_outcome_metrics(&outcome);
    log_price_quality(&outcome.price_quality);
    tracing::info!(
        posts_selected = outcome.stats.posts_selected,
        rows_complete = outcome.stats.rows_complete,
        rows_dropped = outcome.stats.rows_dropped,
        first_indexed_second = ?outcome.stats.first_indexed_second,
        last_indexed_second = ?outcome.stats.last_indexed_second,
        join_ms,
        "join complete"
    );

    let report = JoinReport {
        run_id: config.run.run_id.clone(),
        engine: engine_name().to_string(),
        version: engine_version().to_string(),
        config_hash: config_fingerprint(config_toml),
        intervals: options.intervals.tokens(),
        price_field: options.price_field.label().to_string(),
        timezone: options.timezone.name().to_string(),
        stats: outcome.stats.clone(),
        price_quality: outcome.price_quality.clone(),
    };

    let run_dir = write_outputs(config, config_toml, out, &outcome.table, &report, artifacts)?;

    Ok(JoinRun {
        run_dir,
        table: outcome.table,
        report,
    })
}

fn log_estimate(progress: JoinProgress) {
    if progress.resolved == 1 && progress.total > 1 {
        let estimate = progress.elapsed.as_secs_f64() * progress.total as f64;
        tracing::info!(
            total_posts = progress.total,
            "estimated maximum time for resolving prices: {estimate:.2} seconds"
        );
    }
}

fn record_outcome_metrics(outcome: &JoinOutcome) {
    metrics::gauge!("tweetprice.join.price_rows").set(outcome.stats.price_rows as f64);
    metrics::gauge!("tweetprice.join.posts_selected").set(outcome.stats.posts_selected as f64);
    metrics::gauge!("tweetprice.join.rows_complete").set(outcome.stats.rows_complete as f64);
    metrics::counter!("tweetprice.join.rows_dropped_total")
        .increment(outcome.stats.rows_dropped as u64);
}

pub(crate) fn log_price_quality(report: &PriceQualityReport) {
    if report.duplicates > 0 || report.out_of_order > 0 {
        tracing::warn!(
            duplicates = report.duplicates,
            first_duplicate = ?report.first_duplicate,
            out_of_order = report.out_of_order,
            first_out_of_order = ?report.first_out_of_order,
            "price table is not strictly ascending; first bar per second is used"
        );
    }
    if report.sub_second > 0 {
        tracing::warn!(
            sub_second = report.sub_second,
            "price bars with sub-second timestamps can never match an anchor"
        );
    }
    if report.gaps > 0 {
        tracing::info!(
            gaps = report.gaps,
            missing_bars = report.missing_bars,
            first_gap = ?report.first_gap,
            max_gap_seconds = ?report.max_gap_seconds,
            "price table has gaps; anchors inside them stay unresolved"
        );
    }
}

fn write_outputs(
    config: &Config,
    config_toml: &str,
    out: Option<PathBuf>,
    table: &JoinedTable,
    report: &JoinReport,
    artifacts: &dyn JoinArtifactWriter,
) -> Result<PathBuf, String> {
    let base_dir = out.unwrap_or_else(|| PathBuf::from(config.out_dir()));
    let run_dir = base_dir.join(&config.run.run_id);
    artifacts.ensure_dir(&run_dir)?;

    match config.output_format() {
        OutputFormat::Csv => {
            artifacts.write_joined_csv(run_dir.join("joined.csv").as_path(), table)?
        }
        OutputFormat::Json => {
            artifacts.write_joined_json(run_dir.join("joined.json").as_path(), table)?
        }
    }

    let summary = serde_json::json!({
        "report": report,
        "config": config,
    });
    artifacts.write_summary_json(run_dir.join("summary.json").as_path(), &summary)?;
    artifacts
        .write_config_snapshot_toml(run_dir.join("config_snapshot.toml").as_path(), config_toml)?;

    Ok(run_dir)
}
