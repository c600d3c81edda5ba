use crate::reporting;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tweetprice_domain::repositories::artifacts::JoinArtifactWriter;
use tweetprice_domain::value_objects::joined::JoinedTable;

#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemJoinWriter;

impl FilesystemJoinWriter {
    pub fn new() -> Self {
        Self
    }
}

fn record_write_metrics(kind: &'static str, start: Instant, result: &Result<(), String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "tweetprice.infra.artifacts.write.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("tweetprice.infra.artifacts.write_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
    if let Err(err) = result {
        tracing::error!(kind, error = %err, "artifact write failed");
    }
}

impl JoinArtifactWriter for FilesystemJoinWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String> {
        let start = Instant::now();
        let result = fs::create_dir_all(path)
            .map_err(|err| format!("failed to create dir {}: {}", path.display(), err));
        record_write_metrics("ensure_dir", start, &result);
        result
    }

    fn write_joined_csv(&self, path: &Path, table: &JoinedTable) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_joined_csv(path, table);
        record_write_metrics("joined_csv", start, &result);
        result
    }

    fn write_joined_json(&self, path: &Path, table: &JoinedTable) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_joined_json(path, table);
        record_write_metrics("joined_json", start, &result);
        result
    }

    fn write_summary_json(&self, path: &Path, summary: &serde_json::Value) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_summary_json(path, summary);
        record_write_metrics("summary_json", start, &result);
        result
    }

    fn write_config_snapshot_toml(&self, path: &Path, contents: &str) -> Result<(), String> {
        let start = Instant::now();
        let result = fs::write(path, contents)
            .map_err(|err| format!("failed to write config snapshot {}: {}", path.display(), err));
        record_write_metrics("config_snapshot", start, &result);
        result
    }
}
