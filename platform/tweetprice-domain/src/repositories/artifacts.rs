use crate::value_objects::joined::JoinedTable;
use std::path::Path;

pub trait JoinArtifactWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String>;
    fn write_joined_csv(&self, path: &Path, table: &JoinedTable) -> Result<(), String>;
    fn write_joined_json(&self, path: &Path, table: &JoinedTable) -> Result<(), String>;
    fn write_summary_json(&self, path: &Path, summary: &serde_json::Value) -> Result<(), String>;
    fn write_config_snapshot_toml(&self, path: &Path, contents: &str) -> Result<(), String>;
}
