use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tweetprice_domain::value_objects::options::PctSort;
use tweetprice_domain::value_objects::price_bar::PriceField;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub run: RunConfig,
    pub inputs: InputsConfig,
    pub posts: Option<PostsConfig>,
    pub join: Option<JoinConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub run_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    pub price_path: String,
    pub price_has_headers: Option<bool>,
    pub posts_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PostsConfig {
    pub date_column: Option<String>,
    pub time_column: Option<String>,
    pub text_column: Option<String>,
    pub extra_columns: Option<Vec<String>>,
    pub min_engagement: Option<f64>,
    pub engagement_column: Option<String>,
    pub keyword_pattern: Option<String>,
    pub sort_by_engagement: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct JoinConfig {
    pub intervals: Option<Vec<String>>,
    pub price_field: Option<PriceField>,
    pub timezone: Option<String>,
    pub compute_percentage: Option<bool>,
    pub sort_by_percentage: Option<PctSort>,
    pub ascending: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub out_dir: Option<String>,
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn out_dir(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|output| output.out_dir.as_deref())
            .unwrap_or("runs/")
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.format)
            .unwrap_or_default()
    }
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}
