use std::path::PathBuf;
use tweetprice_application::config::load_config_with_source;

pub(super) fn run_validate(
    config_path: PathBuf,
    strict: bool,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let (config, _config_toml) = load_config_with_source(&config_path)?;
    super::common::print_config_summary("validate", &config, None)?;

    let crate::infra::ValidateDeps { tables } = crate::infra::build_validate_deps();
    let report = tweetprice_application::validation::validate(&config, strict, tables.as_ref())?;

    let price = &report["price"];
    println!(
        "price report: rows={} duplicates={} out_of_order={} gaps={} missing_bars={}",
        price["rows"], price["duplicates"], price["out_of_order"], price["gaps"], price["missing_bars"]
    );
    let posts = &report["posts"];
    println!(
        "posts report: rows={} selected={} malformed_timestamps={} post_time_resolved={}",
        posts["rows"], posts["selected"], posts["malformed_timestamps"], posts["post_time_resolved"]
    );

    if let Some(out_path) = out {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report: {err}"))?;
        std::fs::write(&out_path, json)
            .map_err(|err| format!("failed to write report {}: {}", out_path.display(), err))?;
    }

    Ok(())
}
