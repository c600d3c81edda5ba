use std::path::PathBuf;
use tweetprice_application::config::load_config_with_source;

pub(super) fn run_join(config_path: PathBuf, out: Option<PathBuf>) -> Result<(), String> {
    let (config, config_toml) = load_config_with_source(&config_path)?;
    let out_dir = out
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.out_dir()));
    super::common::print_config_summary("join", &config, Some(&out_dir))?;

    let crate::infra::JoinDeps { tables, artifacts } = crate::infra::build_join_deps();
    let run = tweetprice_application::joining::run_join(
        &config,
        &config_toml,
        out,
        tables.as_ref(),
        artifacts.as_ref(),
    )?;

    let stats = &run.report.stats;
    println!(
        "joined: posts_in={} selected={} complete={} dropped={}",
        stats.posts_in, stats.posts_selected, stats.rows_complete, stats.rows_dropped
    );
    println!("run dir: {}", run.run_dir.display());
    Ok(())
}
