use crate::config::Config;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tweetprice_domain::repositories::tables::TableQuery;
use tweetprice_domain::value_objects::interval::IntervalSpec;
use tweetprice_domain::value_objects::options::{parse_timezone, JoinOptions};
use tweetprice_domain::value_objects::post::{PostColumns, PostFilter};

/// Maps the `[posts]` and `[join]` sections onto domain join options.
pub fn resolve_join_options(config: &Config) -> Result<JoinOptions, String> {
    let posts = config.posts.clone().unwrap_or_default();
    let join = config.join.clone().unwrap_or_default();
    let defaults = PostFilter::default();
    let ascending = join.ascending.unwrap_or(false);

    let columns = PostColumns {
        date: posts.date_column.unwrap_or(defaults.columns.date),
        time: posts.time_column.unwrap_or(defaults.columns.time),
        text: posts.text_column.unwrap_or(defaults.columns.text),
    };

    let intervals = IntervalSpec::from_tokens(join.intervals.as_deref().unwrap_or(&[]))
        .map_err(|err| format!("join.intervals: {err}"))?;
    let timezone = parse_timezone(join.timezone.as_deref().unwrap_or("UTC"))
        .map_err(|err| format!("join.timezone: {err}"))?;

    let options = JoinOptions {
        post_filter: PostFilter {
            columns,
            extra_columns: posts.extra_columns.unwrap_or_default(),
            min_engagement: posts.min_engagement,
            engagement_column: posts
                .engagement_column
                .unwrap_or(defaults.engagement_column),
            keyword_pattern: posts.keyword_pattern.filter(|p| !p.trim().is_empty()),
            sort_by_engagement: posts.sort_by_engagement.unwrap_or(false),
            ascending,
        },
        intervals,
        price_field: join.price_field.unwrap_or_default(),
        timezone,
        compute_percentage: join.compute_percentage.unwrap_or(false),
        sort_by_percentage: join.sort_by_percentage,
        ascending,
    };
    options.validate().map_err(|err| err.to_string())?;
    Ok(options)
}

pub fn price_query(config: &Config) -> TableQuery {
    TableQuery {
        path: PathBuf::from(&config.inputs.price_path),
        has_headers: config.inputs.price_has_headers.unwrap_or(false),
    }
}

pub fn posts_query(config: &Config) -> TableQuery {
    TableQuery {
        path: PathBuf::from(&config.inputs.posts_path),
        has_headers: true,
    }
}

/// `run_id` names the run directory under `out_dir`, so it must be a single
/// plain path component.
pub(crate) fn validate_run_id(run_id: &str) -> Result<(), String> {
    let mut components = Path::new(run_id).components();
    let single_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_name || run_id.contains(['/', '\\']) || run_id.contains("..") {
        return Err(format!(
            "run.run_id must be a plain directory name, got '{run_id}'"
        ));
    }
    Ok(())
}

pub fn config_fingerprint(config_toml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config_toml.as_bytes());
    let bytes = hasher.finalize();
    to_hex_short(&bytes[..], 12)
}

fn to_hex_short(bytes: &[u8], chars: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(chars);
    for b in bytes {
        for nibble in [b >> 4, b & 0x0f] {
            if out.len() >= chars {
                return out;
            }
            out.push(HEX[nibble as usize] as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{config_fingerprint, resolve_join_options, validate_run_id};
    use crate::config::Config;
    use tweetprice_domain::value_objects::interval::IntervalSpec;
    use tweetprice_domain::value_objects::options::PctSort;
    use tweetprice_domain::value_objects::price_bar::PriceField;

    fn config(extra: &str) -> Config {
        let toml_str = format!(
            "[run]\nrun_id = \"x\"\n\n[inputs]\nprice_path = \"p.csv\"\nposts_path = \"t.csv\"\n{extra}"
        );
        toml::from_str(&toml_str).expect("config")
    }

    #[test]
    fn defaults_follow_scraper_layout() {
        let options = resolve_join_options(&config("")).expect("options");
        assert_eq!(options.post_filter.columns.text, "tweet");
        assert_eq!(options.post_filter.engagement_column, "likes_count");
        assert_eq!(options.intervals, IntervalSpec::default());
        assert_eq!(options.price_field, PriceField::Open);
        assert_eq!(options.timezone.name(), "UTC");
        assert!(!options.compute_percentage);
    }

    #[test]
    fn maps_every_section() {
        let options = resolve_join_options(&config(
            r#"
[posts]
text_column = "text"
min_engagement = 10
keyword_pattern = "btc"
sort_by_engagement = true

[join]
intervals = ["5min", "2hr"]
timezone = "Europe/Istanbul"
compute_percentage = true
sort_by_percentage = "day"
ascending = true
"#,
        ))
        .expect("options");
        assert_eq!(options.post_filter.columns.text, "text");
        assert_eq!(options.post_filter.min_engagement, Some(10.0));
        assert!(options.post_filter.sort_by_engagement);
        assert!(options.post_filter.ascending);
        assert_eq!(options.intervals, IntervalSpec { minutes: 5, hours: 2 });
        assert_eq!(options.timezone.name(), "Europe/Istanbul");
        assert_eq!(options.sort_by_percentage, Some(PctSort::Day));
    }

    #[test]
    fn blank_keyword_pattern_disables_filter() {
        let options =
            resolve_join_options(&config("[posts]\nkeyword_pattern = \"  \"\n")).expect("options");
        assert_eq!(options.post_filter.keyword_pattern, None);
    }

    #[test]
    fn invalid_settings_are_reported_by_key() {
        let err = resolve_join_options(&config("[join]\nintervals = [\"10sec\"]\n")).unwrap_err();
        assert!(err.starts_with("join.intervals"), "{err}");

        let err = resolve_join_options(&config("[join]\ntimezone = \"Nowhere\"\n")).unwrap_err();
        assert!(err.starts_with("join.timezone"), "{err}");

        let err = resolve_join_options(&config("[posts]\nmin_engagement = nan\n")).unwrap_err();
        assert!(err.contains("min_engagement"), "{err}");

        let options = resolve_join_options(&config("[join]\nsort_by_percentage = \"min\"\n"))
            .expect("sort without percentages is accepted");
        assert!(!options.compute_percentage);
    }

    #[test]
    fn run_id_must_stay_inside_out_dir() {
        assert!(validate_run_id("btc_tweets_2021").is_ok());
        assert!(validate_run_id("v1.2").is_ok());
        for bad in ["", ".", "..", "../escape", "/tmp/abs", "a/b", "a\\b", "x..y"] {
            assert!(validate_run_id(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn fingerprint_is_short_and_stable() {
        let a = config_fingerprint("run_id = 1");
        assert_eq!(a.len(), 12);
        assert_eq!(a, config_fingerprint("run_id = 1"));
        assert_ne!(a, config_fingerprint("run_id = 2"));
    }
}
