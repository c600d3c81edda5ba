use tweetprice_domain::errors::JoinError;
use tweetprice_domain::services::join::join_tables;
use tweetprice_domain::value_objects::interval::IntervalSpec;
use tweetprice_domain::value_objects::options::{JoinOptions, PctSort};
use tweetprice_domain::value_objects::post::{PostColumns, PostFilter};
use tweetprice_domain::value_objects::raw_table::RawTable;

const JAN_1_MS: i64 = 1_609_459_200_000;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// One bar per minute for two days, price = 1000 + minute index, minus `gaps`.
fn minute_prices(gaps: &[i64]) -> RawTable {
    let rows = (0..2 * 1440 + 120)
        .filter(|minute| !gaps.contains(minute))
        .map(|minute| {
            let ts = JAN_1_MS + minute * 60_000;
            let open = 1000 + minute;
            vec![
                ts.to_string(),
                open.to_string(),
                (open + 5).to_string(),
                (open - 5).to_string(),
                (open + 1).to_string(),
                "3.5".to_string(),
            ]
        })
        .collect();
    RawTable::new(strings(&["0", "1", "2", "3", "4", "5"]), rows)
}

fn tweets() -> RawTable {
    RawTable::new(
        strings(&["id", "date", "time", "tweet", "likes_count", "retweets_count"]),
        vec![
            strings(&["10", "2021-01-01", "00:00:05", "buy BTC now", "12", "1"]),
            strings(&["11", "2021-01-01", "06:30:59", "nothing to see", "900", "2"]),
            strings(&["12", "2021-01-01", "12:00:00", "doge doge doge", "300", "3"]),
            strings(&["13", "2021-01-01", "18:45:10", "btc or doge?", "300", "4"]),
            strings(&["14", "2021-01-01", "23:59:59", "late btc", "5", "5"]),
        ],
    )
}

fn default_options() -> JoinOptions {
    JoinOptions {
        compute_percentage: true,
        ..JoinOptions::default()
    }
}

#[test]
fn single_post_without_later_prices_is_dropped() {
    let prices = RawTable::new(
        strings(&["0", "1", "2", "3", "4"]),
        vec![
            strings(&["1609459200000", "100", "100", "100", "100"]),
            strings(&["1609459800000", "102", "102", "102", "102"]),
        ],
    );
    let posts = RawTable::new(
        strings(&["date", "time", "text"]),
        vec![strings(&["2021-01-01", "00:00:05", "buy now"])],
    );
    let options = JoinOptions {
        post_filter: PostFilter {
            columns: PostColumns {
                text: "text".into(),
                ..PostColumns::default()
            },
            ..PostFilter::default()
        },
        intervals: IntervalSpec::from_tokens(&["10min", "1hr"]).expect("intervals"),
        ..default_options()
    };

    let outcome = join_tables(&prices, &posts, &options).expect("join");
    assert!(outcome.table.is_empty());
    assert_eq!(outcome.stats.rows_dropped, 1);
}

#[test]
fn every_output_row_carries_its_own_prices() {
    let outcome = join_tables(&minute_prices(&[]), &tweets(), &default_options()).expect("join");
    assert_eq!(outcome.table.len(), 5);

    let expected_minutes = [0, 390, 720, 1125, 1439];
    for (row, minute) in outcome.table.rows.iter().zip(expected_minutes) {
        let base = 1000.0 + minute as f64;
        assert_eq!(row.prices.day_start, Some(1000.0));
        assert_eq!(row.prices.post_time, Some(base));
        assert_eq!(row.prices.short_after, Some(base + 10.0));
        assert_eq!(row.prices.hour_after, Some(base + 60.0));
        assert_eq!(row.prices.day_end, Some(1000.0 + 1440.0));
    }
    assert_eq!(outcome.table.rows[2].post.text, "doge doge doge");
}

#[test]
fn gap_only_removes_posts_touching_it() {
    // Minute 400 is the short anchor of the 06:30 post and nothing else.
    let outcome = join_tables(&minute_prices(&[400]), &tweets(), &default_options()).expect("join");
    let ids: Vec<usize> = outcome.table.rows.iter().map(|r| r.post.row_id).collect();
    assert_eq!(ids, vec![0, 2, 3, 4]);
    assert_eq!(outcome.price_quality.gaps, 1);
}

#[test]
fn filters_and_sorts_keep_posts_with_their_prices() {
    let options = JoinOptions {
        post_filter: PostFilter {
            extra_columns: strings(&["id"]),
            min_engagement: Some(10.0),
            sort_by_engagement: true,
            keyword_pattern: Some("btc|doge".into()),
            ..PostFilter::default()
        },
        ..default_options()
    };
    let outcome = join_tables(&minute_prices(&[]), &tweets(), &options).expect("join");

    let ids: Vec<&str> = outcome
        .table
        .rows
        .iter()
        .map(|r| r.post.extras[0].as_str())
        .collect();
    assert_eq!(ids, vec!["12", "13", "10"]);
    assert_eq!(outcome.table.rows[1].prices.post_time, Some(1000.0 + 1125.0));
    assert_eq!(
        outcome.table.headers()[..4],
        strings(&["date", "time", "tweet", "id"])[..]
    );
}

#[test]
fn percentage_sort_orders_by_metric() {
    let options = JoinOptions {
        sort_by_percentage: Some(PctSort::Day),
        ascending: true,
        ..default_options()
    };
    // Same day move for every post, divided by a rising post-time price.
    let outcome = join_tables(&minute_prices(&[]), &tweets(), &options).expect("join");
    let ids: Vec<usize> = outcome.table.rows.iter().map(|r| r.post.row_id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1, 0]);
    assert_eq!(outcome.table.rows[4].changes.and_then(|c| c.day_pct), Some(144.0));

    let options = JoinOptions {
        sort_by_percentage: Some(PctSort::Min),
        ascending: false,
        ..default_options()
    };
    // Lower base price => larger relative 10 minute change.
    let outcome = join_tables(&minute_prices(&[]), &tweets(), &options).expect("join");
    let ids: Vec<usize> = outcome.table.rows.iter().map(|r| r.post.row_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    let first = outcome.table.rows[0].changes.and_then(|c| c.short_pct);
    assert_eq!(first, Some(1.0));
}

#[test]
fn malformed_post_time_fails_the_whole_join() {
    let mut posts = tweets();
    posts.rows[3][2] = "quarter past six".into();
    let err = join_tables(&minute_prices(&[]), &posts, &default_options()).unwrap_err();
    assert_eq!(
        err,
        JoinError::MalformedTimestamp {
            row_id: 3,
            value: "2021-01-01 quarter past six".to_string()
        }
    );
}
