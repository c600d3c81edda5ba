use crate::services::price_change::derive_price_changes;
use crate::value_objects::interval::IntervalSpec;
use crate::value_objects::joined::{JoinedRow, JoinedTable};
use crate::value_objects::options::PctSort;
use crate::value_objects::post::Post;
use crate::value_objects::resolved::ResolvedPrices;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssembleOptions {
    pub compute_percentage: bool,
    pub sort_by_percentage: Option<PctSort>,
    pub ascending: bool,
}

pub fn price_headers(intervals: &IntervalSpec, compute_percentage: bool) -> Vec<String> {
    let mut headers = vec![
        "Price at Day Start".to_string(),
        "Price at post time".to_string(),
        format!("Price after {} min", intervals.minutes),
        format!("Price after {} hour", intervals.hours),
        "Price at day end".to_string(),
    ];
    if compute_percentage {
        headers.push(format!("{} minute %", intervals.minutes));
        headers.push(format!("{} hour %", intervals.hours));
        headers.push("24 hour %".to_string());
    }
    headers
}

/// Builds the joined table from posts already paired with their prices:
/// attaches percentage changes, applies the optional percentage sort, then
/// drops every row with an unresolved price or change.
pub fn assemble(
    post_headers: Vec<String>,
    resolved: Vec<(Post, ResolvedPrices)>,
    intervals: &IntervalSpec,
    options: AssembleOptions,
) -> JoinedTable {
    let mut rows: Vec<JoinedRow> = resolved
        .into_iter()
        .map(|(post, prices)| JoinedRow {
            changes: options
                .compute_percentage
                .then(|| derive_price_changes(&prices)),
            post,
            prices,
        })
        .collect();

    if options.compute_percentage {
        if let Some(target) = options.sort_by_percentage {
            sort_by_change(&mut rows, target, options.ascending);
        }
    }

    rows.retain(JoinedRow::is_complete);

    JoinedTable {
        post_headers,
        price_headers: price_headers(intervals, options.compute_percentage),
        rows,
    }
}

/// Stable sort on one change metric; rows without that metric go last in
/// either direction.
pub fn sort_by_change(rows: &mut [JoinedRow], target: PctSort, ascending: bool) {
    let key = |row: &JoinedRow| {
        row.changes.and_then(|c| match target {
            PctSort::Min => c.short_pct,
            PctSort::Hr => c.hour_pct,
            PctSort::Day => c.day_pct,
        })
    };
    rows.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::{assemble, price_headers, AssembleOptions};
    use crate::value_objects::interval::IntervalSpec;
    use crate::value_objects::options::PctSort;
    use crate::value_objects::post::Post;
    use crate::value_objects::resolved::ResolvedPrices;

    fn post(row_id: usize) -> Post {
        Post {
            row_id,
            date: "2021-01-01".into(),
            time: format!("00:0{row_id}:00"),
            text: format!("post {row_id}"),
            extras: Vec::new(),
            engagement: None,
        }
    }

    fn prices(short: f64, hour: Option<f64>) -> ResolvedPrices {
        ResolvedPrices {
            day_start: Some(100.0),
            post_time: Some(100.0),
            short_after: Some(short),
            hour_after: hour,
            day_end: Some(100.0),
        }
    }

    fn headers() -> Vec<String> {
        vec!["date".into(), "time".into(), "tweet".into()]
    }

    #[test]
    fn headers_name_the_intervals() {
        let intervals = IntervalSpec { minutes: 3, hours: 5 };
        assert_eq!(
            price_headers(&intervals, true),
            vec![
                "Price at Day Start",
                "Price at post time",
                "Price after 3 min",
                "Price after 5 hour",
                "Price at day end",
                "3 minute %",
                "5 hour %",
                "24 hour %",
            ]
        );
        assert_eq!(price_headers(&intervals, false).len(), 5);
    }

    #[test]
    fn incomplete_rows_are_dropped_and_pairs_kept() {
        let table = assemble(
            headers(),
            vec![
                (post(0), prices(101.0, Some(102.0))),
                (post(1), prices(103.0, None)),
                (post(2), prices(104.0, Some(99.0))),
            ],
            &IntervalSpec::default(),
            AssembleOptions::default(),
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].post.row_id, 0);
        assert_eq!(table.rows[1].post.row_id, 2);
        assert_eq!(table.rows[1].prices.short_after, Some(104.0));
        assert!(table.rows[0].changes.is_none());
    }

    #[test]
    fn sorts_by_requested_change() {
        let resolved = vec![
            (post(0), prices(101.0, Some(90.0))),
            (post(1), prices(105.0, Some(110.0))),
            (post(2), prices(103.0, Some(100.0))),
        ];
        let table = assemble(
            headers(),
            resolved.clone(),
            &IntervalSpec::default(),
            AssembleOptions {
                compute_percentage: true,
                sort_by_percentage: Some(PctSort::Min),
                ascending: false,
            },
        );
        let ids: Vec<usize> = table.rows.iter().map(|r| r.post.row_id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(table.rows[0].changes.and_then(|c| c.short_pct), Some(5.0));

        let table = assemble(
            headers(),
            resolved,
            &IntervalSpec::default(),
            AssembleOptions {
                compute_percentage: true,
                sort_by_percentage: Some(PctSort::Hr),
                ascending: true,
            },
        );
        let ids: Vec<usize> = table.rows.iter().map(|r| r.post.row_id).collect();
        assert_eq!(ids, vec![0, 2, 1]);
        assert_eq!(table.rows[0].changes.and_then(|c| c.hour_pct), Some(-10.0));
    }

    #[test]
    fn sort_without_percentages_is_ignored() {
        let table = assemble(
            headers(),
            vec![
                (post(0), prices(101.0, Some(90.0))),
                (post(1), prices(105.0, Some(110.0))),
            ],
            &IntervalSpec::default(),
            AssembleOptions {
                compute_percentage: false,
                sort_by_percentage: Some(PctSort::Min),
                ascending: false,
            },
        );
        let ids: Vec<usize> = table.rows.iter().map(|r| r.post.row_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
