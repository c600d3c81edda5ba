use crate::errors::JoinError;
use crate::value_objects::post::{Post, PostFilter, PostTable};
use crate::value_objects::price_bar::PriceBar;
use crate::value_objects::raw_table::RawTable;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

pub const PRICE_COLUMNS: [&str; 5] = ["timestamp", "open", "high", "low", "close"];

/// Reads the first five columns as timestamp/open/high/low/close. Trailing
/// columns (volume, trade counts, ...) are ignored.
pub fn normalize_prices(raw: &RawTable) -> Result<Vec<PriceBar>, JoinError> {
    if raw.width() < PRICE_COLUMNS.len() {
        return Err(JoinError::MissingColumn {
            table: "price",
            column: PRICE_COLUMNS[raw.width()].to_string(),
        });
    }

    let mut bars = Vec::with_capacity(raw.len());
    for row in 0..raw.len() {
        let timestamp_ms = parse_timestamp_ms(raw.cell(row, 0), row)?;
        let mut ohlc = [0.0_f64; 4];
        for (offset, slot) in ohlc.iter_mut().enumerate() {
            let column = offset + 1;
            *slot = parse_number(raw.cell(row, column), PRICE_COLUMNS[column], row)?;
        }
        bars.push(PriceBar {
            timestamp_ms,
            open: ohlc[0],
            high: ohlc[1],
            low: ohlc[2],
            close: ohlc[3],
        });
    }
    Ok(bars)
}

/// Selects the configured post columns and applies, in order: engagement
/// filter, engagement sort, keyword filter. Every surviving post keeps its
/// raw `row_id`.
pub fn normalize_posts(raw: &RawTable, filter: &PostFilter) -> Result<PostTable, JoinError> {
    let keyword = filter
        .keyword_pattern
        .as_deref()
        .map(compile_keyword_pattern)
        .transpose()?;

    let date_idx = raw.require_column("post", &filter.columns.date)?;
    let time_idx = raw.require_column("post", &filter.columns.time)?;
    let text_idx = raw.require_column("post", &filter.columns.text)?;
    let extra_idx = filter
        .extra_columns
        .iter()
        .map(|name| raw.require_column("post", name))
        .collect::<Result<Vec<_>, _>>()?;
    let engagement_idx = if filter.needs_engagement() {
        Some(raw.require_column("post", &filter.engagement_column)?)
    } else {
        None
    };

    let mut posts = Vec::with_capacity(raw.len());
    for row_id in 0..raw.len() {
        let engagement = match engagement_idx {
            Some(idx) => Some(parse_number(
                raw.cell(row_id, idx),
                &filter.engagement_column,
                row_id,
            )?),
            None => None,
        };
        posts.push(Post {
            row_id,
            date: raw.cell(row_id, date_idx).trim().to_string(),
            time: raw.cell(row_id, time_idx).trim().to_string(),
            text: raw.cell(row_id, text_idx).to_string(),
            extras: extra_idx
                .iter()
                .map(|&idx| raw.cell(row_id, idx).to_string())
                .collect(),
            engagement,
        });
    }

    if let Some(min) = filter.min_engagement {
        posts.retain(|post| post.engagement.is_some_and(|e| e > min));
    }

    if filter.sort_by_engagement {
        sort_by_engagement(&mut posts, filter.ascending);
    }

    if let Some(regex) = keyword {
        posts.retain(|post| regex.is_match(&post.text));
    }

    Ok(PostTable {
        columns: filter.columns.clone(),
        extra_columns: filter.extra_columns.clone(),
        posts,
    })
}

pub fn compile_keyword_pattern(pattern: &str) -> Result<Regex, JoinError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| JoinError::InvalidKeywordPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })
}

/// Stable: posts with equal engagement keep their relative order.
pub fn sort_by_engagement(posts: &mut [Post], ascending: bool) {
    posts.sort_by(|a, b| {
        let ord = a
            .engagement
            .partial_cmp(&b.engagement)
            .unwrap_or(Ordering::Equal);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn parse_number(value: &str, column: &str, row: usize) -> Result<f64, JoinError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| JoinError::InvalidNumber {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}

fn parse_timestamp_ms(value: &str, row: usize) -> Result<i64, JoinError> {
    let trimmed = value.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(ms);
    }
    let ms = parse_number(trimmed, PRICE_COLUMNS[0], row)?;
    if ms.fract() != 0.0 || ms.abs() > i64::MAX as f64 {
        return Err(JoinError::InvalidNumber {
            column: PRICE_COLUMNS[0].to_string(),
            row,
            value: value.to_string(),
        });
    }
    Ok(ms as i64)
}
