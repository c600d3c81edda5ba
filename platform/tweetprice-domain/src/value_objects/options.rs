use crate::errors::JoinError;
use crate::value_objects::interval::IntervalSpec;
use crate::value_objects::post::PostFilter;
use crate::value_objects::price_bar::PriceField;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Percentage metric used to order the joined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PctSort {
    Min,
    Hr,
    Day,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinOptions {
    pub post_filter: PostFilter,
    pub intervals: IntervalSpec,
    pub price_field: PriceField,
    /// Zone in which post dates and times are written.
    pub timezone: Tz,
    pub compute_percentage: bool,
    pub sort_by_percentage: Option<PctSort>,
    pub ascending: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            post_filter: PostFilter::default(),
            intervals: IntervalSpec::default(),
            price_field: PriceField::default(),
            timezone: Tz::UTC,
            compute_percentage: false,
            sort_by_percentage: None,
            ascending: false,
        }
    }
}

impl JoinOptions {
    /// A percentage sort without `compute_percentage` is accepted and has no
    /// effect.
    pub fn validate(&self) -> Result<(), JoinError> {
        if let Some(min) = self.post_filter.min_engagement {
            if !min.is_finite() {
                return Err(JoinError::InvalidOptions(format!(
                    "min_engagement must be finite, got {min}"
                )));
            }
        }
        Ok(())
    }
}

pub fn parse_timezone(value: &str) -> Result<Tz, JoinError> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|_| JoinError::InvalidTimezone(value.to_string()))
}
