use crate::errors::JoinError;
use crate::services::price_index::PriceIndex;
use crate::value_objects::interval::IntervalSpec;
use crate::value_objects::post::Post;
use crate::value_objects::resolved::{AnchorTimestamps, ResolvedPrices};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Resolves the five anchor prices of a post against a price index.
#[derive(Debug, Clone)]
pub struct IntervalResolver {
    index: PriceIndex,
    intervals: IntervalSpec,
    timezone: Tz,
}

impl IntervalResolver {
    pub fn new(index: PriceIndex, intervals: IntervalSpec, timezone: Tz) -> Self {
        Self {
            index,
            intervals,
            timezone,
        }
    }

    pub fn index(&self) -> &PriceIndex {
        &self.index
    }

    pub fn anchors(&self, post: &Post) -> Result<AnchorTimestamps, JoinError> {
        let malformed = || JoinError::MalformedTimestamp {
            row_id: post.row_id,
            value: format!("{} {}", post.date, post.time),
        };
        let post_minute = parse_post_minute(&post.date, &post.time).ok_or_else(malformed)?;
        let post_time = self.to_unix(post_minute).ok_or_else(malformed)?;

        let day_start = post_minute.date().and_time(NaiveTime::MIN);
        Ok(AnchorTimestamps {
            day_start: self.to_unix(day_start),
            post_time,
            short_after: self.offset_unix(post_minute, self.intervals.short_offset()),
            hour_after: self.offset_unix(post_minute, self.intervals.hour_offset()),
            day_end: self.offset_unix(day_start, Duration::hours(24)),
        })
    }

    pub fn resolve(&self, post: &Post) -> Result<ResolvedPrices, JoinError> {
        let anchors = self.anchors(post)?;
        let lookup = |second: Option<i64>| second.and_then(|s| self.index.price_at(s));
        Ok(ResolvedPrices {
            day_start: lookup(anchors.day_start),
            post_time: self.index.price_at(anchors.post_time),
            short_after: lookup(anchors.short_after),
            hour_after: lookup(anchors.hour_after),
            day_end: lookup(anchors.day_end),
        })
    }

    // Offsets are wall-clock arithmetic in the post's zone, converted afterwards.
    fn offset_unix(&self, local: NaiveDateTime, offset: Duration) -> Option<i64> {
        local
            .checked_add_signed(offset)
            .and_then(|shifted| self.to_unix(shifted))
    }

    fn to_unix(&self, local: NaiveDateTime) -> Option<i64> {
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.timestamp())
    }
}

/// Parses a post's date and time of day and truncates it to the start of its
/// minute, matching minute-granularity price bars.
pub fn parse_post_minute(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time.trim(), format).ok())?;
    date.and_time(time).with_second(0)?.with_nanosecond(0)
}
