use crate::errors::JoinError;
use chrono::Duration;

pub const DEFAULT_SHORT_MINUTES: u32 = 10;
pub const DEFAULT_HOURS: u32 = 1;

/// Offsets of the short and hour anchors after the post minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    pub minutes: u32,
    pub hours: u32,
}

impl Default for IntervalSpec {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_SHORT_MINUTES,
            hours: DEFAULT_HOURS,
        }
    }
}

impl IntervalSpec {
    /// Applies `"<N>min"` / `"<N>hr"` tokens over the defaults. When a kind is
    /// given twice the last token wins.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, JoinError> {
        let mut spec = Self::default();
        for token in tokens {
            match parse_interval_token(token.as_ref())? {
                IntervalToken::Minutes(n) => spec.minutes = n,
                IntervalToken::Hours(n) => spec.hours = n,
            }
        }
        Ok(spec)
    }

    pub fn short_offset(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    pub fn hour_offset(&self) -> Duration {
        Duration::hours(i64::from(self.hours))
    }

    pub fn tokens(&self) -> [String; 2] {
        [format!("{}min", self.minutes), format!("{}hr", self.hours)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalToken {
    Minutes(u32),
    Hours(u32),
}

pub fn parse_interval_token(value: &str) -> Result<IntervalToken, JoinError> {
    let trimmed = value.trim().to_lowercase();
    let invalid = || JoinError::InvalidInterval(value.to_string());

    let (number_part, make): (&str, fn(u32) -> IntervalToken) =
        if let Some(stripped) = trimmed.strip_suffix("min") {
            (stripped, IntervalToken::Minutes)
        } else if let Some(stripped) = trimmed.strip_suffix("hr") {
            (stripped, IntervalToken::Hours)
        } else {
            return Err(invalid());
        };

    let number: u32 = number_part.trim().parse().map_err(|_| invalid())?;
    if number == 0 {
        return Err(invalid());
    }
    Ok(make(number))
}

#[cfg(test)]
mod tests {
    use super::{parse_interval_token, IntervalSpec, IntervalToken};
    use crate::errors::JoinError;

    #[test]
    fn defaults_are_ten_minutes_and_one_hour() {
        let spec = IntervalSpec::from_tokens::<&str>(&[]).expect("defaults");
        assert_eq!(spec, IntervalSpec { minutes: 10, hours: 1 });
    }

    #[test]
    fn tokens_override_each_kind_independently() {
        let spec = IntervalSpec::from_tokens(&["3min"]).expect("minutes only");
        assert_eq!(spec, IntervalSpec { minutes: 3, hours: 1 });

        let spec = IntervalSpec::from_tokens(&["5hr", " 15MIN "]).expect("both");
        assert_eq!(spec, IntervalSpec { minutes: 15, hours: 5 });
    }

    #[test]
    fn last_token_of_a_kind_wins() {
        let spec = IntervalSpec::from_tokens(&["3min", "30min"]).expect("repeat");
        assert_eq!(spec.minutes, 30);
    }

    #[test]
    fn rejects_unknown_units_and_zero() {
        for bad in ["10", "10s", "min", "0min", "-1hr", "1.5hr"] {
            assert_eq!(
                parse_interval_token(bad),
                Err(JoinError::InvalidInterval(bad.to_string())),
                "{bad}"
            );
        }
        assert_eq!(parse_interval_token("2hr"), Ok(IntervalToken::Hours(2)));
    }
}
