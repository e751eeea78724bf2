use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Non-negative elapsed time with whole-second precision.
///
/// Attendance averages routinely exceed a day when summed, so the textual form
/// is `HH:MM:SS` with an unbounded hour component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttendanceDuration {
    seconds: u64,
}

impl AttendanceDuration {
    pub const ZERO: Self = Self { seconds: 0 };

    pub const fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    pub const fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            seconds: hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds,
        }
    }

    /// Converts a spreadsheet time value (fraction of a day) to the nearest second.
    pub fn from_day_fraction(days: f64) -> Result<Self, DurationParseError> {
        if !days.is_finite() {
            return Err(DurationParseError::Invalid(days.to_string()));
        }
        if days < 0.0 {
            return Err(DurationParseError::Negative(days.to_string()));
        }

        let seconds = (days * SECONDS_PER_DAY as f64).round() as u64;
        Ok(Self { seconds })
    }

    /// Converts a workbook time delta to the nearest second.
    pub fn from_time_delta(delta: chrono::Duration) -> Result<Self, DurationParseError> {
        let millis = delta.num_milliseconds();
        if millis < 0 {
            return Err(DurationParseError::Negative(delta.to_string()));
        }

        let seconds = (millis as u64 + 500) / 1_000;
        Ok(Self { seconds })
    }

    pub const fn total_seconds(self) -> u64 {
        self.seconds
    }

    pub fn hours(self) -> f64 {
        self.seconds as f64 / SECONDS_PER_HOUR as f64
    }

    pub const fn is_zero(self) -> bool {
        self.seconds == 0
    }

    /// Parses `HH:MM:SS`, `HH:MM`, or either form prefixed with a day count
    /// such as `1 day, 02:00:00` or `0 days 08:30:00`.
    pub fn parse(raw: &str) -> Result<Self, DurationParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DurationParseError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(DurationParseError::Negative(trimmed.to_string()));
        }

        let invalid = || DurationParseError::Invalid(trimmed.to_string());
        let (days, clock) = split_day_prefix(trimmed).ok_or_else(invalid)?;
        let clock_seconds = if clock.is_empty() {
            0
        } else {
            parse_clock(clock).ok_or_else(invalid)?
        };

        let seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| seconds.checked_add(clock_seconds))
            .ok_or_else(invalid)?;
        Ok(Self { seconds })
    }
}

/// Splits a leading `<N> day[s]` token off the clock part. Values without the
/// token come back whole with zero days.
fn split_day_prefix(value: &str) -> Option<(u64, &str)> {
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let after_count = value[digits..].trim_start();
    let unit = if after_count.starts_with("days") {
        "days"
    } else if after_count.starts_with("day") {
        "day"
    } else {
        return Some((0, value));
    };

    let rest = &after_count[unit.len()..];
    if digits == 0 || !(rest.is_empty() || rest.starts_with([',', ' '])) {
        return None;
    }

    let days = value[..digits].parse::<u64>().ok()?;
    Some((days, rest.trim_start_matches(',').trim()))
}

fn parse_clock(clock: &str) -> Option<u64> {
    let parts: Vec<&str> = clock.split(':').map(str::trim).collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [hours, minutes] => (*hours, *minutes, "0"),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return None,
    };

    let hours = hours.parse::<u64>().ok()?;
    let minutes = minutes.parse::<u64>().ok()?;
    let seconds = seconds.parse::<f64>().ok()?;
    if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    hours
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(minutes * SECONDS_PER_MINUTE + seconds.round() as u64)
}

impl fmt::Display for AttendanceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / SECONDS_PER_HOUR;
        let minutes = (self.seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.seconds % SECONDS_PER_MINUTE;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for AttendanceDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AttendanceDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    Empty,
    Negative(String),
    Invalid(String),
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationParseError::Empty => write!(f, "duration value is blank"),
            DurationParseError::Negative(value) => {
                write!(f, "duration '{value}' is negative")
            }
            DurationParseError::Invalid(value) => {
                write!(f, "'{value}' is not an HH:MM:SS duration")
            }
        }
    }
}

impl std::error::Error for DurationParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_forms() {
        assert_eq!(
            AttendanceDuration::parse("08:30:15").unwrap(),
            AttendanceDuration::from_hms(8, 30, 15)
        );
        assert_eq!(
            AttendanceDuration::parse(" 7:05 ").unwrap(),
            AttendanceDuration::from_hms(7, 5, 0)
        );
        assert_eq!(
            AttendanceDuration::parse("01:00:00.6").unwrap().total_seconds(),
            3_601
        );
    }

    #[test]
    fn parses_day_prefixed_values() {
        assert_eq!(
            AttendanceDuration::parse("0 days 08:30:00").unwrap(),
            AttendanceDuration::from_hms(8, 30, 0)
        );
        assert_eq!(
            AttendanceDuration::parse("1 day, 2:00:00").unwrap(),
            AttendanceDuration::from_hms(26, 0, 0)
        );
        assert_eq!(
            AttendanceDuration::parse("2 days").unwrap(),
            AttendanceDuration::from_hms(48, 0, 0)
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(
            AttendanceDuration::parse("   "),
            Err(DurationParseError::Empty)
        );
        assert!(matches!(
            AttendanceDuration::parse("-01:00:00"),
            Err(DurationParseError::Negative(_))
        ));
        for raw in ["nan", "8h", "08:75:00", "08:30:61", "1:2:3:4", "x days 01:00"] {
            assert!(
                matches!(
                    AttendanceDuration::parse(raw),
                    Err(DurationParseError::Invalid(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn renders_unbounded_hours() {
        assert_eq!(AttendanceDuration::from_hms(7, 3, 9).to_string(), "07:03:09");
        assert_eq!(AttendanceDuration::from_hms(26, 0, 1).to_string(), "26:00:01");
        assert_eq!(AttendanceDuration::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn converts_day_fractions_to_nearest_second() {
        let duration = AttendanceDuration::from_day_fraction(0.354_166_666).unwrap();
        assert_eq!(duration, AttendanceDuration::from_hms(8, 30, 0));
        assert!((duration.hours() - 8.5).abs() < f64::EPSILON);
        assert!(AttendanceDuration::from_day_fraction(-0.1).is_err());
        assert!(AttendanceDuration::from_day_fraction(f64::NAN).is_err());
    }

    #[test]
    fn day_token_must_follow_the_leading_count() {
        for raw in ["08:00 day", "1 dayshift 08:00", "day 08:00:00", "1 daysx, 08:00"] {
            assert!(
                matches!(
                    AttendanceDuration::parse(raw),
                    Err(DurationParseError::Invalid(_))
                ),
                "{raw} should be rejected"
            );
        }
        assert_eq!(
            AttendanceDuration::parse("3days,01:00:00").unwrap(),
            AttendanceDuration::from_hms(73, 0, 0)
        );
    }

    #[test]
    fn oversized_values_are_invalid_instead_of_overflowing() {
        for raw in [
            "9999999999999999:00:00",
            "999999999999999 days 00:00:00",
            "213503982334601 days 23:59:59",
        ] {
            assert!(
                matches!(
                    AttendanceDuration::parse(raw),
                    Err(DurationParseError::Invalid(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn converts_time_deltas_to_nearest_second() {
        let delta = chrono::Duration::milliseconds(8 * 3_600_000 + 1_500);
        assert_eq!(
            AttendanceDuration::from_time_delta(delta).unwrap(),
            AttendanceDuration::from_hms(8, 0, 2)
        );
        assert!(matches!(
            AttendanceDuration::from_time_delta(chrono::Duration::seconds(-5)),
            Err(DurationParseError::Negative(_))
        ));
    }
}
