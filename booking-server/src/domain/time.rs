//! Wall-clock times for bus schedules.
//!
//! Schedules are kept as 24-hour "HH:MM" strings. Staff-facing output uses a
//! 12-hour clock with an AM/PM suffix, e.g. "2:30 PM".

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use booking_server::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(time.to_string(), "14:30");
/// assert_eq!(time.to_12_hour(), "2:30 PM");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Midnight, "00:00".
    pub fn midnight() -> Self {
        Self(NaiveTime::default())
    }

    /// Hours and minutes past midnight, wrapping at 24 hours.
    pub(crate) fn after_midnight(hours: i64, minutes: i64) -> Self {
        Self(NaiveTime::default() + Duration::hours(hours) + Duration::minutes(minutes))
    }

    /// Create a time from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// Both fields must be exactly two digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("14:3").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let shaped = s.len() == 5
            && s.bytes().enumerate().all(|(i, b)| match i {
                2 => b == b':',
                _ => b.is_ascii_digit(),
            });
        if !shaped {
            return Err(TimeError::new("expected HH:MM format"));
        }

        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| TimeError::new("hour must be 0-23 and minute 0-59"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Format on a 12-hour clock: no leading zero on the hour, and both
    /// midnight and noon shown as 12.
    pub fn to_12_hour(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self.0.format("%H:%M"))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Convert a 24-hour "HH:MM" string to its 12-hour display form.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use booking_server::domain::to_display_time;
///
/// assert_eq!(to_display_time("00:00").unwrap(), "12:00 AM");
/// assert_eq!(to_display_time("13:05").unwrap(), "1:05 PM");
/// assert!(to_display_time("noon").is_err());
/// ```
pub fn to_display_time(time24: &str) -> Result<String, TimeError> {
    ClockTime::parse_hhmm(time24.trim()).map(|t| t.to_12_hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = ClockTime::parse_hhmm("00:00").unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = ClockTime::parse_hhmm("23:59").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = ClockTime::parse_hhmm("06:30").unwrap();
        assert_eq!(t.hour(), 6);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn parse_invalid_times() {
        assert!(ClockTime::parse_hhmm("").is_err());
        assert!(ClockTime::parse_hhmm("6:30").is_err());
        assert!(ClockTime::parse_hhmm(" 6:30").is_err());
        assert!(ClockTime::parse_hhmm("06-30").is_err());
        assert!(ClockTime::parse_hhmm("24:00").is_err());
        assert!(ClockTime::parse_hhmm("12:60").is_err());
        assert!(ClockTime::parse_hhmm("ab:cd").is_err());
        assert!(ClockTime::parse_hhmm("06:30 AM").is_err());
    }

    #[test]
    fn error_messages() {
        let err = ClockTime::parse_hhmm("25:00").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid time: hour must be 0-23 and minute 0-59"
        );

        let err = ClockTime::parse_hhmm("7pm").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: expected HH:MM format");
    }

    #[test]
    fn from_hm_bounds() {
        assert_eq!(ClockTime::from_hm(0, 0), Some(ClockTime::midnight()));
        assert!(ClockTime::from_hm(23, 59).is_some());
        assert!(ClockTime::from_hm(24, 0).is_none());
        assert!(ClockTime::from_hm(0, 60).is_none());
    }

    #[test]
    fn after_midnight_wraps() {
        assert_eq!(ClockTime::after_midnight(6, 30).to_string(), "06:30");
        assert_eq!(ClockTime::after_midnight(25, 0).to_string(), "01:00");
    }

    #[test]
    fn twelve_hour_format() {
        assert_eq!(to_display_time("00:00").unwrap(), "12:00 AM");
        assert_eq!(to_display_time("00:45").unwrap(), "12:45 AM");
        assert_eq!(to_display_time("06:30").unwrap(), "6:30 AM");
        assert_eq!(to_display_time("11:59").unwrap(), "11:59 AM");
        assert_eq!(to_display_time("12:00").unwrap(), "12:00 PM");
        assert_eq!(to_display_time("13:05").unwrap(), "1:05 PM");
        assert_eq!(to_display_time("23:59").unwrap(), "11:59 PM");
    }

    #[test]
    fn display_time_trims_input() {
        assert_eq!(to_display_time(" 14:00 ").unwrap(), "2:00 PM");
    }

    #[test]
    fn display_and_debug() {
        let t = ClockTime::parse_hhmm("07:05").unwrap();
        assert_eq!(format!("{}", t), "07:05");
        assert_eq!(format!("{:?}", t), "ClockTime(07:05)");
    }

    #[test]
    fn ordering() {
        let early = ClockTime::parse_hhmm("06:00").unwrap();
        let late = ClockTime::parse_hhmm("20:30").unwrap();
        assert!(early < late);
    }
}
