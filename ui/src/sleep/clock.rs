//! Wall-clock times of day as entered through the hour/minute selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Time;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseClockError {
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),
    #[error("hour {0} out of range 0-23")]
    HourOutOfRange(u8),
    #[error("minute {0} out of range 0-59")]
    MinuteOutOfRange(u8),
}

/// A point in the 24-hour cycle with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(Time);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(Time::MIDNIGHT);

    pub fn new(hour: u8, minute: u8) -> Result<Self, ParseClockError> {
        if hour > 23 {
            return Err(ParseClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ParseClockError::MinuteOutOfRange(minute));
        }
        Time::from_hms(hour, minute, 0)
            .map(Self)
            .map_err(|_| ParseClockError::Malformed(format!("{hour}:{minute}")))
    }

    pub fn hour(self) -> u8 {
        self.0.hour()
    }

    pub fn minute(self) -> u8 {
        self.0.minute()
    }

    pub fn with_hour(self, hour: u8) -> Result<Self, ParseClockError> {
        Self::new(hour, self.minute())
    }

    pub fn with_minute(self, minute: u8) -> Result<Self, ParseClockError> {
        Self::new(self.hour(), minute)
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour()) * 60 + u16::from(self.minute())
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = trimmed
            .split_once(':')
            .ok_or_else(|| ParseClockError::Malformed(s.to_string()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| ParseClockError::Malformed(s.to_string()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| ParseClockError::Malformed(s.to_string()))?;
        if hour > 23 {
            return Err(ParseClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ParseClockError::MinuteOutOfRange(minute));
        }

        // Normalise through the canonical zero-padded form.
        let canonical = format!("{hour:02}:{minute:02}");
        Time::parse(&canonical, format_description!("[hour]:[minute]"))
            .map(Self)
            .map_err(|_| ParseClockError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Values offered by the hour selector.
pub fn hour_options() -> impl Iterator<Item = u8> {
    0..24
}

/// Values offered by the minute selector.
pub fn minute_options() -> impl Iterator<Item = u8> {
    0..60
}
