//! Elapsed time between bedtime and wake time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::ClockTime;
use crate::core::format;

const MINUTES_PER_HOUR: i32 = 60;
const HOURS_PER_DAY: i32 = 24;

/// Bounds for the whole-hour stepper and selector, in hours.
pub const MIN_EDIT_HOURS: i32 = 1;
pub const MAX_EDIT_HOURS: i32 = 24;

/// Non-negative duration with minute resolution, presented in hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SleepDuration {
    minutes: u16,
}

impl SleepDuration {
    pub const fn from_minutes(minutes: u16) -> Self {
        Self { minutes }
    }

    /// Duration chosen directly from the whole-hour selector, clamped to `[1, 24]`.
    pub fn from_whole_hours(hours: i32) -> Self {
        let hours = hours.clamp(MIN_EDIT_HOURS, MAX_EDIT_HOURS);
        Self::from_minutes((hours * MINUTES_PER_HOUR) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.minutes
    }

    pub fn hours(self) -> f64 {
        f64::from(self.minutes) / f64::from(MINUTES_PER_HOUR)
    }

    /// Whole-hour stepper edit, clamped to `[1, 24]` hours.
    ///
    /// Never moves against `delta_hours`: decrementing a value already below
    /// the range leaves it unchanged.
    pub fn step(self, delta_hours: i32) -> Self {
        let min = MIN_EDIT_HOURS * MINUTES_PER_HOUR;
        let max = MAX_EDIT_HOURS * MINUTES_PER_HOUR;
        let stepped = i32::from(self.minutes)
            .saturating_add(delta_hours.saturating_mul(MINUTES_PER_HOUR))
            .clamp(min, max);
        let stepped = Self::from_minutes(stepped as u16);

        let backwards = (delta_hours < 0 && stepped > self) || (delta_hours > 0 && stepped < self);
        if backwards {
            self
        } else {
            stepped
        }
    }

    pub fn can_step(self, delta_hours: i32) -> bool {
        self.step(delta_hours) != self
    }

    /// The selector entry matching this value, if it is a whole hour in range.
    pub fn as_whole_hours(self) -> Option<i32> {
        let minutes = i32::from(self.minutes);
        let hours = minutes / MINUTES_PER_HOUR;
        (minutes % MINUTES_PER_HOUR == 0 && (MIN_EDIT_HOURS..=MAX_EDIT_HOURS).contains(&hours))
            .then_some(hours)
    }
}

impl fmt::Display for SleepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_hours(self.hours()))
    }
}

/// Time slept from `sleep` until the next occurrence of `wake`.
///
/// Wraps across midnight; the result is always in `[0, 24)` hours.
pub fn compute(sleep: ClockTime, wake: ClockTime) -> SleepDuration {
    let mut hours = i32::from(wake.hour()) - i32::from(sleep.hour());
    let mut minutes = i32::from(wake.minute()) - i32::from(sleep.minute());

    if minutes < 0 {
        minutes += MINUTES_PER_HOUR;
        hours -= 1;
    }
    if hours < 0 {
        hours += HOURS_PER_DAY;
    }

    SleepDuration::from_minutes((hours * MINUTES_PER_HOUR + minutes) as u16)
}
