//! Form state behind the sleep cards.
//!
//! Bedtime and wake time are the inputs; duration is derived from them on
//! every edit. Duration can also be edited directly, in which case the three
//! values are allowed to disagree until the next bedtime or wake edit.

use serde::Deserialize;
use tracing::debug;

use super::clock::ClockTime;
use super::duration::{self, SleepDuration};
use super::field::{FieldEdit, FieldKind, SleepField};

/// Placeholder quality score shown until real scoring exists.
pub const MOCK_QUALITY_PERCENT: u8 = 85;

/// Starting values for a fresh form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SleepDefaults {
    pub sleep: ClockTime,
    pub wake: ClockTime,
    pub duration_editable: bool,
}

impl Default for SleepDefaults {
    fn default() -> Self {
        Self {
            sleep: ClockTime::new(23, 0).unwrap_or_default(),
            wake: ClockTime::new(7, 0).unwrap_or_default(),
            duration_editable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepLog {
    sleep: ClockTime,
    wake: ClockTime,
    duration: SleepDuration,
    duration_editable: bool,
    duration_overridden: bool,
}

impl SleepLog {
    pub fn new(defaults: SleepDefaults) -> Self {
        Self {
            sleep: defaults.sleep,
            wake: defaults.wake,
            duration: duration::compute(defaults.sleep, defaults.wake),
            duration_editable: defaults.duration_editable,
            duration_overridden: false,
        }
    }

    pub fn sleep(&self) -> ClockTime {
        self.sleep
    }

    pub fn wake(&self) -> ClockTime {
        self.wake
    }

    pub fn duration(&self) -> SleepDuration {
        self.duration
    }

    /// True after a direct duration edit, until bedtime or wake time changes.
    pub fn duration_overridden(&self) -> bool {
        self.duration_overridden
    }

    pub fn quality_percent(&self) -> u8 {
        MOCK_QUALITY_PERCENT
    }

    pub fn set_sleep(&mut self, sleep: ClockTime) {
        self.sleep = sleep;
        self.recompute();
    }

    pub fn set_wake(&mut self, wake: ClockTime) {
        self.wake = wake;
        self.recompute();
    }

    /// A step that cannot move the value leaves the log untouched.
    pub fn step_duration(&mut self, delta_hours: i32) {
        let stepped = self.duration.step(delta_hours);
        if stepped != self.duration {
            self.duration = stepped;
            self.duration_overridden = true;
        }
    }

    pub fn set_duration_hours(&mut self, hours: i32) {
        self.duration = SleepDuration::from_whole_hours(hours);
        self.duration_overridden = true;
    }

    pub fn field(&self, kind: FieldKind) -> SleepField {
        match kind {
            FieldKind::SleepTime => SleepField::SleepTime(self.sleep),
            FieldKind::WakeTime => SleepField::WakeTime(self.wake),
            FieldKind::Duration => SleepField::Duration {
                value: self.duration,
                editable: self.duration_editable,
            },
        }
    }

    /// Route an edit to a card. Returns `false` when the card does not allow it.
    pub fn apply(&mut self, kind: FieldKind, edit: FieldEdit) -> bool {
        if !self.field(kind).accepts(&edit) {
            debug!(?kind, ?edit, "rejected edit for sleep field");
            return false;
        }

        match (kind, edit) {
            (FieldKind::SleepTime, FieldEdit::SetClock(t)) => self.set_sleep(t),
            (FieldKind::WakeTime, FieldEdit::SetClock(t)) => self.set_wake(t),
            (FieldKind::Duration, FieldEdit::Step(delta)) => self.step_duration(delta),
            (FieldKind::Duration, FieldEdit::SetHours(hours)) => self.set_duration_hours(hours),
            _ => return false,
        }
        true
    }

    fn recompute(&mut self) {
        self.duration = duration::compute(self.sleep, self.wake);
        self.duration_overridden = false;
    }
}

impl Default for SleepLog {
    fn default() -> Self {
        Self::new(SleepDefaults::default())
    }
}
