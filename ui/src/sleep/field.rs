//! The three sleep cards as a tagged union with per-variant edit capability.

use super::clock::ClockTime;
use super::duration::SleepDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    SleepTime,
    WakeTime,
    Duration,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [Self::SleepTime, Self::WakeTime, Self::Duration];

    /// Stable suffix used for CSS modifiers and element ids.
    pub fn slug(self) -> &'static str {
        match self {
            Self::SleepTime => "sleep",
            Self::WakeTime => "wake",
            Self::Duration => "duration",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::SleepTime => "☾",
            Self::WakeTime => "☀",
            Self::Duration => "🛏",
        }
    }
}

/// How a card lets the user change its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAffordance {
    /// Separate hour and minute selectors.
    DualSelector,
    /// Whole-hour increment/decrement buttons plus an hour selector.
    Stepper,
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    SetClock(ClockTime),
    Step(i32),
    SetHours(i32),
}

/// A card's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepField {
    SleepTime(ClockTime),
    WakeTime(ClockTime),
    Duration {
        value: SleepDuration,
        editable: bool,
    },
}

impl SleepField {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::SleepTime(_) => FieldKind::SleepTime,
            Self::WakeTime(_) => FieldKind::WakeTime,
            Self::Duration { .. } => FieldKind::Duration,
        }
    }

    pub fn affordance(&self) -> EditAffordance {
        match self {
            Self::SleepTime(_) | Self::WakeTime(_) => EditAffordance::DualSelector,
            Self::Duration { editable: true, .. } => EditAffordance::Stepper,
            Self::Duration { editable: false, .. } => EditAffordance::ReadOnly,
        }
    }

    pub fn accepts(&self, edit: &FieldEdit) -> bool {
        matches!(
            (self.affordance(), edit),
            (EditAffordance::DualSelector, FieldEdit::SetClock(_))
                | (EditAffordance::Stepper, FieldEdit::Step(_) | FieldEdit::SetHours(_))
        )
    }

    /// Text shown as the card's headline value.
    pub fn display_value(&self) -> String {
        match self {
            Self::SleepTime(t) | Self::WakeTime(t) => t.to_string(),
            Self::Duration { value, .. } => value.to_string(),
        }
    }

    pub fn clock(&self) -> Option<ClockTime> {
        match self {
            Self::SleepTime(t) | Self::WakeTime(t) => Some(*t),
            Self::Duration { .. } => None,
        }
    }

    pub fn duration(&self) -> Option<SleepDuration> {
        match self {
            Self::Duration { value, .. } => Some(*value),
            _ => None,
        }
    }
}
