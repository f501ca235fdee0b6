//! Bedtime, wake time and the derived sleep duration.

pub mod clock;
pub mod duration;
pub mod field;
pub mod log;

pub use clock::{ClockTime, ParseClockError};
pub use duration::{compute, SleepDuration};
pub use field::{EditAffordance, FieldEdit, FieldKind, SleepField};
pub use log::{SleepDefaults, SleepLog};
