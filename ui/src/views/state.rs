use dioxus::prelude::*;

use crate::core::notice::NoticeBoard;
use crate::sleep::{SleepDefaults, SleepLog};
use crate::snoring::{use_snoring_tracker, SnoringConfig};

/// Provide the page state: the sleep log, the notice board and the snoring
/// tracker.
///
/// Call once in the root component, outside the subtree that is keyed on the
/// locale, so a language switch re-renders the page without resetting it.
pub fn use_sleepwell_state(defaults: SleepDefaults, config: SnoringConfig) {
    let log = use_signal(|| SleepLog::new(defaults));
    use_context_provider(|| log);

    let board = use_signal(NoticeBoard::default);
    use_context_provider(|| board);

    use_snoring_tracker(config, board);
}
