//! Toast payloads for tracker events.

use uuid::Uuid;

use crate::snoring::{MicrophoneError, SnoringEvent};
use crate::t;

/// How long a toast stays up before it is dismissed automatically.
pub const NOTICE_TTL_MS: u64 = 4_000;
/// Older toasts are dropped once more than this many are visible.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    TrackingStarted,
    SnoringDetected { count: u32 },
    MicrophoneError(MicrophoneError),
}

impl NoticeKind {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::MicrophoneError(_))
    }

    pub fn css_modifier(&self) -> &'static str {
        match self {
            Self::TrackingStarted => "toast--info",
            Self::SnoringDetected { .. } => "toast--accent",
            Self::MicrophoneError(_) => "toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Localized toast for a tracker event.
    pub fn from_event(event: &SnoringEvent) -> Self {
        match event {
            SnoringEvent::TrackingStarted => Self::new(
                NoticeKind::TrackingStarted,
                t!("notice-started-title"),
                t!("notice-started-body"),
            ),
            SnoringEvent::SnoringDetected { count } => Self::new(
                NoticeKind::SnoringDetected { count: *count },
                t!("notice-snoring-title"),
                t!("notice-snoring-body", count = (*count)),
            ),
            SnoringEvent::MicrophoneError(err) => Self::new(
                NoticeKind::MicrophoneError(err.clone()),
                t!("notice-mic-error-title"),
                microphone_error_text(err),
            ),
        }
    }
}

fn microphone_error_text(err: &MicrophoneError) -> String {
    match err {
        MicrophoneError::PermissionDenied => t!("notice-mic-denied"),
        MicrophoneError::DeviceUnavailable => t!("notice-mic-missing"),
        MicrophoneError::DeviceBusy => t!("notice-mic-busy"),
        MicrophoneError::Unsupported => t!("notice-mic-unsupported"),
        MicrophoneError::Backend(detail) => t!("notice-mic-backend", detail = detail.clone()),
    }
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeBoard {
    items: Vec<Notice>,
}

impl NoticeBoard {
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, notice: Notice) -> Uuid {
        let id = notice.id;
        self.items.push(notice);
        if self.items.len() > MAX_VISIBLE {
            let excess = self.items.len() - MAX_VISIBLE;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}
