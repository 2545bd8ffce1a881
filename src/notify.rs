//! Fire-and-forget user notifications.

use std::borrow::Cow;
use std::sync::Mutex;

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    /// Something the user must act on, such as a rejected form.
    Destructive,
}

/// A short message for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

impl Notice {
    pub fn info(
        title: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            variant: NoticeVariant::Default,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(
        title: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sink for notices. Delivery is best-effort; nothing is returned.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the tracing log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Default => {
                tracing::info!(title = %notice.title, description = %notice.description, "Notice")
            }
            NoticeVariant::Destructive => {
                tracing::warn!(title = %notice.title, description = %notice.description, "Notice")
            }
        }
    }
}

/// Keeps every notice in memory, for tests and for surfaces that poll.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
