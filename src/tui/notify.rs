use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Transient messages shown in the status row. A new notice replaces the
/// previous one.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notify_at(kind, message, Instant::now());
    }

    pub fn notify_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NoticeKind::Error, message);
    }

    /// The visible notice at `now`, if it has not expired
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < NOTICE_TTL)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// Drop an expired notice. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.current_at(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
