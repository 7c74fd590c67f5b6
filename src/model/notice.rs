//! Transient status-bar notices (toasts)

use ratatui::style::Color;
use std::time::{Duration, Instant};

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn icon(&self) -> &str {
        match self {
            NoticeKind::Success => "✓",
            NoticeKind::Info => "ℹ",
            NoticeKind::Warning => "!",
            NoticeKind::Error => "✗",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NoticeKind::Success => Color::Green,
            NoticeKind::Info => Color::Cyan,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTICE_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expiry() {
        let notice = Notice::info("Sin cambios");
        assert!(!notice.is_expired(notice.shown_at));
        assert!(notice.is_expired(notice.shown_at + NOTICE_TTL));
    }
}
