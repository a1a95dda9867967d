//! Transient notifications for the view layer.
//!
//! Mutation failures, export refusals and similar non-blocking events are
//! pushed here. The log is a bounded ring buffer with unread tracking while
//! the notice panel is hidden.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

#[cfg(test)]
#[path = "notices_tests.rs"]
mod tests;

/// Default number of notices retained.
pub const DEFAULT_NOTICE_CAPACITY: usize = 50;

/// Severity of a notice. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoticeLevel {
    /// Routine confirmation.
    Info,
    /// Something partly failed.
    Warning,
    /// Something failed.
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// When the notice was raised.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Notice stamped with the current time.
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }
}

/// Bounded log of notices.
#[derive(Debug, Clone)]
pub struct NoticeLog {
    /// Oldest at front, newest at back
    entries: VecDeque<Notice>,
    capacity: usize,
    unread_count: usize,
    unread_max_level: Option<NoticeLevel>,
    visible: bool,
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_CAPACITY)
    }
}

impl NoticeLog {
    /// Create an empty, hidden log retaining at most `capacity` notices.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            unread_count: 0,
            unread_max_level: None,
            visible: false,
        }
    }

    /// Append a notice, evicting the oldest when full.
    ///
    /// While hidden, the notice counts as unread. A zero-capacity log only
    /// tracks unread state.
    pub fn push(&mut self, notice: Notice) {
        if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        if !self.visible {
            self.unread_count += 1;
            self.unread_max_level = Some(match self.unread_max_level {
                None => notice.level,
                Some(existing) => existing.max(notice.level),
            });
        }

        if self.capacity > 0 {
            self.entries.push_back(notice);
        }
    }

    /// Push an info notice.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Info, message));
    }

    /// Push a warning notice.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Warning, message));
    }

    /// Push an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Error, message));
    }

    /// Show or hide the panel. Showing it marks everything read.
    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.unread_count = 0;
            self.unread_max_level = None;
        }
    }

    /// Remove the given notice once the user dismissed it.
    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        self.entries.remove(index)
    }

    /// Drop every notice and reset the unread counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.unread_count = 0;
        self.unread_max_level = None;
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Notices pushed while the panel was hidden.
    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Most severe unread level, if any.
    pub fn unread_max_level(&self) -> Option<NoticeLevel> {
        self.unread_max_level
    }

    /// All notices, oldest to newest.
    pub fn entries(&self) -> &VecDeque<Notice> {
        &self.entries
    }

    /// Most recent notice.
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }
}
