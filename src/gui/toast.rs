//! Short-lived notifications shown under the panel

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Holds at most one toast; a new one replaces the old.
pub struct Toasts {
    current: Option<Toast>,
    duration: Duration,
}

impl Toasts {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let message = message.into();
        tracing::debug!(?kind, %message, "toast");
        self.current = Some(Toast {
            message,
            kind,
            shown_at: now,
        });
    }

    /// The toast still on screen at `now`
    pub fn active(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|t| now.saturating_duration_since(t.shown_at) < self.duration)
    }

    /// Time until the active toast disappears
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active(now)
            .map(|t| self.duration.saturating_sub(now.saturating_duration_since(t.shown_at)))
    }
}
