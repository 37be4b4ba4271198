//! Transient status messages. At most one is on screen at a time.
//!
//! The centre is a plain state machine driven by explicit timestamps; the
//! Dioxus side ([`toast`]) only schedules `tick` calls and renders.

pub mod toast;

use std::time::Duration;

use tracing::info;

use crate::core::timing::InstantStamp;

pub use toast::{notify, NotificationHost};

/// How long a notification stays fully visible.
pub const AUTO_DISMISS: Duration = Duration::from_secs(5);
/// Length of the exit transition before removal.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "info-circle",
            Severity::Success => "check-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Error => "exclamation-circle",
        }
    }

    /// Glyph drawn inside the icon badge.
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Info => "i",
            Severity::Success => "✓",
            Severity::Warning => "!",
            Severity::Error => "×",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Shown,
    Leaving { since: InstantStamp },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub shown_at: InstantStamp,
    pub phase: Phase,
}

impl Notification {
    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, Phase::Leaving { .. })
    }
}

#[derive(Debug, Default, Clone)]
pub struct NotificationCenter {
    next_id: u64,
    entries: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, evicting everything currently on screen.
    pub fn present(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: InstantStamp,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let message = message.into();
        info!("notification [{}] {message}", severity.as_str());

        self.entries.clear();
        self.entries.push(Notification {
            id,
            message,
            severity,
            shown_at: now,
            phase: Phase::Shown,
        });
        id
    }

    /// Start the exit transition for `id`. Unknown or already-leaving ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId, now: InstantStamp) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|n| n.id == id && !n.is_leaving())
        {
            Some(entry) => {
                entry.phase = Phase::Leaving { since: now };
                true
            }
            None => false,
        }
    }

    /// Advance lifetimes: expire shown entries, drop finished exits.
    pub fn tick(&mut self, now: InstantStamp) {
        for entry in &mut self.entries {
            if entry.phase == Phase::Shown && now.since(entry.shown_at) >= AUTO_DISMISS {
                entry.phase = Phase::Leaving {
                    since: entry.shown_at.after(AUTO_DISMISS),
                };
            }
        }
        self.entries.retain(|entry| match entry.phase {
            Phase::Shown => true,
            Phase::Leaving { since } => now.since(since) < EXIT_TRANSITION,
        });
    }

    /// Notifications not yet on their way out.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(|n| !n.is_leaving())
    }

    /// Everything still in the DOM, including exiting entries.
    pub fn rendered(&self) -> &[Notification] {
        &self.entries
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }
}
