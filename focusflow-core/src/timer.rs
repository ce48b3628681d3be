//! Countdown timer model
//!
//! The model only does arithmetic on elapsed time; the caller owns the clock
//! and decides how often to tick.

use crate::config::TimerConfig;
use crate::types::SessionStatus;
use std::time::Duration;

/// Which countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Focus session: blocks sites and is recorded in history
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerKind {
    /// Configured length of this countdown.
    pub fn duration(&self, timers: &TimerConfig) -> Duration {
        let timers = timers.normalized();
        let minutes = match self {
            TimerKind::Work => timers.work,
            TimerKind::ShortBreak => timers.short_break,
            TimerKind::LongBreak => timers.long_break,
        };
        Duration::from_secs(u64::from(minutes) * 60)
    }

    /// Only focus sessions block websites.
    pub fn blocks_sites(&self) -> bool {
        matches!(self, TimerKind::Work)
    }

    /// Only focus sessions are written to the history.
    pub fn is_recorded(&self) -> bool {
        matches!(self, TimerKind::Work)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerKind::Work => "Focus",
            TimerKind::ShortBreak => "Short break",
            TimerKind::LongBreak => "Long break",
        }
    }
}

/// A countdown over a fixed duration.
#[derive(Debug, Clone)]
pub struct Countdown {
    kind: TimerKind,
    total: Duration,
    elapsed: Duration,
}

impl Countdown {
    pub fn new(kind: TimerKind, total: Duration) -> Self {
        Self {
            kind,
            total,
            elapsed: Duration::ZERO,
        }
    }

    /// A countdown of `kind` using the configured duration.
    pub fn from_config(kind: TimerKind, timers: &TimerConfig) -> Self {
        Self::new(kind, kind.duration(timers))
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Set the time elapsed since start. Values past the total are clamped.
    pub fn tick(&mut self, elapsed: Duration) {
        self.elapsed = elapsed.min(self.total);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total
    }

    /// History outcome of stopping now: completed if the countdown reached
    /// zero, interrupted otherwise. `None` for countdowns that aren't recorded.
    pub fn outcome(&self) -> Option<SessionStatus> {
        if !self.kind.is_recorded() {
            return None;
        }
        Some(if self.is_finished() {
            SessionStatus::Completed
        } else {
            SessionStatus::Interrupted
        })
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
