//! Snapshot computation.
//!
//! ```text
//!  history (SessionRecord, any shape)
//!        │ normalize, drop malformed
//!        ▼
//!  SessionEvent ──► DayBuckets (local day) ──► streak, focus score, heatmap
//!        │                                          │
//!        └──► hourly distribution ──► power hour    ▼
//!                                             badges
//! ```
//!
//! The engine is pure: no clock reads, no I/O, no shared state. "Now" is a
//! parameter and its timezone defines the local day.

use super::badges::{self, Badge, BadgeFacts, EARLY_BIRD_BEFORE_HOUR};
use super::day::{self, DayBuckets};
use super::heatmap;
use super::recommendation::{self, DEFAULT_RECOMMENDATION};
use crate::types::{SessionEvent, SessionRecord};
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the analytics view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Consecutive local days, ending today, with a completed session
    pub streak: u32,
    /// Today's completed share of all sessions, 0-100
    pub focus_score: u8,
    /// Every badge earned
    pub badges: Vec<Badge>,
    /// Completed sessions per day over the trailing window
    pub heatmap_data: BTreeMap<NaiveDate, u32>,
    /// Power-hour suggestion or the default hint
    pub recommendation: String,
}

impl AnalyticsSnapshot {
    /// The zero state shown to a new user.
    pub fn empty() -> Self {
        Self {
            streak: 0,
            focus_score: 0,
            badges: Vec::new(),
            heatmap_data: BTreeMap::new(),
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
        }
    }

    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    pub fn focus_grade(&self) -> FocusGrade {
        FocusGrade::from_score(self.focus_score)
    }
}

impl Default for AnalyticsSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Qualitative band of the daily focus score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusGrade {
    /// No sessions today
    None,
    Poor,
    Average,
    Good,
    Excellent,
}

impl FocusGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => FocusGrade::Excellent,
            70..=89 => FocusGrade::Good,
            50..=69 => FocusGrade::Average,
            1..=49 => FocusGrade::Poor,
            0 => FocusGrade::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusGrade::None => "no sessions yet",
            FocusGrade::Poor => "poor",
            FocusGrade::Average => "average",
            FocusGrade::Good => "good",
            FocusGrade::Excellent => "excellent",
        }
    }
}

/// Normalize stored records, dropping the malformed ones.
pub fn normalize_history(history: &[SessionRecord]) -> Vec<SessionEvent> {
    let events: Vec<SessionEvent> = history
        .iter()
        .filter_map(SessionRecord::normalize)
        .collect();

    let dropped = history.len() - events.len();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            total = history.len(),
            "Skipped malformed session records"
        );
    }

    events
}

/// Compute the analytics snapshot for `history` as seen at `now`.
pub fn compute_snapshot<Tz: TimeZone>(
    history: &[SessionRecord],
    now: DateTime<Tz>,
) -> AnalyticsSnapshot {
    let tz = now.timezone();
    let today = now.date_naive();

    let events = normalize_history(history);
    if events.is_empty() {
        return AnalyticsSnapshot::empty();
    }

    let buckets = DayBuckets::from_events(&events, &tz);
    let streak = current_streak(&buckets, today);
    let focus_score = focus_score(buckets.completed_on(today), buckets.interrupted_on(today));

    let completed: Vec<&SessionEvent> = events.iter().filter(|e| e.is_completed()).collect();
    let hourly = hourly_distribution(&completed, &tz);

    let facts = BadgeFacts {
        has_early_session: hourly[..EARLY_BIRD_BEFORE_HOUR as usize]
            .iter()
            .any(|&count| count > 0),
        best_day_completed: buckets.best_day_completed(),
        streak,
        total_completed: completed.len(),
    };

    let snapshot = AnalyticsSnapshot {
        streak,
        focus_score,
        badges: badges::evaluate(&facts),
        heatmap_data: heatmap::build(&buckets, today),
        recommendation: recommendation::recommend(&hourly),
    };

    tracing::trace!(
        events = events.len(),
        completed = completed.len(),
        streak = snapshot.streak,
        focus_score = snapshot.focus_score,
        "Computed analytics snapshot"
    );

    snapshot
}

/// Completed sessions on the local day of `now`.
pub fn completed_today<Tz: TimeZone>(history: &[SessionRecord], now: DateTime<Tz>) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();
    normalize_history(history)
        .iter()
        .filter(|event| event.is_completed() && day::day_key(event.at, &tz) == today)
        .count()
}

/// Consecutive days ending at `today` with at least one completed session.
///
/// A day with only interrupted sessions breaks the streak, today included.
pub fn current_streak(buckets: &DayBuckets, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        if buckets.completed_on(current) == 0 {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

/// `round(100 * completed / (completed + interrupted))`, halves rounding up.
pub fn focus_score(completed: usize, interrupted: usize) -> u8 {
    let total = completed + interrupted;
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u8
}

/// Completed sessions per local hour of day.
fn hourly_distribution<Tz: TimeZone>(completed: &[&SessionEvent], tz: &Tz) -> [u32; 24] {
    let mut hourly = [0u32; 24];
    for event in completed {
        hourly[day::local_hour(event.at, tz) as usize] += 1;
    }
    hourly
}
