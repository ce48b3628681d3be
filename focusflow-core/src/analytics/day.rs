//! Local calendar-day bucketing.
//!
//! Every analytics figure is grouped by the viewer's wall-clock date, never by
//! the UTC date. The timezone is whatever timezone the caller's "now" carries.

use crate::types::SessionEvent;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use std::collections::BTreeMap;

/// Map an instant to its local calendar day.
pub fn day_key<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Map an instant to its local hour of day (0-23).
pub fn local_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> u32 {
    instant.with_timezone(tz).hour()
}

/// Render a day key as `YYYY-MM-DD`.
pub fn format_day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Sessions that ended on one local day, split by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBucket {
    pub completed: Vec<SessionEvent>,
    pub interrupted: Vec<SessionEvent>,
}

/// All events grouped by local day.
#[derive(Debug, Clone, Default)]
pub struct DayBuckets {
    days: BTreeMap<NaiveDate, DayBucket>,
}

impl DayBuckets {
    /// Bucket events by their local day in `tz`.
    pub fn from_events<Tz: TimeZone>(events: &[SessionEvent], tz: &Tz) -> Self {
        let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for event in events {
            let bucket = days.entry(day_key(event.at, tz)).or_default();
            if event.is_completed() {
                bucket.completed.push(*event);
            } else {
                bucket.interrupted.push(*event);
            }
        }
        Self { days }
    }

    pub fn get(&self, day: NaiveDate) -> Option<&DayBucket> {
        self.days.get(&day)
    }

    /// Completed sessions on `day` (0 if the day has no records).
    pub fn completed_on(&self, day: NaiveDate) -> usize {
        self.get(day).map_or(0, |bucket| bucket.completed.len())
    }

    /// Interrupted sessions on `day` (0 if the day has no records).
    pub fn interrupted_on(&self, day: NaiveDate) -> usize {
        self.get(day).map_or(0, |bucket| bucket.interrupted.len())
    }

    /// Completed-session count of the single busiest day.
    pub fn best_day_completed(&self) -> usize {
        self.days
            .values()
            .map(|bucket| bucket.completed.len())
            .max()
            .unwrap_or(0)
    }
}
