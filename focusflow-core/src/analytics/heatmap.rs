//! Trailing five-week activity heatmap.

use super::day::DayBuckets;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Number of days shown, ending today (five weeks).
pub const HEATMAP_DAYS: u64 = 35;

/// The heatmap window ending at `today`, oldest first.
pub fn window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..HEATMAP_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Completed-session count for every day in the window.
///
/// Days without records are present with a count of 0. Interrupted sessions
/// never add intensity.
pub fn build(buckets: &DayBuckets, today: NaiveDate) -> BTreeMap<NaiveDate, u32> {
    window(today)
        .into_iter()
        .map(|day| (day, buckets.completed_on(day) as u32))
        .collect()
}

/// Intensity class of one heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl HeatLevel {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => HeatLevel::None,
            1..=2 => HeatLevel::Low,
            3..=4 => HeatLevel::Medium,
            5..=6 => HeatLevel::High,
            _ => HeatLevel::VeryHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatLevel::None => "none",
            HeatLevel::Low => "low",
            HeatLevel::Medium => "medium",
            HeatLevel::High => "high",
            HeatLevel::VeryHigh => "very-high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionEvent, SessionStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_window_is_35_days_ending_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let days = window(today);
        assert_eq!(days.len(), 35);
        assert_eq!(days.last(), Some(&today));
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 1, 26).unwrap());
    }

    #[test]
    fn test_build_fills_gaps_and_ignores_old_days() {
        let events = vec![
            SessionEvent {
                at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
                status: SessionStatus::Completed,
            },
            SessionEvent {
                at: Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).unwrap(),
                status: SessionStatus::Interrupted,
            },
            SessionEvent {
                // Well outside the window
                at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
                status: SessionStatus::Completed,
            },
        ];
        let buckets = DayBuckets::from_events(&events, &Utc);
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let heatmap = build(&buckets, today);
        assert_eq!(heatmap.len(), 35);
        assert_eq!(heatmap[&today], 1);
        assert_eq!(heatmap[&NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()], 0);
        assert!(!heatmap.contains_key(&NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
    }

    #[test]
    fn test_heat_levels() {
        assert_eq!(HeatLevel::from_count(0), HeatLevel::None);
        assert_eq!(HeatLevel::from_count(2), HeatLevel::Low);
        assert_eq!(HeatLevel::from_count(3), HeatLevel::Medium);
        assert_eq!(HeatLevel::from_count(6), HeatLevel::High);
        assert_eq!(HeatLevel::from_count(7), HeatLevel::VeryHigh);
        assert_eq!(HeatLevel::VeryHigh.as_str(), "very-high");
    }
}
