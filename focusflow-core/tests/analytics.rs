//! End-to-end tests for the analytics snapshot
//!
//! All tests run in a fixed UTC+02:00 zone with a fixed "now", so day and hour
//! boundaries are the local ones and never depend on the machine running them.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, SecondsFormat, TimeZone, Utc};
use focusflow_core::analytics::{compute_snapshot, AnalyticsSnapshot, DEFAULT_RECOMMENDATION};
use focusflow_core::{Badge, HistoryStore, SessionRecord, SessionStatus};
use serde_json::json;
use tempfile::TempDir;

fn zone() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// 2025-03-15 18:00 local
fn now() -> DateTime<FixedOffset> {
    zone().with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    now().date_naive()
}

/// Instant at local `hour:minute`, `days_ago` days before today.
fn local(days_ago: u64, hour: u32, minute: u32) -> DateTime<Utc> {
    let date = today().checked_sub_days(Days::new(days_ago)).unwrap();
    zone()
        .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

fn completed(at: DateTime<Utc>) -> SessionRecord {
    SessionRecord::new(SessionStatus::Completed, at)
}

fn interrupted(at: DateTime<Utc>) -> SessionRecord {
    SessionRecord::new(SessionStatus::Interrupted, at)
}

// ============================================
// Zero state
// ============================================

#[test]
fn empty_history_is_zero_state() {
    let snapshot = compute_snapshot(&[], now());
    assert_eq!(snapshot, AnalyticsSnapshot::empty());

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(
        value,
        json!({
            "streak": 0,
            "focusScore": 0,
            "badges": [],
            "heatmapData": {},
            "recommendation": DEFAULT_RECOMMENDATION,
        })
    );
}

#[test]
fn only_malformed_records_is_zero_state() {
    let history: Vec<SessionRecord> = serde_json::from_value(json!([
        { "status": "completed" },
        { "timestamp": "not a date", "status": "completed" },
        {}
    ]))
    .unwrap();

    assert_eq!(compute_snapshot(&history, now()), AnalyticsSnapshot::empty());
}

// ============================================
// Streak
// ============================================

#[test]
fn streak_counts_consecutive_days_back_from_today() {
    let history = vec![
        completed(local(0, 10, 0)),
        completed(local(1, 10, 0)),
        completed(local(2, 10, 0)),
        // gap at 3 days ago
        completed(local(4, 10, 0)),
        completed(local(5, 10, 0)),
    ];

    assert_eq!(compute_snapshot(&history, now()).streak, 3);
}

#[test]
fn interrupted_only_day_breaks_streak() {
    let history = vec![
        completed(local(0, 10, 0)),
        interrupted(local(1, 10, 0)),
        interrupted(local(1, 11, 0)),
        completed(local(2, 10, 0)),
    ];
    assert_eq!(compute_snapshot(&history, now()).streak, 1);
}

#[test]
fn no_completed_session_today_means_no_streak() {
    let history = vec![
        interrupted(local(0, 9, 30)),
        completed(local(1, 10, 0)),
        completed(local(2, 10, 0)),
    ];
    assert_eq!(compute_snapshot(&history, now()).streak, 0);
}

// ============================================
// Focus score
// ============================================

#[test]
fn focus_score_uses_today_only() {
    let history = vec![
        completed(local(0, 9, 0)),
        completed(local(0, 10, 0)),
        completed(local(0, 11, 0)),
        interrupted(local(0, 12, 0)),
        // yesterday's interruptions have no effect
        interrupted(local(1, 9, 0)),
        interrupted(local(1, 10, 0)),
    ];
    assert_eq!(compute_snapshot(&history, now()).focus_score, 75);
}

#[test]
fn focus_score_is_zero_without_sessions_today() {
    let history = vec![completed(local(1, 9, 0))];
    assert_eq!(compute_snapshot(&history, now()).focus_score, 0);
}

// ============================================
// Badges
// ============================================

#[test]
fn marathon_day_earns_both_volume_badges() {
    let history: Vec<_> = (0..10).map(|i| completed(local(2, 10, i * 5))).collect();
    let snapshot = compute_snapshot(&history, now());

    assert!(snapshot.has_badge(Badge::FiveADay));
    assert!(snapshot.has_badge(Badge::MarathonWorker));
    assert!(!snapshot.has_badge(Badge::FocusMaster));
    assert!(!snapshot.has_badge(Badge::EarlyBird));
}

#[test]
fn thirty_sessions_spread_thin_earn_focus_master() {
    // One session every other day: no volume day, no long streak
    let history: Vec<_> = (0..30).map(|i| completed(local(i * 2, 15, 0))).collect();
    let snapshot = compute_snapshot(&history, now());

    assert_eq!(snapshot.badges, vec![Badge::FocusMaster]);
    assert_eq!(snapshot.streak, 1);
}

#[test]
fn seven_day_streak_earns_consistency_king() {
    let history: Vec<_> = (0..7).map(|i| completed(local(i, 20, 0))).collect();
    let snapshot = compute_snapshot(&history, now());

    assert_eq!(snapshot.streak, 7);
    assert_eq!(snapshot.badges, vec![Badge::ConsistencyKing]);
}

#[test]
fn early_bird_uses_local_hour() {
    // 08:59 local is 06:59 UTC
    let early = vec![completed(local(3, 8, 59))];
    assert!(compute_snapshot(&early, now()).has_badge(Badge::EarlyBird));

    // 09:30 local is 07:30 UTC: early in UTC, not locally
    let not_early = vec![completed(local(3, 9, 30))];
    assert!(!compute_snapshot(&not_early, now()).has_badge(Badge::EarlyBird));

    // Interrupted early sessions do not count
    let interrupted_early = vec![interrupted(local(3, 6, 0))];
    assert!(!compute_snapshot(&interrupted_early, now()).has_badge(Badge::EarlyBird));
}

// ============================================
// Heatmap
// ============================================

#[test]
fn heatmap_always_covers_35_days_ending_today() {
    let history = vec![completed(local(100, 12, 0)), completed(local(0, 12, 0))];
    let heatmap = compute_snapshot(&history, now()).heatmap_data;

    assert_eq!(heatmap.len(), 35);
    let first = *heatmap.keys().next().unwrap();
    let last = *heatmap.keys().next_back().unwrap();
    assert_eq!(last, today());
    assert_eq!(first, today().checked_sub_days(Days::new(34)).unwrap());
    assert_eq!(heatmap[&today()], 1);
}

#[test]
fn heatmap_counts_completed_sessions_only() {
    let history = vec![
        completed(local(1, 10, 0)),
        completed(local(1, 11, 0)),
        interrupted(local(1, 12, 0)),
        interrupted(local(2, 12, 0)),
    ];
    let heatmap = compute_snapshot(&history, now()).heatmap_data;
    let yesterday = today().pred_opt().unwrap();

    assert_eq!(heatmap[&yesterday], 2);
    assert_eq!(heatmap[&yesterday.pred_opt().unwrap()], 0);
}

#[test]
fn heatmap_keys_serialize_as_local_dates() {
    let history = vec![completed(local(0, 0, 30))];
    let value = serde_json::to_value(compute_snapshot(&history, now())).unwrap();
    assert_eq!(value["heatmapData"]["2025-03-15"], json!(1));
    assert_eq!(value["heatmapData"]["2025-03-14"], json!(0));
}

#[test]
fn sessions_straddling_local_midnight_are_different_days() {
    let history = vec![completed(local(1, 23, 55)), completed(local(0, 0, 5))];
    let snapshot = compute_snapshot(&history, now());
    let yesterday = today().pred_opt().unwrap();

    assert_eq!(snapshot.heatmap_data[&yesterday], 1);
    assert_eq!(snapshot.heatmap_data[&today()], 1);
    assert_eq!(snapshot.streak, 2);
}

// ============================================
// Recommendation
// ============================================

#[test]
fn power_hour_tie_goes_to_earliest_hour() {
    let mut history = Vec::new();
    for i in 0..3 {
        history.push(completed(local(i, 14, 10)));
        history.push(completed(local(i, 9, 10)));
    }
    history.push(completed(local(0, 17, 0)));

    assert_eq!(
        compute_snapshot(&history, now()).recommendation,
        "Your power hour is around 9:00 AM. Try to schedule important tasks then!"
    );
}

#[test]
fn recommendation_needs_five_completed_sessions() {
    let mut history: Vec<_> = (0..4).map(|i| completed(local(i, 13, 0))).collect();
    history.push(interrupted(local(0, 13, 30)));
    assert_eq!(
        compute_snapshot(&history, now()).recommendation,
        DEFAULT_RECOMMENDATION
    );

    history.push(completed(local(5, 13, 0)));
    assert_eq!(
        compute_snapshot(&history, now()).recommendation,
        "Your power hour is around 1:00 PM. Try to schedule important tasks then!"
    );
}

// ============================================
// Legacy records
// ============================================

#[test]
fn legacy_completed_at_counts_like_current_record() {
    let at = local(0, 8, 0);
    let legacy: Vec<SessionRecord> = serde_json::from_value(json!([
        { "completedAt": at.to_rfc3339_opts(SecondsFormat::Millis, true) }
    ]))
    .unwrap();
    let current = vec![completed(at)];

    let legacy_snapshot = compute_snapshot(&legacy, now());
    assert_eq!(legacy_snapshot, compute_snapshot(&current, now()));
    assert_eq!(legacy_snapshot.streak, 1);
    assert!(legacy_snapshot.has_badge(Badge::EarlyBird));
}

#[test]
fn mixed_history_from_disk() {
    focusflow_core::logging::init_test();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analytics.json");
    std::fs::write(
        &path,
        r#"[
  { "completedAt": "2025-03-14T08:00:00.000Z" },
  { "timestamp": "2025-03-15T07:00:00.000Z", "status": "completed" },
  { "timestamp": "2025-03-15T08:00:00.000Z", "status": "interrupted" },
  { "note": "no time at all" }
]"#,
    )
    .unwrap();

    let store = HistoryStore::new(&path);
    let report = store.report(now());

    assert_eq!(report.sessions.len(), 4);
    assert_eq!(report.stats.streak, 2);
    assert_eq!(report.stats.focus_score, 50);
    assert_eq!(report.stats.heatmap_data[&today()], 1);
}
