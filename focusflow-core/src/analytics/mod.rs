//! Analytics module for FocusFlow
//!
//! Derives everything the analytics view shows from the raw session history:
//! - Current streak of days with a completed session
//! - Daily focus score (completed vs interrupted, today only)
//! - Achievement badges
//! - Five-week activity heatmap
//! - "Power hour" recommendation
//!
//! See [`engine::compute_snapshot`] for the single entry point.

pub mod badges;
pub mod day;
pub mod engine;
pub mod heatmap;
pub mod recommendation;

pub use badges::Badge;
pub use day::{day_key, format_day_key, DayBucket, DayBuckets};
pub use engine::{
    completed_today, compute_snapshot, current_streak, focus_score, normalize_history,
    AnalyticsSnapshot, FocusGrade,
};
pub use heatmap::{HeatLevel, HEATMAP_DAYS};
pub use recommendation::DEFAULT_RECOMMENDATION;
