//! # focusflow-core
//!
//! Core library for FocusFlow - a Pomodoro-style focus timer that blocks
//! distracting websites and keeps a history of every focus session.
//!
//! This library provides:
//! - Domain types for session records, legacy and current
//! - The append-only session history store (a JSON file)
//! - The analytics engine: streak, focus score, badges, heatmap, power hour
//! - Configuration management and logging infrastructure
//! - The hosts-file website blocker and the countdown timer model
//!
//! ## Data flow
//!
//! - Session outcomes are appended to the [`HistoryStore`]
//! - On read, the full history is loaded and handed to
//!   [`analytics::compute_snapshot`] together with the caller's "now"
//! - The resulting [`AnalyticsSnapshot`] is rendered by the CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use focusflow_core::{Config, HistoryStore, SessionStatus};
//!
//! let config = Config::load().expect("failed to load config");
//! let store = HistoryStore::new(config.history_path());
//!
//! store
//!     .record(SessionStatus::Completed, chrono::Utc::now())
//!     .expect("failed to record session");
//!
//! let snapshot = store.snapshot(chrono::Local::now());
//! println!("streak: {} days", snapshot.streak);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_snapshot, AnalyticsSnapshot, Badge};
pub use blocker::HostsBlocker;
pub use config::Config;
pub use error::{Error, Result};
pub use history::{AnalyticsReport, HistoryStore};
pub use timer::{Countdown, TimerKind};
pub use types::*;

// Public modules
pub mod analytics;
pub mod blocker;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod timer;
pub mod types;
