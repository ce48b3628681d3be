//! Core domain types for FocusFlow
//!
//! The history file has carried two record shapes over time:
//!
//! | Shape | Fields | Meaning |
//! |-------|--------|---------|
//! | current | `timestamp` + `status` | session ended at `timestamp` with `status` |
//! | legacy | `completedAt` | a completed session ended at `completedAt` |
//!
//! [`SessionRecord`] accepts both as stored. [`SessionRecord::normalize`] turns
//! either into one canonical [`SessionEvent`] before any analytics run, so no
//! downstream code ever branches on which fields were present.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Session status
// ============================================

/// Outcome of a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Timer ran to zero
    Completed,
    /// Timer was paused or reset before reaching zero
    Interrupted,
}

impl SessionStatus {
    /// Convert to the string stored in the history file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Completed => "completed",
            SessionStatus::Interrupted => "interrupted",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(SessionStatus::Completed),
            "interrupted" => Ok(SessionStatus::Interrupted),
            other => Err(crate::Error::InvalidStatus(other.to_string())),
        }
    }
}

// ============================================
// Stored record
// ============================================

/// One entry of the session history file, exactly as stored.
///
/// Every field is optional because the file may hold legacy entries or
/// entries damaged by hand editing. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session ended (current shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,

    /// When the session completed (legacy shape)
    #[serde(
        default,
        rename = "completedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<serde_json::Value>,

    /// "completed" or "interrupted"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

impl SessionRecord {
    /// Build a record in the current on-disk shape.
    pub fn new(status: SessionStatus, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(serde_json::Value::String(
                at.to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            completed_at: None,
            status: Some(serde_json::Value::String(status.as_str().to_string())),
        }
    }

    /// Resolve the moment this session ended.
    ///
    /// `timestamp` wins over `completedAt`; an unparsable `timestamp` falls
    /// through to `completedAt`.
    pub fn resolved_instant(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_ref()
            .and_then(parse_instant)
            .or_else(|| self.completed_at.as_ref().and_then(parse_instant))
    }

    /// Resolve the session outcome.
    ///
    /// An explicit `status` wins. Without one, a legacy `completedAt` means
    /// completed. An unknown or non-string `status` resolves to nothing.
    pub fn resolved_status(&self) -> Option<SessionStatus> {
        match &self.status {
            Some(value) => value.as_str().and_then(|s| s.parse().ok()),
            None if self.completed_at.is_some() => Some(SessionStatus::Completed),
            None => None,
        }
    }

    /// Normalize into the canonical form, or `None` if the record is malformed.
    pub fn normalize(&self) -> Option<SessionEvent> {
        let at = self.resolved_instant()?;
        let status = self.resolved_status()?;
        Some(SessionEvent { at, status })
    }
}

/// Parse a stored instant: an RFC 3339 string or integer epoch milliseconds.
fn parse_instant(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

// ============================================
// Canonical event
// ============================================

/// A normalized session outcome: one instant, one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvent {
    /// When the session ended
    pub at: DateTime<Utc>,
    /// How it ended
    pub status: SessionStatus,
}

impl SessionEvent {
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> SessionRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_current_shape_normalizes() {
        let event = record(json!({
            "timestamp": "2025-03-10T14:30:00.000Z",
            "status": "interrupted"
        }))
        .normalize()
        .unwrap();

        assert_eq!(event.status, SessionStatus::Interrupted);
        assert_eq!(event.at.to_rfc3339(), "2025-03-10T14:30:00+00:00");
    }

    #[test]
    fn test_legacy_shape_is_completed() {
        let legacy = record(json!({ "completedAt": "2025-03-10T14:30:00.000Z" }));
        let current = record(json!({
            "timestamp": "2025-03-10T14:30:00.000Z",
            "status": "completed"
        }));

        assert_eq!(legacy.normalize(), current.normalize());
        assert!(legacy.normalize().unwrap().is_completed());
    }

    #[test]
    fn test_explicit_status_wins_over_legacy_field() {
        let event = record(json!({
            "completedAt": "2025-03-10T14:30:00Z",
            "status": "interrupted"
        }))
        .normalize()
        .unwrap();
        assert_eq!(event.status, SessionStatus::Interrupted);
    }

    #[test]
    fn test_timestamp_wins_over_completed_at() {
        let event = record(json!({
            "timestamp": "2025-03-11T08:00:00Z",
            "completedAt": "2025-03-10T08:00:00Z"
        }))
        .normalize()
        .unwrap();
        assert_eq!(event.at.to_rfc3339(), "2025-03-11T08:00:00+00:00");
    }

    #[test]
    fn test_epoch_millis_accepted() {
        let event = record(json!({ "completedAt": 1_741_617_000_000i64 }))
            .normalize()
            .unwrap();
        assert_eq!(event.at.timestamp_millis(), 1_741_617_000_000);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        // No instant at all
        assert!(record(json!({ "status": "completed" })).normalize().is_none());
        // Instant but no way to tell the outcome
        assert!(record(json!({ "timestamp": "2025-03-10T14:30:00Z" }))
            .normalize()
            .is_none());
        // Unknown status
        assert!(record(json!({
            "timestamp": "2025-03-10T14:30:00Z",
            "status": "paused"
        }))
        .normalize()
        .is_none());
        // Garbage instant
        assert!(record(json!({ "timestamp": "yesterday", "status": "completed" }))
            .normalize()
            .is_none());
    }

    #[test]
    fn test_new_record_serializes_current_shape() {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
        let value = serde_json::to_value(SessionRecord::new(SessionStatus::Completed, at)).unwrap();
        assert_eq!(
            value,
            json!({ "timestamp": "2025-03-10T14:30:00.000Z", "status": "completed" })
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "completed".parse::<SessionStatus>().unwrap(),
            SessionStatus::Completed
        );
        assert!(matches!(
            "done".parse::<SessionStatus>(),
            Err(crate::Error::InvalidStatus(_))
        ));
    }
}
