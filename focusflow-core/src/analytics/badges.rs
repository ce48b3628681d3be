//! Achievement badges.
//!
//! Each badge is an independent predicate over the whole completed-session
//! history. Badges never exclude each other.

use serde::{Deserialize, Serialize};

/// Completed sessions before this local hour count as early.
pub const EARLY_BIRD_BEFORE_HOUR: u32 = 9;
/// Completed sessions needed on one day for 5-A-Day.
pub const FIVE_A_DAY_SESSIONS: usize = 5;
/// Completed sessions needed on one day for Marathon Worker.
pub const MARATHON_SESSIONS: usize = 10;
/// Streak length needed for Consistency King.
pub const CONSISTENCY_STREAK_DAYS: u32 = 7;
/// Lifetime completed sessions needed for Focus Master.
pub const FOCUS_MASTER_SESSIONS: usize = 30;

/// An unlockable achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "Early Bird")]
    EarlyBird,
    #[serde(rename = "5-A-Day")]
    FiveADay,
    #[serde(rename = "Marathon Worker")]
    MarathonWorker,
    #[serde(rename = "Consistency King")]
    ConsistencyKing,
    #[serde(rename = "Focus Master")]
    FocusMaster,
}

impl Badge {
    /// All badges, in evaluation order.
    pub const ALL: [Badge; 5] = [
        Badge::EarlyBird,
        Badge::FiveADay,
        Badge::MarathonWorker,
        Badge::ConsistencyKing,
        Badge::FocusMaster,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Badge::EarlyBird => "Early Bird",
            Badge::FiveADay => "5-A-Day",
            Badge::MarathonWorker => "Marathon Worker",
            Badge::ConsistencyKing => "Consistency King",
            Badge::FocusMaster => "Focus Master",
        }
    }

    /// What it takes to earn the badge.
    pub fn description(&self) -> &'static str {
        match self {
            Badge::EarlyBird => "Complete a session before 9 AM",
            Badge::FiveADay => "Complete 5 sessions in a single day",
            Badge::MarathonWorker => "Complete 10 sessions in a single day",
            Badge::ConsistencyKing => "Keep a 7 day streak",
            Badge::FocusMaster => "Complete 30 sessions in total",
        }
    }

    fn is_earned(&self, facts: &BadgeFacts) -> bool {
        match self {
            Badge::EarlyBird => facts.has_early_session,
            Badge::FiveADay => facts.best_day_completed >= FIVE_A_DAY_SESSIONS,
            Badge::MarathonWorker => facts.best_day_completed >= MARATHON_SESSIONS,
            Badge::ConsistencyKing => facts.streak >= CONSISTENCY_STREAK_DAYS,
            Badge::FocusMaster => facts.total_completed >= FOCUS_MASTER_SESSIONS,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// History-wide facts the badge predicates read.
#[derive(Debug, Clone, Default)]
pub struct BadgeFacts {
    /// Any completed session ended before [`EARLY_BIRD_BEFORE_HOUR`] local time
    pub has_early_session: bool,
    /// Completed sessions on the single busiest day
    pub best_day_completed: usize,
    /// Current streak in days
    pub streak: u32,
    /// Completed sessions across all history
    pub total_completed: usize,
}

/// Every badge the facts qualify for.
pub fn evaluate(facts: &BadgeFacts) -> Vec<Badge> {
    Badge::ALL
        .iter()
        .copied()
        .filter(|badge| badge.is_earned(facts))
        .collect()
}
