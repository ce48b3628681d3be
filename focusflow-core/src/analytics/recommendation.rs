//! "Power hour" recommendation.

/// Shown until there is enough history to recommend anything.
pub const DEFAULT_RECOMMENDATION: &str =
    "Keep completing sessions to unlock smart recommendations.";

/// Completed sessions needed before a power hour is suggested.
pub const MIN_SESSIONS_FOR_RECOMMENDATION: u32 = 5;

/// The hour with the strictly highest count; ties go to the earliest hour.
///
/// Returns `None` when every hour is empty.
pub fn power_hour(hourly: &[u32; 24]) -> Option<u32> {
    let mut best: Option<(u32, u32)> = None;
    for (hour, &count) in hourly.iter().enumerate() {
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((hour as u32, count)),
        }
    }
    best.map(|(hour, _)| hour)
}

/// Format an hour of day on a 12-hour clock (e.g., "1:00 PM").
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{}:00 AM", hour),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}

/// Recommendation text for an hourly distribution of completed sessions.
pub fn recommend(hourly: &[u32; 24]) -> String {
    let total: u32 = hourly.iter().sum();
    if total < MIN_SESSIONS_FOR_RECOMMENDATION {
        return DEFAULT_RECOMMENDATION.to_string();
    }

    match power_hour(hourly) {
        Some(hour) => format!(
            "Your power hour is around {}. Try to schedule important tasks then!",
            format_hour(hour)
        ),
        None => DEFAULT_RECOMMENDATION.to_string(),
    }
}
