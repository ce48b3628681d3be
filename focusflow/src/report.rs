//! Rendering of the analytics report: terminal, Markdown and JSON.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use focusflow_core::analytics::{completed_today, heatmap, HeatLevel};
use focusflow_core::{AnalyticsReport, Badge};

const WIDTH: usize = 50;

pub fn print_terminal(report: &AnalyticsReport, now: DateTime<Local>) {
    let stats = &report.stats;
    let today = completed_today(&report.sessions, now);

    println!();
    println!("╭{}╮", "─".repeat(WIDTH));
    println!("│{:^width$}│", "FOCUSFLOW ANALYTICS", width = WIDTH);
    println!("╰{}╯", "─".repeat(WIDTH));
    println!();

    println!("   Streak:          {} day(s)", stats.streak);
    println!("   Completed today: {}", today);
    println!(
        "   Focus score:     {}% ({})",
        stats.focus_score,
        stats.focus_grade().label()
    );
    println!();

    println!("BADGES");
    if stats.badges.is_empty() {
        println!("   None yet");
    }
    for badge in Badge::ALL {
        if stats.has_badge(badge) {
            println!("   ★ {:<18} {}", badge.name(), badge.description());
        }
    }
    println!();

    println!("LAST 5 WEEKS");
    for (start, counts) in heatmap_rows(report, now.date_naive()) {
        let cells: Vec<&str> = counts
            .iter()
            .map(|&count| glyph(HeatLevel::from_count(count)))
            .collect();
        println!("   {}  {}", start.format("%b %d"), cells.join(" "));
    }
    println!("   · none  ░ 1-2  ▒ 3-4  ▓ 5-6  █ 7+");
    println!();

    println!("RECOMMENDATION");
    println!("   {}", stats.recommendation);
    println!();
}

pub fn print_markdown(report: &AnalyticsReport, now: DateTime<Local>) {
    let stats = &report.stats;

    println!("# FocusFlow Analytics");
    println!();
    println!("*Generated {}*", now.format("%Y-%m-%d %H:%M"));
    println!();

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Streak | {} day(s) |", stats.streak);
    println!(
        "| Completed Today | {} |",
        completed_today(&report.sessions, now)
    );
    println!(
        "| Focus Score | {}% ({}) |",
        stats.focus_score,
        stats.focus_grade().label()
    );
    println!("| Sessions Recorded | {} |", report.sessions.len());
    println!();

    println!("## Badges");
    println!();
    for badge in Badge::ALL {
        let mark = if stats.has_badge(badge) { "x" } else { " " };
        println!("- [{}] **{}**: {}", mark, badge.name(), badge.description());
    }
    println!();

    println!("## Activity (completed sessions per day)");
    println!();
    println!("| Week of | D1 | D2 | D3 | D4 | D5 | D6 | D7 |");
    println!("|---------|----|----|----|----|----|----|----|");
    for (start, counts) in heatmap_rows(report, now.date_naive()) {
        let cells: Vec<String> = counts.iter().map(u32::to_string).collect();
        println!("| {} | {} |", start.format("%Y-%m-%d"), cells.join(" | "));
    }
    println!();

    println!("## Recommendation");
    println!();
    println!("> {}", stats.recommendation);
}

pub fn print_json(report: &AnalyticsReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// The heatmap window as weeks: each row's first day and its seven counts.
fn heatmap_rows(report: &AnalyticsReport, today: NaiveDate) -> Vec<(NaiveDate, Vec<u32>)> {
    let days = heatmap::window(today);
    days.chunks(7)
        .filter_map(|week| {
            let start = *week.first()?;
            let counts = week
                .iter()
                .map(|day| report.stats.heatmap_data.get(day).copied().unwrap_or(0))
                .collect();
            Some((start, counts))
        })
        .collect()
}

fn glyph(level: HeatLevel) -> &'static str {
    match level {
        HeatLevel::None => "·",
        HeatLevel::Low => "░",
        HeatLevel::Medium => "▒",
        HeatLevel::High => "▓",
        HeatLevel::VeryHigh => "█",
    }
}
