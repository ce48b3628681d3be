//! Focus and break countdowns in the terminal

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use focusflow_core::analytics::completed_today;
use focusflow_core::timer::format_clock;
use focusflow_core::{Config, Countdown, HistoryStore, HostsBlocker, SessionStatus, TimerKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(250);

/// Run a focus session and record how it ended.
///
/// The blocker is removed again however the countdown ends, including on
/// Ctrl+C, SIGTERM or SIGHUP.
pub fn run_focus(config: &Config, minutes: Option<u32>, block: bool) -> Result<()> {
    let countdown = countdown_for(config, TimerKind::Work, minutes);
    let store = HistoryStore::new(config.history_path());
    let blocker = HostsBlocker::from_config(&config.blocker);

    // Installed before any hosts entry is written
    let running = stop_flag()?;

    if block {
        match blocker.activate() {
            Ok(_) => println!(
                "Blocking {} site(s) until the session ends",
                blocker.sites().len()
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Website blocker unavailable");
                eprintln!("Warning: {}. Continuing without blocking.", e);
            }
        }
    }

    let result = run_countdown(countdown, &running);

    if block {
        if let Err(e) = blocker.deactivate() {
            tracing::warn!(error = %e, "Failed to remove block entries");
            eprintln!("Warning: {}. Run `focusflow unblock` to clean up.", e);
        }
    }

    let countdown = result?;
    let Some(status) = countdown.outcome() else {
        return Ok(());
    };

    store
        .record(status, Utc::now())
        .context("failed to record session")?;

    match status {
        SessionStatus::Completed => {
            let today = completed_today(&store.load_or_empty(), Local::now());
            println!();
            println!("Time for a break!");
            println!("Well done on completing a focus session. Step away from the screen and relax.");
            println!(
                "Completed today: {}. Run `focusflow break` when you're ready.",
                today
            );
        }
        SessionStatus::Interrupted => {
            println!(
                "Session interrupted after {}",
                format_clock(countdown.elapsed())
            );
        }
    }

    Ok(())
}

/// Run a break countdown. Breaks lift any leftover block and are not recorded.
pub fn run_break(config: &Config, kind: TimerKind, minutes: Option<u32>) -> Result<()> {
    if config.blocker.enabled && !kind.blocks_sites() {
        let blocker = HostsBlocker::from_config(&config.blocker);
        if let Err(e) = blocker.deactivate() {
            tracing::warn!(error = %e, "Failed to remove block entries");
            eprintln!("Warning: {}", e);
        }
    }

    let running = stop_flag()?;
    let countdown = run_countdown(countdown_for(config, kind, minutes), &running)?;
    if countdown.is_finished() {
        println!("Break over. Run `focusflow focus` to start the next session.");
    }
    Ok(())
}

/// A countdown of `kind`, `minutes` long if given and non-zero, otherwise
/// the configured length.
fn countdown_for(config: &Config, kind: TimerKind, minutes: Option<u32>) -> Countdown {
    match minutes {
        Some(m) if m > 0 => Countdown::new(kind, Duration::from_secs(u64::from(m) * 60)),
        _ => Countdown::from_config(kind, &config.timers),
    }
}

/// A flag that goes false on Ctrl+C, SIGTERM or SIGHUP.
fn stop_flag() -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        eprintln!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    Ok(running)
}

/// Tick `countdown` against the wall clock until it finishes or `running`
/// goes false.
fn run_countdown(mut countdown: Countdown, running: &AtomicBool) -> Result<Countdown> {
    let label = countdown.kind().label();
    println!(
        "{} started: {}. Press Ctrl+C to stop.",
        label,
        format_clock(countdown.total())
    );

    let pb = ProgressBar::new(countdown.total().as_secs());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .context("invalid progress bar template")?
            .progress_chars("#>-"),
    );

    tracing::info!(
        kind = label,
        secs = countdown.total().as_secs(),
        "Countdown started"
    );

    let started = Instant::now();
    while running.load(Ordering::SeqCst) {
        countdown.tick(started.elapsed());
        pb.set_position(countdown.elapsed().as_secs());
        pb.set_message(format!("{} {} left", label, format_clock(countdown.remaining())));

        if countdown.is_finished() {
            break;
        }
        thread::sleep(TICK);
    }

    if countdown.is_finished() {
        pb.finish_with_message(format!("{} done", label));
    } else {
        pb.abandon_with_message(format!(
            "{} stopped with {} left",
            label,
            format_clock(countdown.remaining())
        ));
    }

    tracing::info!(
        kind = label,
        elapsed_secs = countdown.elapsed().as_secs(),
        finished = countdown.is_finished(),
        "Countdown ended"
    );

    Ok(countdown)
}
