//! focusflow - Pomodoro focus timer
//!
//! Runs focus and break countdowns, blocks distracting websites through the
//! hosts file while a focus session runs, and reports session analytics.

mod report;
mod session;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use focusflow_core::config::BlockerConfig;
use focusflow_core::{Config, HistoryStore, HostsBlocker, SessionStatus, TimerKind};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "focusflow")]
#[command(about = "Focus timer with website blocking and session analytics")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a focus session, blocking websites until it ends
    Focus {
        /// Session length in minutes (default: from config)
        #[arg(long)]
        minutes: Option<u32>,

        /// Leave websites unblocked for this session
        #[arg(long)]
        no_block: bool,
    },

    /// Run a break countdown
    Break {
        /// Take a long break instead of a short one
        #[arg(long)]
        long: bool,

        /// Break length in minutes (default: from config)
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Record a session outcome without running the timer
    Log {
        /// Session outcome: completed or interrupted
        status: String,

        /// When the session ended (RFC 3339, default: now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Show streak, focus score, badges, heatmap and recommendation
    Stats {
        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },

    /// Block the configured websites now
    Block,

    /// Remove every block entry from the hosts file
    Unblock,

    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Replace the block list with the sites in FILE, one per line
    Sites {
        /// Text file with one hostname per line; `#` starts a comment line
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;

    let _log_guard = focusflow_core::logging::init(&config.logging)
        .context("failed to initialize logging")?;

    tracing::debug!(command = ?args.command, "focusflow starting");

    match args.command {
        Command::Focus { minutes, no_block } => {
            session::run_focus(&config, minutes, !no_block && config.blocker.enabled)
        }
        Command::Break { long, minutes } => {
            let kind = if long {
                TimerKind::LongBreak
            } else {
                TimerKind::ShortBreak
            };
            session::run_break(&config, kind, minutes)
        }
        Command::Log { status, at } => log_session(&config, &status, at.as_deref()),
        Command::Stats { export } => show_stats(&config, export.as_deref()),
        Command::Block => {
            let blocker = HostsBlocker::from_config(&config.blocker);
            let added = blocker.activate().context("failed to block websites")?;
            println!(
                "Blocking {} site(s) in {} ({} newly added)",
                blocker.sites().len(),
                blocker.hosts_path().display(),
                added
            );
            Ok(())
        }
        Command::Unblock => {
            let blocker = HostsBlocker::from_config(&config.blocker);
            blocker
                .deactivate()
                .context("failed to unblock websites")?;
            println!("Websites unblocked");
            Ok(())
        }
        Command::Config { action } => run_config(config, action),
    }
}

fn log_session(config: &Config, status: &str, at: Option<&str>) -> Result<()> {
    let status: SessionStatus = status
        .parse()
        .context("status must be 'completed' or 'interrupted'")?;

    let at = match at {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid timestamp: {}", text))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let store = HistoryStore::new(config.history_path());
    store
        .record(status, at)
        .context("failed to record session")?;

    println!(
        "Recorded {} session at {}",
        status,
        at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

fn show_stats(config: &Config, export: Option<&str>) -> Result<()> {
    let store = HistoryStore::new(config.history_path());
    let now = Local::now();
    let report = store.report(now);

    match export {
        Some("json") => report::print_json(&report)?,
        Some("md") => report::print_markdown(&report, now),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => report::print_terminal(&report, now),
    }

    Ok(())
}

fn run_config(mut config: Config, action: ConfigAction) -> Result<()> {
    let path = Config::config_path();

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite",
                    path.display()
                );
            }
            Config::default()
                .save_to(&path)
                .context("failed to write config file")?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let rendered = config
                .to_toml()
                .context("failed to render configuration")?;
            println!("# {}", path.display());
            println!("# history: {}", config.history_path().display());
            println!("# log: {}", focusflow_core::logging::log_file_path().display());
            println!();
            print!("{}", rendered);
        }
        ConfigAction::Sites { file } => {
            config.blocker.sites = read_sites(&file)?;
            config
                .save_to(&path)
                .context("failed to write config file")?;
            println!(
                "Block list updated: {} site(s) saved to {}",
                config.blocker.sites.len(),
                path.display()
            );
        }
    }

    Ok(())
}

fn read_sites(file: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let sites = BlockerConfig::parse_sites(&text);
    if sites.is_empty() {
        anyhow::bail!("{} lists no sites", file.display());
    }
    Ok(sites)
}
