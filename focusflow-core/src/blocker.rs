//! Hosts-file website blocker
//!
//! During a focus session every blocked site is pointed at the redirect
//! address by appending lines to the OS hosts file:
//!
//! ```text
//! # FocusFlow - Blocked websites
//! 127.0.0.1 youtube.com
//! 127.0.0.1 www.youtube.com
//! ```
//!
//! Unblocking removes the marker and every redirect line that mentions a
//! configured site, leaving the rest of the file alone. Editing the hosts file
//! usually needs administrator rights.

use crate::config::BlockerConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Comment line written above the entries this module adds.
pub const BLOCK_MARKER: &str = "# FocusFlow - Blocked websites";
const MARKER_PREFIX: &str = "# FocusFlow";

/// Adds and removes redirect entries in a hosts file.
#[derive(Debug, Clone)]
pub struct HostsBlocker {
    hosts_path: PathBuf,
    redirect_ip: String,
    sites: Vec<String>,
}

impl HostsBlocker {
    pub fn new(
        hosts_path: impl Into<PathBuf>,
        redirect_ip: impl Into<String>,
        sites: Vec<String>,
    ) -> Self {
        Self {
            hosts_path: hosts_path.into(),
            redirect_ip: redirect_ip.into(),
            sites,
        }
    }

    pub fn from_config(config: &BlockerConfig) -> Self {
        Self::new(
            config.hosts_path.clone(),
            config.redirect_ip.clone(),
            config.sites.clone(),
        )
    }

    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    fn entry(&self, site: &str) -> String {
        format!("{} {}", self.redirect_ip, site)
    }

    /// Sites whose redirect entry is not yet in `content`.
    pub fn missing_sites<'a>(&'a self, content: &str) -> Vec<&'a str> {
        self.sites
            .iter()
            .map(String::as_str)
            .filter(|site| !content.contains(&self.entry(site)))
            .collect()
    }

    /// Whether every configured site is already redirected in `content`.
    pub fn is_active(&self, content: &str) -> bool {
        self.missing_sites(content).is_empty()
    }

    /// `content` with redirect entries appended for every missing site, or
    /// `None` if nothing is missing.
    pub fn block_entries(&self, content: &str) -> Option<String> {
        let missing = self.missing_sites(content);
        if missing.is_empty() {
            return None;
        }

        let mut updated = content.to_string();
        updated.push('\n');
        updated.push_str(BLOCK_MARKER);
        updated.push('\n');
        for site in missing {
            updated.push_str(&self.entry(site));
            updated.push('\n');
        }
        Some(updated)
    }

    /// `content` without the marker lines and without redirect lines that
    /// mention any configured site.
    pub fn unblock_entries(&self, content: &str) -> String {
        content
            .split('\n')
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.starts_with(MARKER_PREFIX) {
                    return false;
                }
                if trimmed.starts_with(self.redirect_ip.as_str()) {
                    return !self.sites.iter().any(|site| trimmed.contains(site.as_str()));
                }
                true
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Add redirect entries to the hosts file.
    ///
    /// Returns the number of sites newly blocked.
    pub fn activate(&self) -> Result<usize> {
        let content = self.read_hosts()?;
        let added = self.missing_sites(&content).len();

        match self.block_entries(&content) {
            Some(updated) => {
                self.write_hosts(&updated)?;
                tracing::info!(
                    hosts = %self.hosts_path.display(),
                    added,
                    "Website blocker activated"
                );
            }
            None => tracing::info!("Website blocker already active"),
        }

        Ok(added)
    }

    /// Remove every entry this blocker could have added.
    pub fn deactivate(&self) -> Result<()> {
        let content = self.read_hosts()?;
        let cleaned = self.unblock_entries(&content);

        if cleaned != content {
            self.write_hosts(&cleaned)?;
        }

        tracing::info!(hosts = %self.hosts_path.display(), "Website blocker deactivated");
        Ok(())
    }

    fn read_hosts(&self) -> Result<String> {
        std::fs::read_to_string(&self.hosts_path).map_err(|e| {
            Error::Blocker(format!(
                "failed to read {}: {}",
                self.hosts_path.display(),
                e
            ))
        })
    }

    fn write_hosts(&self, content: &str) -> Result<()> {
        std::fs::write(&self.hosts_path, content).map_err(|e| {
            Error::Blocker(format!(
                "failed to write {} (administrator rights may be required): {}",
                self.hosts_path.display(),
                e
            ))
        })
    }
}
