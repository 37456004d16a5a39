//! Environment-driven settings.
//!
//! Values come from the process environment (after `.env` has been loaded
//! by the binary) and fall back to the defaults below. CLI arguments take
//! precedence over anything read here.

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Public game log the dashboard is built from when no source is given.
pub const DEFAULT_SOURCE: &str = "https://sports-statistics.com/database/basketball-data/nba/michael-jordan-nba-career-regular-season-stats-by-game.csv";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8050";
pub const DEFAULT_LOG_FILE: &str = "logs/shooting_splits.log";

#[derive(Debug, Clone)]
pub struct Settings {
    /// File path or URL of the game table (`DASHBOARD_SOURCE`).
    pub source: String,
    /// Listen address for `serve` (`DASHBOARD_ADDR`).
    pub addr: SocketAddr,
    /// Rolling JSON log location (`LOG_FILE_PATH`).
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = lookup("DASHBOARD_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let addr_raw = lookup("DASHBOARD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("DASHBOARD_ADDR '{addr_raw}' is not a socket address"))?;
        let log_file_path =
            lookup("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            source,
            addr,
            log_file_path,
        })
    }
}
