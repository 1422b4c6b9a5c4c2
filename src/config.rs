// src/config.rs
// =============================================================================
// Runtime configuration, read from environment variables.
//
// Every setting has a default, so the tool runs with no environment at all.
// Command-line flags (see cli.rs) override what's loaded here.
//
//   ALT_CHECKER_BIND           address the API listens on   (0.0.0.0)
//   ALT_CHECKER_PORT           port the API listens on      (8000)
//   ALT_CHECKER_LOG_DIR        where app.log is written     (logs)
//   RUST_LOG                   log filter                   (info)
//   ALT_CHECKER_FETCH_TIMEOUT  per-page timeout, seconds    (5)
//   ALT_CHECKER_MAX_DEPTH      default crawl depth          (2)
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
            fetch_timeout_secs: 5,
            max_depth: 2,
        }
    }
}

impl Config {
    // Loads configuration from the environment
    //
    // Values that are missing or don't parse fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_address: lookup("ALT_CHECKER_BIND").unwrap_or(defaults.bind_address),
            port: lookup("ALT_CHECKER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_dir: lookup("ALT_CHECKER_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            fetch_timeout_secs: lookup("ALT_CHECKER_FETCH_TIMEOUT")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.fetch_timeout_secs),
            max_depth: lookup("ALT_CHECKER_MAX_DEPTH")
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.max_depth),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
