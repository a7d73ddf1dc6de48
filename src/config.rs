use std::{env, time::Duration};

/// Timing of the background sweep that drops stale sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupConfig {
    pub interval: Duration,
    pub inactive_timeout: Duration,
    pub finished_retention: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            inactive_timeout: Duration::from_secs(600),
            finished_retention: Duration::from_secs(120),
        }
    }
}

impl CleanupConfig {
    /// Reads `CLEANUP_INTERVAL_SECONDS`, `INACTIVE_GAME_TIMEOUT_SECONDS` and
    /// `FINISHED_GAME_RETENTION_SECONDS`, keeping the default for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let seconds = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|value| value.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            interval: seconds("CLEANUP_INTERVAL_SECONDS", defaults.interval),
            inactive_timeout: seconds("INACTIVE_GAME_TIMEOUT_SECONDS", defaults.inactive_timeout),
            finished_retention: seconds(
                "FINISHED_GAME_RETENTION_SECONDS",
                defaults.finished_retention,
            ),
        }
    }
}
