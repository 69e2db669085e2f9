//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration, the version reported by the health endpoint
/// (resolved once at startup) and the instant the process started serving.
/// Nothing here is written after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub version: Arc<str>,
    pub started_at: Instant,
}

impl AppState {
    /// Creates state from the given configuration, resolving `APP_VERSION`
    /// from the environment. `started_at` should be captured as early in
    /// `main` as possible so uptime tracks the process, not the listener.
    pub fn new(config: AppConfig, started_at: Instant) -> Self {
        let version = config.app.resolve_version();
        Self::with_version(config, version, started_at)
    }

    /// Creates state with an explicit version and start instant.
    pub fn with_version(config: AppConfig, version: impl Into<Arc<str>>, started_at: Instant) -> Self {
        Self {
            config: Arc::new(config),
            version: version.into(),
            started_at,
        }
    }

    /// Time elapsed since the process started. Never decreases.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_is_monotonic() {
        let state = AppState::with_version(AppConfig::default(), "1.0.0", Instant::now());
        let first = state.uptime();
        let second = state.uptime();
        assert!(second >= first);
    }

    #[test]
    fn test_clones_share_version() {
        let state = AppState::with_version(AppConfig::default(), "2.3.1", Instant::now());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.version, &clone.version));
        assert_eq!(&*clone.version, "2.3.1");
    }
}
