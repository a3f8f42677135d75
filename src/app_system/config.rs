use std::time::Duration;

use tracing::warn;

use crate::actor_framework::Latency;

pub const LIST_LATENCY_VAR: &str = "ORDER_VISTA_LIST_LATENCY_MS";
pub const GET_LATENCY_VAR: &str = "ORDER_VISTA_GET_LATENCY_MS";
pub const UPDATE_LATENCY_VAR: &str = "ORDER_VISTA_UPDATE_LATENCY_MS";
pub const VERIFY_DELAY_VAR: &str = "ORDER_VISTA_VERIFY_DELAY_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryConfig {
    pub latency: Latency,
    pub buffer_size: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            latency: Latency {
                list: Duration::from_millis(800),
                get: Duration::from_millis(500),
                update: Duration::from_millis(600),
            },
            buffer_size: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// How long a barcode check takes to resolve.
    pub verify_delay: Duration,
    pub buffer_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            verify_delay: Duration::from_millis(500),
            buffer_size: 32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemConfig {
    pub repository: RepositoryConfig,
    pub dashboard: DashboardConfig,
}

impl SystemConfig {
    /// Defaults with every simulated delay removed.
    pub fn instant() -> Self {
        let mut config = Self::default();
        config.repository.latency = Latency::default();
        config.dashboard.verify_delay = Duration::ZERO;
        config
    }

    /// Defaults overridden by `ORDER_VISTA_*_MS` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    /// Values that are not whole milliseconds are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let millis = |name: &str| -> Option<Duration> {
            let raw = lookup(name)?;
            match raw.trim().parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(e) => {
                    warn!(var = name, value = %raw, error = %e, "Ignoring invalid delay");
                    None
                }
            }
        };

        if let Some(delay) = millis(LIST_LATENCY_VAR) {
            config.repository.latency.list = delay;
        }
        if let Some(delay) = millis(GET_LATENCY_VAR) {
            config.repository.latency.get = delay;
        }
        if let Some(delay) = millis(UPDATE_LATENCY_VAR) {
            config.repository.latency.update = delay;
        }
        if let Some(delay) = millis(VERIFY_DELAY_VAR) {
            config.dashboard.verify_delay = delay;
        }
        config
    }
}
