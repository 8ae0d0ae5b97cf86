use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "SPAM_API_URL";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    #[serde(with = "millis")]
    pub health_timeout: Duration,
    #[serde(with = "millis")]
    pub request_timeout: Duration,
    #[serde(with = "millis")]
    pub poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: resolve_base_url(None),
            health_timeout: HEALTH_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl AppConfig {
    /// Same as `Default`; spelled out for call sites that want to say where
    /// the base URL comes from.
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = resolve_base_url(Some(url.as_ref()));
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Explicit value, then the runtime env var, then the value baked in at build
/// time, then localhost.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    let runtime = std::env::var(BASE_URL_ENV).ok();
    let candidates = [explicit, runtime.as_deref(), option_env!("SPAM_API_URL")];

    let resolved = candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(normalize_base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    resolved
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
