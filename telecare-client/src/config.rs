//! Client configuration

use std::time::Duration;

/// 轮询间隔下限 (秒)
pub const MIN_POLL_SECS: u64 = 5;
/// 轮询间隔上限 (秒)
pub const MAX_POLL_SECS: u64 = 15;
/// 默认轮询间隔 (秒)
pub const DEFAULT_POLL_SECS: u64 = 10;

/// Client configuration for connecting to the order server
///
/// Constructed explicitly at startup and injected; base URLs never live in
/// source literals.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:4000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Poll interval; clamped to the 5–15 s band, fixed for the
    /// lifetime of the poller
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }

    /// 从环境变量构造 (TELECARE_API_URL, TELECARE_POLL_SECS)
    pub fn from_env() -> Self {
        let base_url = std::env::var("TELECARE_API_URL")
            .unwrap_or_else(|_| "http://localhost:4000".into());
        let mut config = Self::new(base_url);
        if let Some(secs) = std::env::var("TELECARE_POLL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config = config.with_poll_interval(secs);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the poll interval in seconds (clamped to the supported band)
    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        let seconds = seconds.clamp(MIN_POLL_SECS, MAX_POLL_SECS);
        self.poll_interval = Duration::from_secs(seconds);
        self
    }
}
