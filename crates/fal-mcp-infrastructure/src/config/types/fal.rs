//! fal.ai client configuration types

use crate::constants::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    FAL_API_URL, FAL_DIRECT_URL, FAL_QUEUE_URL, FAL_REST_URL,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// fal.ai API configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FalConfig {
    /// Credential, usually taken from `FAL_KEY`
    pub api_key: Option<String>,
    /// Model catalogue API base URL
    pub api_url: String,
    /// Queue API base URL
    pub queue_url: String,
    /// Synchronous run API base URL
    pub direct_url: String,
    /// REST (storage) API base URL
    pub rest_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Delay between queue status polls in milliseconds
    pub poll_interval_ms: u64,
    /// Upper bound on waiting for a queued job in seconds
    pub poll_timeout_secs: u64,
}

impl Default for FalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: FAL_API_URL.to_string(),
            queue_url: FAL_QUEUE_URL.to_string(),
            direct_url: FAL_DIRECT_URL.to_string(),
            rest_url: FAL_REST_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }
}

impl FalConfig {
    /// Whether a non-empty credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delay between queue status polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Upper bound on waiting for a queued job
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for FalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FalConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("queue_url", &self.queue_url)
            .field("direct_url", &self.direct_url)
            .field("rest_url", &self.rest_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}
