use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vaani_core::RetryPolicy;

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    1000
}

/// Retry settings for calls to external providers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Cap for the doubling delay. Equal to `delay_ms` keeps the delay fixed.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        let max_attempts = env::var("VAANI_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_attempts);

        let delay_ms = env::var("VAANI_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_delay_ms);

        let max_delay_ms = env::var("VAANI_RETRY_MAX_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(delay_ms);

        Self {
            max_attempts,
            delay_ms,
            max_delay_ms,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(
            self.max_attempts,
            Duration::from_millis(self.delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}
