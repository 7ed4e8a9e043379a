//! Graceful shutdown configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds how long each service may drain in-flight work after the
/// shutdown signal fires before it is force-terminated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// Grace period in seconds.
    #[serde(default = "default_grace")]
    pub grace_period_seconds: u64,
}

impl ShutdownConfig {
    /// Grace period as a [`Duration`].
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_seconds)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_seconds: default_grace(),
        }
    }
}

fn default_grace() -> u64 {
    10
}
