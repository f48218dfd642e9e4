//! Live result broadcast configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Maximum per-subscriber queue depth
const MAX_SUBSCRIBER_CAPACITY: usize = 10_000;

/// Maximum keep-alive interval in seconds
const MAX_KEEP_ALIVE_SECS: u64 = 300;

/// Broadcast configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// Snapshots queued per subscriber before it is disconnected as too slow
    #[serde(default = "default_subscriber_capacity")]
    pub subscriber_capacity: usize,

    /// Interval between keep-alive comments on the result stream
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

impl BroadcastConfig {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    /// Validate broadcast configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subscriber_capacity == 0 || self.subscriber_capacity > MAX_SUBSCRIBER_CAPACITY {
            return Err(ValidationError::InvalidSubscriberCapacity);
        }
        if self.keep_alive_secs == 0 || self.keep_alive_secs > MAX_KEEP_ALIVE_SECS {
            return Err(ValidationError::InvalidKeepAlive);
        }
        Ok(())
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: default_subscriber_capacity(),
            keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

fn default_subscriber_capacity() -> usize {
    64
}

fn default_keep_alive_secs() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BroadcastConfig::default();
        assert_eq!(config.subscriber_capacity, 64);
        assert_eq!(config.keep_alive(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = BroadcastConfig {
            subscriber_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSubscriberCapacity)
        ));
    }

    #[test]
    fn keep_alive_out_of_range_is_rejected() {
        for secs in [0, MAX_KEEP_ALIVE_SECS + 1] {
            let config = BroadcastConfig {
                keep_alive_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidKeepAlive)));
        }
    }
}
