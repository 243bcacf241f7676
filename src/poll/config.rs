// ABOUTME: Poll timing configuration: fixed interval and attempt budget.
// ABOUTME: Accepts humantime strings or float seconds for the interval.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(400);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 12;

/// Timing for every convergence loop run by a [`super::Poller`].
///
/// `max_attempts` counts retries after the first observation, so a loop
/// observes at most `max_attempts + 1` times and sleeps at most
/// `max_attempts` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    #[serde(default = "default_interval", deserialize_with = "deserialize_interval")]
    pub interval: Duration,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), PollConfigError> {
        if self.interval.is_zero() {
            return Err(PollConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Longest time a single loop can spend sleeping before it gives up.
    pub fn worst_case_delay(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("invalid poll interval: {0}")]
    InvalidInterval(String),
}

/// Interpret a float as seconds, e.g. `0.4` for 400ms. Negative and non-finite values are rejected.
pub fn interval_from_secs(secs: f64) -> Result<Duration, PollConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|e| PollConfigError::InvalidInterval(e.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntervalRepr {
    Seconds(f64),
    Human(#[serde(with = "humantime_serde")] Duration),
}

fn deserialize_interval<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match IntervalRepr::deserialize(deserializer)? {
        IntervalRepr::Seconds(secs) => interval_from_secs(secs).map_err(serde::de::Error::custom),
        IntervalRepr::Human(duration) => Ok(duration),
    }
}
