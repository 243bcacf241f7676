// ABOUTME: Connection settings for the Neutron LBaaS endpoint.
// ABOUTME: The token defaults to the OS_AUTH_TOKEN environment variable.

use serde::Deserialize;
use std::time::Duration;

use super::EnvValue;
use super::deserialize::deserialize_endpoint;

pub const DEFAULT_TOKEN_VAR: &str = "OS_AUTH_TOKEN";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NeutronConfig {
    #[serde(deserialize_with = "deserialize_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_token")]
    pub token: EnvValue,

    /// Per-request timeout, independent of the poll interval.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_token() -> EnvValue {
    EnvValue::from_env(DEFAULT_TOKEN_VAR)
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
