// ABOUTME: Configuration types and parsing for converge.yml.
// ABOUTME: Handles YAML parsing, discovery, env-backed secrets, and poll overrides.

mod build;
mod deserialize;
mod env_value;
mod init;
mod neutron;

pub use build::{BuildConfig, DEFAULT_TEMPLATE};
pub use env_value::EnvValue;
pub use init::init_config;
pub use neutron::{DEFAULT_TOKEN_VAR, NeutronConfig};

use crate::error::{Error, Result};
use crate::poll::{PollConfig, Poller};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "converge.yml";
pub const CONFIG_FILENAME_ALT: &str = "converge.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".converge/config.yml";

/// Top-level config file. Unknown keys anywhere are a usage error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub neutron: Option<NeutronConfig>,

    #[serde(default)]
    pub polling: PollConfig,

    #[serde(default)]
    pub build: Option<BuildConfig>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config
            .polling
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        candidates
            .iter()
            .find(|path| path.exists())
            .map(|path| Self::load(path))
            .unwrap_or_else(|| Err(Error::ConfigNotFound(dir.to_path_buf())))
    }

    /// Replace poll settings given on the command line.
    pub fn with_poll_overrides(mut self, interval: Option<Duration>, max_attempts: Option<u32>) -> Self {
        if let Some(interval) = interval {
            self.polling.interval = interval;
        }
        if let Some(max_attempts) = max_attempts {
            self.polling.max_attempts = max_attempts;
        }
        self
    }

    pub fn poller(&self) -> Result<Poller> {
        Poller::new(self.polling).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn neutron(&self) -> Result<&NeutronConfig> {
        self.neutron
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("missing `neutron` section".to_string()))
    }

    pub fn build(&self) -> Result<&BuildConfig> {
        self.build
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("missing `build` section".to_string()))
    }
}
