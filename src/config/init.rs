// ABOUTME: Config scaffolding for new workspaces.
// ABOUTME: Writes a commented converge.yml template.

use std::path::Path;

use crate::error::{Error, Result};
use crate::poll::{DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS};

use super::CONFIG_FILENAME;
use super::deserialize::{validate_endpoint, validate_registry};
use super::neutron::DEFAULT_TOKEN_VAR;

const DEFAULT_ENDPOINT: &str = "http://controller:9696";
const DEFAULT_REGISTRY: &str = "registry.example.com/openstack-test";

pub fn init_config(
    dir: &Path,
    endpoint: Option<&str>,
    registry: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT);
    validate_endpoint(endpoint).map_err(Error::InvalidConfig)?;

    let registry = registry.unwrap_or(DEFAULT_REGISTRY);
    validate_registry(registry).map_err(Error::InvalidConfig)?;

    std::fs::write(&config_path, template_yaml(endpoint, registry))?;
    Ok(())
}

fn template_yaml(endpoint: &str, registry: &str) -> String {
    format!(
        r#"neutron:
  endpoint: {endpoint}
  # Keystone token; keep it out of this file.
  token:
    env: {DEFAULT_TOKEN_VAR}
  timeout: 30s

polling:
  # Fixed delay between observations (humantime or float seconds).
  interval: {interval}ms
  # Retries after the first observation before giving up.
  max_attempts: {max_attempts}

build:
  registry: {registry}
  tool: docker
  workdir: .
  publish: true
"#,
        interval = DEFAULT_INTERVAL.as_millis(),
        max_attempts = DEFAULT_MAX_ATTEMPTS,
    )
}
