// ABOUTME: Settings for building and publishing test runner images.
// ABOUTME: Registry prefix, build tool, template location, and output handling.

use serde::Deserialize;
use std::path::PathBuf;

use super::deserialize::deserialize_registry;

pub const DEFAULT_TEMPLATE: &str = "project_docker.tmpl";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Prefix every runner image is published under.
    #[serde(deserialize_with = "deserialize_registry")]
    pub registry: String,

    /// Executable used for `build` and `push`, e.g. `docker` or `podman`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Build context; templates live in `<workdir>/<test_type>/`.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    #[serde(default = "default_template")]
    pub template: String,

    /// Pass the build tool's output through instead of capturing it.
    #[serde(default)]
    pub stream_output: bool,

    #[serde(default = "default_publish")]
    pub publish: bool,
}

impl BuildConfig {
    pub fn new(registry: &str) -> Self {
        Self {
            registry: registry.trim_end_matches('/').to_string(),
            tool: default_tool(),
            workdir: default_workdir(),
            template: default_template(),
            stream_output: false,
            publish: default_publish(),
        }
    }
}

fn default_tool() -> String {
    "docker".to_string()
}

fn default_workdir() -> PathBuf {
    PathBuf::from(".")
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_publish() -> bool {
    true
}
