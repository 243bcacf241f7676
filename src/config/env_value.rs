// ABOUTME: Config values that may be read from the environment.
// ABOUTME: Keeps secrets like auth tokens out of the config file.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Either a literal string or a reference to an environment variable.
///
/// ```yaml
/// token: gAAAAAB...          # literal
/// token: { env: OS_AUTH_TOKEN }
/// token: { env: OS_AUTH_TOKEN, default: "" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn from_env(var: &str) -> Self {
        EnvValue::FromEnv {
            var: var.to_string(),
            default: None,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => std::env::var(var)
                .ok()
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(var.clone())),
        }
    }
}
