// ABOUTME: Image pipeline errors with SNAFU context selectors.
// ABOUTME: Each variant carries the path or command that failed.

use snafu::Snafu;
use std::path::PathBuf;

use super::template::TemplateError;
use crate::types::{ImageTagError, NameComponentError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BuildError {
    #[snafu(display("invalid {field}: {source}"))]
    InvalidName {
        field: &'static str,
        source: NameComponentError,
    },

    #[snafu(display("invalid image tag: {source}"))]
    InvalidTag { source: ImageTagError },

    #[snafu(display("failed to read template {}: {source}", path.display()))]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to render template {}: {source}", path.display()))]
    Render {
        path: PathBuf,
        source: TemplateError,
    },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteDockerfile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to run {tool}: {source}"))]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` exited with {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| format!("code {c}"))))]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// Request fields could not form a valid image name.
    InvalidRequest,
    /// Template missing, unreadable, or malformed.
    Template,
    /// Dockerfile could not be written.
    Io,
    /// The build tool could not be started or returned failure.
    Tool,
}

impl BuildError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            BuildError::InvalidName { .. } | BuildError::InvalidTag { .. } => {
                BuildErrorKind::InvalidRequest
            }
            BuildError::ReadTemplate { .. } | BuildError::Render { .. } => BuildErrorKind::Template,
            BuildError::WriteDockerfile { .. } => BuildErrorKind::Io,
            BuildError::Spawn { .. } | BuildError::ToolFailed { .. } => BuildErrorKind::Tool,
        }
    }
}
