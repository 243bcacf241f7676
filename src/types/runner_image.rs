// ABOUTME: Test runner image naming convention.
// ABOUTME: Builds `<registry>/<test_type>_runner_<project>[:tag]` references.

use std::fmt;
use thiserror::Error;

use super::NameComponent;

#[derive(Debug, Error)]
pub enum ImageTagError {
    #[error("image tag cannot be empty")]
    Empty,

    #[error("image tag exceeds maximum length of 128 characters")]
    TooLong,

    #[error("image tag cannot start with '{0}'")]
    BadStart(char),

    #[error("invalid character in image tag: '{0}'")]
    InvalidChar(char),
}

/// Validate a tag against the registry tag grammar `[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}`.
pub fn validate_tag(tag: &str) -> Result<(), ImageTagError> {
    let first = tag.chars().next().ok_or(ImageTagError::Empty)?;
    if tag.len() > 128 {
        return Err(ImageTagError::TooLong);
    }
    if first == '.' || first == '-' {
        return Err(ImageTagError::BadStart(first));
    }
    match tag
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-'))
    {
        Some(c) => Err(ImageTagError::InvalidChar(c)),
        None => Ok(()),
    }
}

/// The repository a test runner image is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerImage {
    registry: String,
    test_type: NameComponent,
    project: NameComponent,
}

impl RunnerImage {
    pub fn new(registry: &str, test_type: NameComponent, project: NameComponent) -> Self {
        Self {
            registry: registry.trim_end_matches('/').to_string(),
            test_type,
            project,
        }
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// Full repository name without a tag.
    pub fn repository(&self) -> String {
        format!(
            "{}/{}_runner_{}",
            self.registry, self.test_type, self.project
        )
    }

    pub fn tagged(&self, tag: &str) -> Result<String, ImageTagError> {
        validate_tag(tag)?;
        Ok(format!("{}:{}", self.repository(), tag))
    }
}

impl fmt::Display for RunnerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repository())
    }
}
