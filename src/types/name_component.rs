// ABOUTME: Validated image repository path component.
// ABOUTME: Used for test types and project names that end up in image names.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameComponentError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name exceeds maximum length of 64 characters")]
    TooLong,

    #[error("name must start and end with a lowercase letter or digit")]
    BadBoundary,

    #[error("name must be lowercase")]
    NotLowercase,

    #[error("invalid character in name: '{0}'")]
    InvalidChar(char),
}

/// One path component of a registry repository name, e.g. `functional`
/// or `f5-openstack-agent`. Doubles as a directory name in the build
/// workspace, so `/` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameComponent(String);

impl NameComponent {
    pub fn new(value: &str) -> Result<Self, NameComponentError> {
        if value.is_empty() {
            return Err(NameComponentError::Empty);
        }

        if value.len() > 64 {
            return Err(NameComponentError::TooLong);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(NameComponentError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && !matches!(c, '-' | '_' | '.') {
                return Err(NameComponentError::InvalidChar(c));
            }
        }

        let is_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        let first = value.chars().next().is_some_and(is_alnum);
        let last = value.chars().last().is_some_and(is_alnum);
        if !first || !last {
            return Err(NameComponentError::BadBoundary);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
