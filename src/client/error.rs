// ABOUTME: Errors from control-plane client calls.
// ABOUTME: Not-found is distinguished so delete loops can treat it as success.

use crate::poll::NotFound;

/// Errors from load balancer and listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("request rejected with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl NotFound for ClientError {
    fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
