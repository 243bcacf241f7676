// ABOUTME: Listener operations trait for LBaaS clients.
// ABOUTME: Create, show, list, and delete listeners.

use async_trait::async_trait;

use super::error::ClientError;
use super::models::{Listener, ListenerRequest};
use crate::types::ListenerId;

#[async_trait]
pub trait ListenerOps: Send + Sync {
    async fn create_listener(&self, request: &ListenerRequest) -> Result<Listener, ClientError>;

    async fn show_listener(&self, id: &ListenerId) -> Result<Listener, ClientError>;

    async fn list_listeners(&self) -> Result<Vec<Listener>, ClientError>;

    async fn delete_listener(&self, id: &ListenerId) -> Result<(), ClientError>;
}
