// ABOUTME: Load balancer operations trait for LBaaS clients.
// ABOUTME: Create, show, list, and delete load balancers.

use async_trait::async_trait;

use super::error::ClientError;
use super::models::{LoadBalancer, LoadBalancerRequest};
use crate::types::LoadBalancerId;

/// Load balancer lifecycle operations.
///
/// Calls return as soon as the control plane accepts them; the resource may
/// still be provisioning or draining afterwards.
#[async_trait]
pub trait LoadBalancerOps: Send + Sync {
    async fn create_loadbalancer(
        &self,
        request: &LoadBalancerRequest,
    ) -> Result<LoadBalancer, ClientError>;

    async fn show_loadbalancer(&self, id: &LoadBalancerId) -> Result<LoadBalancer, ClientError>;

    async fn list_loadbalancers(&self) -> Result<Vec<LoadBalancer>, ClientError>;

    /// Request deletion. Returns `ClientError::NotFound` once the load balancer is gone.
    async fn delete_loadbalancer(&self, id: &LoadBalancerId) -> Result<(), ClientError>;
}
