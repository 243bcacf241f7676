// ABOUTME: Composable capability traits for LBaaS control-plane clients.
// ABOUTME: Defines LoadBalancerOps, ListenerOps, and the combined LbaasClient.

mod error;
mod listener;
mod loadbalancer;
mod models;

pub use error::ClientError;
pub use listener::ListenerOps;
pub use loadbalancer::LoadBalancerOps;
pub use models::{
    Listener, ListenerRequest, LoadBalancer, LoadBalancerRef, LoadBalancerRequest,
};

/// A client carrying every LBaaS capability the polling manager drives.
pub trait LbaasClient: LoadBalancerOps + ListenerOps {}

impl<T: LoadBalancerOps + ListenerOps> LbaasClient for T {}
