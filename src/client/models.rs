// ABOUTME: LBaaS v2 resource representations and creation requests.
// ABOUTME: Unknown response fields are retained so nothing is lost on round trips.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::poll::Identified;
use crate::types::{ListenerId, LoadBalancerId, ProvisioningStatus};

/// A load balancer as returned by show/list/create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: LoadBalancerId,
    #[serde(default)]
    pub name: String,
    pub provisioning_status: ProvisioningStatus,
    #[serde(default)]
    pub operating_status: Option<String>,
    #[serde(default)]
    pub vip_subnet_id: Option<String>,
    #[serde(default)]
    pub vip_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identified for LoadBalancer {
    type Id = LoadBalancerId;

    fn id(&self) -> &LoadBalancerId {
        &self.id
    }
}

/// Body of a load balancer create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerRequest {
    pub vip_subnet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Reference from a listener back to the load balancer it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerRef {
    pub id: LoadBalancerId,
}

/// A listener. The backend reports no status for listeners, so their
/// convergence is observed through the listing instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    pub id: ListenerId,
    #[serde(default)]
    pub name: String,
    pub protocol: String,
    pub protocol_port: u16,
    #[serde(default)]
    pub loadbalancers: Vec<LoadBalancerRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identified for Listener {
    type Id = ListenerId;

    fn id(&self) -> &ListenerId {
        &self.id
    }
}

/// Body of a listener create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerRequest {
    pub loadbalancer_id: LoadBalancerId,
    pub protocol: String,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}
