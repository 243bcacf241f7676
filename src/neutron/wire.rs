// ABOUTME: JSON envelopes used by the Neutron LBaaS v2 API.
// ABOUTME: Every request and response wraps the resource under its type name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Listener, ListenerRequest, LoadBalancer, LoadBalancerRequest};

#[derive(Debug, Serialize)]
pub(super) struct LoadBalancerCreate<'a> {
    pub loadbalancer: &'a LoadBalancerRequest,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoadBalancerBody {
    pub loadbalancer: LoadBalancer,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoadBalancerList {
    pub loadbalancers: Vec<LoadBalancer>,
}

#[derive(Debug, Serialize)]
pub(super) struct ListenerCreate<'a> {
    pub listener: &'a ListenerRequest,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListenerBody {
    pub listener: Listener,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListenerList {
    pub listeners: Vec<Listener>,
}

/// Pull a human-readable message out of an error body.
///
/// Neutron nests it as `{"NeutronError": {"message": ..}}`; some proxies
/// answer with a flat `{"message": ..}` or plain text instead.
pub(super) fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    json.get("NeutronError")
        .and_then(|e| e.get("message"))
        .or_else(|| json.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}
