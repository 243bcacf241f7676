// ABOUTME: Neutron LBaaS v2 REST client implementing the client traits.
// ABOUTME: Authenticates with a Keystone token and maps HTTP failures to ClientError.

mod wire;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::{
    ClientError, Listener, ListenerOps, ListenerRequest, LoadBalancer, LoadBalancerOps,
    LoadBalancerRequest,
};
use crate::config::NeutronConfig;
use crate::error::Result;
use crate::types::{ListenerId, LoadBalancerId};

use wire::{
    ListenerBody, ListenerCreate, ListenerList, LoadBalancerBody, LoadBalancerCreate,
    LoadBalancerList, error_message,
};

const AUTH_HEADER: &str = "X-Auth-Token";

/// HTTP client for the load balancer endpoints of a Neutron server.
#[derive(Clone)]
pub struct NeutronClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for NeutronClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeutronClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl NeutronClient {
    pub fn new(
        endpoint: &str,
        token: impl Into<String>,
        timeout: std::time::Duration,
    ) -> std::result::Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Build a client from the `neutron` config section, resolving the token.
    pub fn from_config(config: &NeutronConfig) -> Result<Self> {
        let token = config.token.resolve()?;
        Ok(Self::new(&config.endpoint, token, config.timeout)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn lbaas_url(&self, path: &str) -> String {
        format!("{}/v2.0/lbaas/{}", self.endpoint, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.lbaas_url(path))
            .header(AUTH_HEADER, &self.token)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, builder: RequestBuilder) -> std::result::Result<String, ClientError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(&body);
        tracing::debug!(%status, %message, "neutron request failed");
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn resource_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

#[async_trait]
impl LoadBalancerOps for NeutronClient {
    async fn create_loadbalancer(
        &self,
        request: &LoadBalancerRequest,
    ) -> std::result::Result<LoadBalancer, ClientError> {
        let builder = self
            .request(Method::POST, "loadbalancers")
            .json(&LoadBalancerCreate {
                loadbalancer: request,
            });
        let body: LoadBalancerBody = self.send_json(builder).await?;
        Ok(body.loadbalancer)
    }

    async fn show_loadbalancer(
        &self,
        id: &LoadBalancerId,
    ) -> std::result::Result<LoadBalancer, ClientError> {
        let builder = self.request(Method::GET, &resource_path("loadbalancers", id.as_str()));
        let body: LoadBalancerBody = self.send_json(builder).await?;
        Ok(body.loadbalancer)
    }

    async fn list_loadbalancers(&self) -> std::result::Result<Vec<LoadBalancer>, ClientError> {
        let body: LoadBalancerList = self
            .send_json(self.request(Method::GET, "loadbalancers"))
            .await?;
        Ok(body.loadbalancers)
    }

    async fn delete_loadbalancer(
        &self,
        id: &LoadBalancerId,
    ) -> std::result::Result<(), ClientError> {
        let builder = self.request(Method::DELETE, &resource_path("loadbalancers", id.as_str()));
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl ListenerOps for NeutronClient {
    async fn create_listener(
        &self,
        request: &ListenerRequest,
    ) -> std::result::Result<Listener, ClientError> {
        let builder = self
            .request(Method::POST, "listeners")
            .json(&ListenerCreate { listener: request });
        let body: ListenerBody = self.send_json(builder).await?;
        Ok(body.listener)
    }

    async fn show_listener(&self, id: &ListenerId) -> std::result::Result<Listener, ClientError> {
        let builder = self.request(Method::GET, &resource_path("listeners", id.as_str()));
        let body: ListenerBody = self.send_json(builder).await?;
        Ok(body.listener)
    }

    async fn list_listeners(&self) -> std::result::Result<Vec<Listener>, ClientError> {
        let body: ListenerList = self
            .send_json(self.request(Method::GET, "listeners"))
            .await?;
        Ok(body.listeners)
    }

    async fn delete_listener(&self, id: &ListenerId) -> std::result::Result<(), ClientError> {
        let builder = self.request(Method::DELETE, &resource_path("listeners", id.as_str()));
        self.send(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = NeutronClient::new("http://neutron:9696/", "t", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://neutron:9696");
        assert_eq!(
            client.lbaas_url("loadbalancers"),
            "http://neutron:9696/v2.0/lbaas/loadbalancers"
        );
    }

    #[test]
    fn resource_ids_are_percent_encoded() {
        assert_eq!(resource_path("listeners", "a b/c"), "listeners/a%20b%2Fc");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = NeutronClient::new("http://n", "secret-token", Duration::from_secs(5)).unwrap();
        assert!(!format!("{client:?}").contains("secret-token"));
    }
}
