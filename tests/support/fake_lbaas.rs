// ABOUTME: Scripted in-memory LBaaS backend for manager tests.
// ABOUTME: Simulates provisioning delay, draining deletes, and listing lag.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Map;

use converge::client::{
    ClientError, Listener, ListenerOps, ListenerRequest, LoadBalancer, LoadBalancerOps,
    LoadBalancerRef, LoadBalancerRequest,
};
use converge::types::{ListenerId, LoadBalancerId, ProvisioningStatus};

/// How the fake control plane lags behind requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    /// Shows that report PENDING_CREATE before a new load balancer turns ACTIVE.
    pub pending_shows: u32,
    /// Extra deletes accepted after the first before the resource reports not found.
    pub lingering_deletes: u32,
    /// List calls during which a created or deleted resource still shows its old state.
    pub list_lag: u32,
}

/// Call counters, one per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub create_loadbalancer: u32,
    pub show_loadbalancer: u32,
    pub list_loadbalancers: u32,
    pub delete_loadbalancer: u32,
    pub create_listener: u32,
    pub list_listeners: u32,
    pub delete_listener: u32,
}

struct Tracked<T> {
    resource: T,
    deleted: bool,
    shows: u32,
    deletes: u32,
    list_countdown: u32,
}

impl<T: Clone> Tracked<T> {
    fn existing(resource: T) -> Self {
        Self {
            resource,
            deleted: false,
            shows: 0,
            deletes: 0,
            list_countdown: 0,
        }
    }

    /// Listed if present, unless a recent change is still hidden by lag.
    fn list(&mut self) -> Option<T> {
        let present = !self.deleted;
        let visible = if self.list_countdown > 0 {
            self.list_countdown -= 1;
            !present
        } else {
            present
        };
        visible.then(|| self.resource.clone())
    }

    fn delete(&mut self, behavior: &Behavior) -> bool {
        self.deletes += 1;
        if self.deletes > 1 + behavior.lingering_deletes {
            return false;
        }
        if !self.deleted {
            self.deleted = true;
            self.list_countdown = behavior.list_lag;
        }
        true
    }
}

#[derive(Default)]
struct Inner {
    behavior: Behavior,
    next_id: u32,
    loadbalancers: Vec<Tracked<LoadBalancer>>,
    listeners: Vec<Tracked<Listener>>,
    fail_shows: bool,
    calls: Calls,
}

#[derive(Default)]
pub struct FakeLbaas {
    inner: Mutex<Inner>,
}

pub fn loadbalancer(id: &str, status: ProvisioningStatus) -> LoadBalancer {
    LoadBalancer {
        id: LoadBalancerId::new(id),
        name: format!("{id}-name"),
        provisioning_status: status,
        operating_status: None,
        vip_subnet_id: Some("subnet-1".to_string()),
        vip_address: None,
        extra: Map::new(),
    }
}

pub fn listener(id: &str, lb: &str) -> Listener {
    Listener {
        id: ListenerId::new(id),
        name: String::new(),
        protocol: "HTTP".to_string(),
        protocol_port: 80,
        loadbalancers: vec![LoadBalancerRef {
            id: LoadBalancerId::new(lb),
        }],
        extra: Map::new(),
    }
}

impl FakeLbaas {
    pub fn new(behavior: Behavior) -> Self {
        let fake = Self::default();
        fake.inner.lock().behavior = behavior;
        fake
    }

    pub fn with_loadbalancers(self, ids: &[&str]) -> Self {
        self.inner.lock().loadbalancers.extend(
            ids.iter()
                .map(|id| Tracked::existing(loadbalancer(id, ProvisioningStatus::Active))),
        );
        self
    }

    pub fn with_listeners(self, ids: &[&str]) -> Self {
        self.inner
            .lock()
            .listeners
            .extend(ids.iter().map(|id| Tracked::existing(listener(id, "lb-0"))));
        self
    }

    pub fn fail_shows(&self) {
        self.inner.lock().fail_shows = true;
    }

    pub fn calls(&self) -> Calls {
        self.inner.lock().calls
    }

    fn next_id(inner: &mut Inner, prefix: &str) -> String {
        inner.next_id += 1;
        format!("{prefix}-{}", inner.next_id)
    }
}

#[async_trait]
impl LoadBalancerOps for FakeLbaas {
    async fn create_loadbalancer(
        &self,
        request: &LoadBalancerRequest,
    ) -> Result<LoadBalancer, ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.create_loadbalancer += 1;
        let id = Self::next_id(&mut inner, "lb");
        let mut lb = loadbalancer(&id, ProvisioningStatus::PendingCreate);
        lb.name = request.name.clone().unwrap_or_default();
        lb.vip_subnet_id = Some(request.vip_subnet_id.clone());

        let list_lag = inner.behavior.list_lag;
        inner.loadbalancers.push(Tracked {
            list_countdown: list_lag,
            ..Tracked::existing(lb.clone())
        });
        Ok(lb)
    }

    async fn show_loadbalancer(&self, id: &LoadBalancerId) -> Result<LoadBalancer, ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.show_loadbalancer += 1;
        if inner.fail_shows {
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        let pending_shows = inner.behavior.pending_shows;
        let tracked = inner
            .loadbalancers
            .iter_mut()
            .find(|t| &t.resource.id == id && !t.deleted)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

        tracked.shows += 1;
        if tracked.shows > pending_shows {
            tracked.resource.provisioning_status = ProvisioningStatus::Active;
        }
        Ok(tracked.resource.clone())
    }

    async fn list_loadbalancers(&self) -> Result<Vec<LoadBalancer>, ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.list_loadbalancers += 1;
        Ok(inner.loadbalancers.iter_mut().filter_map(Tracked::list).collect())
    }

    async fn delete_loadbalancer(&self, id: &LoadBalancerId) -> Result<(), ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.delete_loadbalancer += 1;
        let behavior = inner.behavior;
        let accepted = inner
            .loadbalancers
            .iter_mut()
            .find(|t| &t.resource.id == id)
            .is_some_and(|tracked| tracked.delete(&behavior));
        if accepted {
            Ok(())
        } else {
            Err(ClientError::NotFound(id.to_string()))
        }
    }
}

#[async_trait]
impl ListenerOps for FakeLbaas {
    async fn create_listener(&self, request: &ListenerRequest) -> Result<Listener, ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.create_listener += 1;
        let id = Self::next_id(&mut inner, "listener");
        let mut created = listener(&id, request.loadbalancer_id.as_str());
        created.protocol = request.protocol.clone();
        created.protocol_port = request.protocol_port;

        let list_lag = inner.behavior.list_lag;
        inner.listeners.push(Tracked {
            list_countdown: list_lag,
            ..Tracked::existing(created.clone())
        });
        Ok(created)
    }

    async fn show_listener(&self, id: &ListenerId) -> Result<Listener, ClientError> {
        let inner = self.inner.lock();
        inner
            .listeners
            .iter()
            .find(|t| &t.resource.id == id && !t.deleted)
            .map(|t| t.resource.clone())
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn list_listeners(&self) -> Result<Vec<Listener>, ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.list_listeners += 1;
        Ok(inner.listeners.iter_mut().filter_map(Tracked::list).collect())
    }

    async fn delete_listener(&self, id: &ListenerId) -> Result<(), ClientError> {
        let mut inner = self.inner.lock();
        inner.calls.delete_listener += 1;
        let behavior = inner.behavior;
        let accepted = inner
            .listeners
            .iter_mut()
            .find(|t| &t.resource.id == id)
            .is_some_and(|tracked| tracked.delete(&behavior));
        if accepted {
            Ok(())
        } else {
            Err(ClientError::NotFound(id.to_string()))
        }
    }
}
