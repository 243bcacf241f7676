// ABOUTME: LBaaS operations that wait for the control plane to converge.
// ABOUTME: Wraps a client and a Poller; raw client calls go through client().

use crate::client::{
    ClientError, Listener, ListenerOps, ListenerRequest, LoadBalancer, LoadBalancerOps,
    LoadBalancerRequest,
};
use crate::poll::{NotFound, PollError, Poller};
use crate::types::{ListenerId, LoadBalancerId, ProvisioningStatus};

/// Error returned by every convergent manager operation.
pub type ManagerError = PollError<ClientError>;

/// Issues LBaaS calls and blocks until their effects are observable.
///
/// Only the operations below are wrapped. Anything else, like a plain
/// `show_listener`, is called on [`PollingManager::client`] directly.
#[derive(Debug, Clone)]
pub struct PollingManager<C> {
    client: C,
    poller: Poller,
}

impl<C> PollingManager<C> {
    pub fn new(client: C, poller: Poller) -> Self {
        Self { client, poller }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    pub fn into_client(self) -> C {
        self.client
    }
}

impl<C: LoadBalancerOps> PollingManager<C> {
    /// Create a load balancer and wait until its provisioning status is `ACTIVE`.
    ///
    /// # Errors
    ///
    /// Returns `PollError::Backend` if the create or any show call fails, and
    /// `PollError::MaximumAttemptsExceeded` if it never becomes active.
    pub async fn create_loadbalancer(
        &self,
        request: &LoadBalancerRequest,
    ) -> Result<LoadBalancer, ManagerError> {
        let created = self
            .client
            .create_loadbalancer(request)
            .await
            .map_err(PollError::Backend)?;
        tracing::info!(id = %created.id, status = %created.provisioning_status, "load balancer created");

        let client = &self.client;
        let active = self
            .poller
            .poll(
                |id: LoadBalancerId| async move { client.show_loadbalancer(&id).await },
                &created.id,
                |lb: &LoadBalancer| lb.provisioning_status.clone(),
                &ProvisioningStatus::Active,
            )
            .await?;

        tracing::info!(id = %active.id, "load balancer active");
        Ok(active)
    }

    /// Delete a load balancer, re-issuing the delete until it reports not found.
    pub async fn delete_loadbalancer(&self, id: &LoadBalancerId) -> Result<(), ManagerError> {
        let client = &self.client;
        self.poller
            .delete_until_absent(
                |id: LoadBalancerId| async move { client.delete_loadbalancer(&id).await },
                id,
            )
            .await?;

        tracing::info!(%id, "load balancer deleted");
        Ok(())
    }

    /// Delete every load balancer and wait for the listing to come back empty.
    pub async fn delete_all_loadbalancers(&self) -> Result<(), ManagerError> {
        let client = &self.client;
        self.poller
            .drain_all(
                || client.list_loadbalancers(),
                |id: LoadBalancerId| async move { client.delete_loadbalancer(&id).await },
            )
            .await
    }
}

impl<C: ListenerOps> PollingManager<C> {
    /// Create a listener and wait until it shows up in the listener listing.
    ///
    /// Returns the representation from the create call.
    pub async fn create_listener(
        &self,
        request: &ListenerRequest,
    ) -> Result<Listener, ManagerError> {
        let created = self
            .client
            .create_listener(request)
            .await
            .map_err(PollError::Backend)?;
        tracing::info!(id = %created.id, "listener created");

        let client = &self.client;
        self.poller
            .wait_for_membership(&created.id, || client.list_listeners(), true)
            .await?;

        Ok(created)
    }

    /// Delete a listener and wait until it is gone from the listener listing.
    ///
    /// A not-found from the delete call is not an error; the listing is still checked.
    pub async fn delete_listener(&self, id: &ListenerId) -> Result<(), ManagerError> {
        match self.client.delete_listener(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => tracing::debug!(%id, "listener already gone"),
            Err(e) => return Err(PollError::Backend(e)),
        }

        let client = &self.client;
        self.poller
            .wait_for_membership(id, || client.list_listeners(), false)
            .await?;

        tracing::info!(%id, "listener deleted");
        Ok(())
    }

    /// Delete every listener and wait for the listing to come back empty.
    pub async fn delete_all_listeners(&self) -> Result<(), ManagerError> {
        let client = &self.client;
        self.poller
            .drain_all(
                || client.list_listeners(),
                |id: ListenerId| async move { client.delete_listener(&id).await },
            )
            .await
    }
}
