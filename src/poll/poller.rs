// ABOUTME: Fixed-interval convergence loop and its specializations.
// ABOUTME: Probes until a predicate holds, bounded by the attempt budget.

use std::fmt::{Debug, Display};
use std::future::Future;

use super::config::{PollConfig, PollConfigError};
use super::error::{NotFound, PollError};

/// Resources that can be matched against a listing by identifier.
pub trait Identified {
    type Id: Clone + PartialEq + Debug;

    fn id(&self) -> &Self::Id;
}

/// Runs convergence loops with a fixed interval and attempt budget.
///
/// The configuration is frozen at construction. Each call owns its own
/// attempt counter, so one `Poller` can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    /// # Errors
    ///
    /// Returns `PollConfigError::ZeroInterval` if the interval is zero.
    pub fn new(config: PollConfig) -> Result<Self, PollConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run `probe` until `reached` accepts its result.
    ///
    /// The first probe runs immediately. Each miss sleeps for the interval
    /// before probing again, and after `max_attempts` retries the loop gives
    /// up, so `probe` runs at most `max_attempts + 1` times. Probe errors end
    /// the loop at once.
    pub async fn until<T, E, F, Fut, P>(
        &self,
        condition: &str,
        mut probe: F,
        mut reached: P,
    ) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&T) -> bool,
    {
        let mut current = probe().await.map_err(PollError::Backend)?;
        let mut retries: u32 = 0;

        while !reached(&current) {
            if retries >= self.config.max_attempts {
                let observations = u64::from(retries) + 1;
                tracing::warn!(condition, observations, "gave up waiting");
                return Err(PollError::MaximumAttemptsExceeded {
                    condition: condition.to_string(),
                    observations,
                });
            }

            retries += 1;
            tracing::debug!(
                condition,
                retry = retries,
                max_attempts = self.config.max_attempts,
                interval = ?self.config.interval,
                "not yet converged"
            );
            tokio::time::sleep(self.config.interval).await;
            current = probe().await.map_err(PollError::Backend)?;
        }

        tracing::debug!(condition, retries, "converged");
        Ok(current)
    }

    /// Observe `resource_id` until its extracted status equals `target_status`,
    /// returning the matching representation.
    pub async fn poll<Id, R, S, E, O, Fut, Read>(
        &self,
        mut observer: O,
        resource_id: &Id,
        mut status_reader: Read,
        target_status: &S,
    ) -> Result<R, PollError<E>>
    where
        Id: Clone + Display,
        O: FnMut(Id) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        Read: FnMut(&R) -> S,
        S: PartialEq + Debug,
    {
        let condition = format!("{resource_id} to reach {target_status:?}");
        self.until(
            &condition,
            || observer(resource_id.clone()),
            |representation| {
                let status = status_reader(representation);
                tracing::trace!(resource = %resource_id, ?status, "observed status");
                status == *target_status
            },
        )
        .await
    }

    /// Re-issue `delete_op` until the backend reports the resource not found.
    ///
    /// A successful delete only means the request was accepted, so it counts
    /// as "still present" and is retried after the interval.
    pub async fn delete_until_absent<Id, D, E, Del, Fut>(
        &self,
        mut delete_op: Del,
        resource_id: &Id,
    ) -> Result<(), PollError<E>>
    where
        Id: Clone + Display,
        Del: FnMut(Id) -> Fut,
        Fut: Future<Output = Result<D, E>>,
        E: NotFound,
    {
        let condition = format!("{resource_id} to be absent");
        self.until(
            &condition,
            || {
                let attempt = delete_op(resource_id.clone());
                async move {
                    match attempt.await {
                        Ok(_) => Ok(false),
                        Err(e) if e.is_not_found() => Ok(true),
                        Err(e) => Err(e),
                    }
                }
            },
            |absent| *absent,
        )
        .await?;
        Ok(())
    }

    /// Delete every listed resource once, then re-list until the collection is empty.
    ///
    /// Individual deletes are not retried. A not-found from one of them means
    /// the resource went away on its own and is ignored.
    pub async fn drain_all<R, D, E, L, LFut, Del, DFut>(
        &self,
        mut list_op: L,
        mut delete_op: Del,
    ) -> Result<(), PollError<E>>
    where
        R: Identified,
        L: FnMut() -> LFut,
        LFut: Future<Output = Result<Vec<R>, E>>,
        Del: FnMut(R::Id) -> DFut,
        DFut: Future<Output = Result<D, E>>,
        E: NotFound,
    {
        let listed = list_op().await.map_err(PollError::Backend)?;
        tracing::info!(count = listed.len(), "deleting listed resources");

        for resource in &listed {
            match delete_op(resource.id().clone()).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    tracing::debug!(id = ?resource.id(), "already gone");
                }
                Err(e) => return Err(PollError::Backend(e)),
            }
        }

        self.until("collection to be empty", &mut list_op, |remaining| {
            remaining.is_empty()
        })
        .await?;
        Ok(())
    }

    /// Re-list until `target_id` is (or is no longer) a member of the listing.
    ///
    /// Returns the listed resource when waiting for presence, `None` when
    /// waiting for absence.
    pub async fn wait_for_membership<R, E, L, Fut>(
        &self,
        target_id: &R::Id,
        list_op: L,
        want_present: bool,
    ) -> Result<Option<R>, PollError<E>>
    where
        R: Identified,
        L: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<R>, E>>,
    {
        let condition = if want_present {
            format!("{target_id:?} to be listed")
        } else {
            format!("{target_id:?} to be unlisted")
        };

        let listing = self
            .until(&condition, list_op, |listing| {
                listing.iter().any(|r| r.id() == target_id) == want_present
            })
            .await?;

        Ok(listing.into_iter().find(|r| r.id() == target_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::time::Duration;

    fn poller(max_attempts: u32) -> Poller {
        Poller::new(PollConfig::new(Duration::from_millis(10), max_attempts)).unwrap()
    }

    #[test]
    fn new_rejects_zero_interval() {
        let err = Poller::new(PollConfig::new(Duration::ZERO, 1)).unwrap_err();
        assert_eq!(err, PollConfigError::ZeroInterval);
    }

    #[tokio::test(start_paused = true)]
    async fn until_returns_first_match_without_sleeping() {
        let start = tokio::time::Instant::now();
        let mut calls = 0;
        let value = poller(3)
            .until(
                "ready",
                || {
                    calls += 1;
                    async { Ok::<_, Infallible>(7) }
                },
                |v| *v == 7,
            )
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_allows_a_single_observation() {
        let start = tokio::time::Instant::now();
        let mut calls = 0;
        let err = poller(0)
            .until(
                "ready",
                || {
                    calls += 1;
                    async { Ok::<_, Infallible>(false) }
                },
                |v| *v,
            )
            .await
            .unwrap_err();

        assert!(err.is_exhausted());
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn probe_error_stops_immediately() {
        let mut calls = 0;
        let err = poller(5)
            .until(
                "ready",
                || {
                    calls += 1;
                    let n = calls;
                    async move {
                        if n == 2 {
                            Err("connection reset")
                        } else {
                            Ok(false)
                        }
                    }
                },
                |v| *v,
            )
            .await
            .unwrap_err();

        assert_eq!(err.backend(), Some(&"connection reset"));
        assert_eq!(calls, 2);
    }
}
