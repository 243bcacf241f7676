// ABOUTME: State-convergence polling with a fixed interval and attempt budget.
// ABOUTME: Exports the Poller, its configuration, and failure types.

mod config;
mod error;
mod poller;

pub use config::{
    DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS, PollConfig, PollConfigError, interval_from_secs,
};
pub use error::{NotFound, PollError};
pub use poller::{Identified, Poller};
