// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-memory LBaaS backend and tracing setup.

use std::sync::Once;
use std::time::Duration;

use converge::poll::{PollConfig, Poller};

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_lbaas;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("converge=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Poller with a 10ms interval and the given retry budget.
#[allow(dead_code)]
pub fn poller(max_attempts: u32) -> Poller {
    Poller::new(PollConfig::new(Duration::from_millis(10), max_attempts)).unwrap()
}
