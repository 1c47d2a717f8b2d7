//! Session metrics and logging setup.
//!
//! Provides structured logging and counters for monitoring how deployments
//! play out over a session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for one session.
pub struct Metrics {
    deployments: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    cancellations: AtomicU64,
    ticks: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("deployments", &self.deployments())
            .field("completions", &self.completions())
            .field("cancellations", &self.cancellations())
            .field("ticks", &self.ticks())
            .finish()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deployments: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            cancellations: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_deployment(&self) {
        self.deployments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tick(&self) {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        // Log at trace level every 500 ticks
        if tick % 500 == 0 {
            tracing::trace!(ticks = tick, "Deployment ticks");
        }
    }

    pub fn record_completion(&self, success: bool) {
        if success {
            self.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_cancellation(&self) {
        self.cancellations.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn deployments(&self) -> u64 {
        self.deployments.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn completions(&self) -> u64 {
        self.successes() + self.failures()
    }

    #[must_use]
    pub fn cancellations(&self) -> u64 {
        self.cancellations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a one-line summary of the session so far.
    pub fn log_summary(&self) {
        tracing::info!(
            deployments = self.deployments(),
            successes = self.successes(),
            failures = self.failures(),
            cancellations = self.cancellations(),
            ticks = self.ticks(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Session summary"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
