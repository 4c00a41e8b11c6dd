//! Scheduled Jobs
//!
//! Background jobs for periodic maintenance tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::api::state::RateLimiter;

// =========================================================================
// Rate Limit Window Cleanup Job
// =========================================================================

/// Remove rate limit windows that have ended so idle keys don't pile up
pub fn cleanup_rate_limit_windows(rate_limiter: &RateLimiter) -> usize {
    let removed = rate_limiter.evict_expired();

    if removed > 0 {
        tracing::info!(
            windows_removed = removed,
            "Cleaned up expired rate limit windows"
        );
    }

    removed
}

// =========================================================================
// Job Scheduler
// =========================================================================

/// Configuration for job scheduler
#[derive(Debug, Clone)]
pub struct JobSchedulerConfig {
    /// Interval for rate limit cleanup (default: 1 minute)
    pub rate_limit_cleanup_interval: Duration,
}

impl Default for JobSchedulerConfig {
    fn default() -> Self {
        Self {
            rate_limit_cleanup_interval: Duration::from_secs(60),
        }
    }
}

/// Job Scheduler - runs periodic maintenance tasks
pub struct JobScheduler {
    rate_limiter: Arc<RateLimiter>,
    config: JobSchedulerConfig,
}

impl JobScheduler {
    /// Create a new job scheduler
    pub fn new(rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            rate_limiter,
            config: JobSchedulerConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(rate_limiter: Arc<RateLimiter>, config: JobSchedulerConfig) -> Self {
        Self {
            rate_limiter,
            config,
        }
    }

    /// Start the job scheduler in the background
    /// Returns a handle that can be used to abort the scheduler
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the scheduler loop
    async fn run(&self) {
        tracing::info!("Job scheduler started");

        let mut rate_limit_interval = interval(self.config.rate_limit_cleanup_interval);

        loop {
            rate_limit_interval.tick().await;
            cleanup_rate_limit_windows(&self.rate_limiter);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
