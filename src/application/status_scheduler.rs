//! Status Scheduler
//!
//! Keeps a rotating live-price status in sync across every presentation
//! target. Each tick advances the rotation, fetches a price-only snapshot for
//! the new entry and pushes a display name and activity text to each target.
//!
//! The timer runs in its own task and spawns one task per update, so a slow
//! provider never delays the next tick. The rotation index is advanced only by
//! the timer task, atomically, before the update is spawned.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::{Rotation, TokenRegistry};
use crate::ports::presentation::{PresentationError, PresentationHost, PresentationTarget};
use super::aggregator::MetricsAggregator;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("No tokio runtime available to run the status loop")]
    NoRuntime,
    #[error("Interval must be greater than zero")]
    ZeroInterval,
}

/// Status scheduler configuration
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Time between rotation ticks
    pub interval: Duration,
    /// Decimal places of the price in the display name
    pub display_decimals: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            display_decimals: 4,
        }
    }
}

/// What one status update did
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub symbol: String,
    pub price: Option<f64>,
    /// Targets that accepted both mutations
    pub updated: usize,
    /// Targets that rejected at least one mutation
    pub failed: usize,
}

struct SchedulerState {
    aggregator: Arc<MetricsAggregator>,
    registry: TokenRegistry,
    rotation: Rotation,
    index: AtomicUsize,
    host: Arc<dyn PresentationHost>,
    config: StatusConfig,
}

impl SchedulerState {
    /// Move to the next rotation entry and return its index
    fn advance(&self) -> usize {
        let previous = self
            .index
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| Some(self.rotation.next_index(i)))
            .unwrap_or_else(|current| current);
        self.rotation.next_index(previous)
    }

    async fn update(&self, index: usize) -> UpdateReport {
        let entry = self.rotation.entry(index);
        let resolved = self.registry.resolve(entry);
        let token = resolved.token();
        if resolved.is_fallback() {
            tracing::warn!(
                "Unknown rotation entry '{}', falling back to {}",
                entry,
                token.symbol
            );
        }

        let mut report = UpdateReport {
            symbol: token.symbol.clone(),
            price: None,
            updated: 0,
            failed: 0,
        };

        let outcome = self.aggregator.price_snapshot(&token.address, &token.symbol).await;
        let Some(price) = outcome.price() else {
            tracing::warn!("No price for {}, skipping status update", token.symbol);
            return report;
        };
        report.price = Some(price);

        let targets = match self.host.targets().await {
            Ok(targets) => targets,
            Err(e) => {
                tracing::error!("Failed to update status: {}", e);
                return report;
            }
        };

        let display_name = format!("${:.*}", self.config.display_decimals, price);
        let activity = format!("{} Price", token.symbol.to_uppercase());

        for target in targets {
            match push_status(target.as_ref(), &display_name, &activity).await {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    tracing::error!("Failed to update status for {}: {}", target.name(), e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "Status updated: {} | {} ({} targets, {} failed)",
            display_name,
            activity,
            report.updated,
            report.failed
        );
        report
    }
}

async fn push_status(
    target: &dyn PresentationTarget,
    display_name: &str,
    activity: &str,
) -> Result<(), PresentationError> {
    target.set_display_name(display_name).await?;
    target.set_activity(activity).await
}

/// Rotating live-price status loop. `start` and `stop` are idempotent.
pub struct StatusScheduler {
    state: Arc<SchedulerState>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl StatusScheduler {
    pub fn new(
        aggregator: Arc<MetricsAggregator>,
        registry: TokenRegistry,
        rotation: Rotation,
        host: Arc<dyn PresentationHost>,
        config: StatusConfig,
    ) -> Result<Self, SchedulerError> {
        if config.interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }

        Ok(Self {
            state: Arc::new(SchedulerState {
                aggregator,
                registry,
                rotation,
                index: AtomicUsize::new(0),
                host,
                config,
            }),
            timer: Mutex::new(None),
        })
    }

    /// Start the loop: one immediate update for the current entry, then one
    /// tick per interval. A running loop is stopped first.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = timer.take() {
            previous.abort();
            tracing::debug!("Stopped previous status loop before restart");
        }

        tracing::info!("Starting status update loop...");

        let state = self.state.clone();
        let current = state.index.load(Ordering::SeqCst);
        runtime.spawn(async move {
            state.update(current).await;
        });

        let state = self.state.clone();
        let period = state.config.interval;
        *timer = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let index = state.advance();
                let tick_state = state.clone();
                tokio::spawn(async move {
                    tick_state.update(index).await;
                });
            }
        }));

        tracing::info!("Status loop initialized with {:?} interval", period);
        Ok(())
    }

    /// Stop the loop. In-flight updates finish on their own.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
            tracing::info!("Status update loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Index of the rotation entry currently shown
    pub fn current_index(&self) -> usize {
        self.state.index.load(Ordering::SeqCst)
    }

    /// Run one update for the current entry without touching the timer
    pub async fn update_now(&self) -> UpdateReport {
        let index = self.current_index();
        self.state.update(index).await
    }

    /// Advance the rotation and update, as the timer does
    pub async fn tick(&self) -> UpdateReport {
        let index = self.state.advance();
        self.state.update(index).await
    }
}

impl Drop for StatusScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}
