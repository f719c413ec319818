//! Application Layer
//!
//! Use cases built on the ports:
//! - `MetricsAggregator`: on-demand metrics snapshot for one token
//! - `StatusScheduler`: rotating live-price status across presentation targets

pub mod aggregator;
pub mod status_scheduler;

pub use aggregator::{MetricsAggregator, Providers};
pub use status_scheduler::{SchedulerError, StatusConfig, StatusScheduler, UpdateReport};
