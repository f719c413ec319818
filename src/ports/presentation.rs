use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PresentationError {
    #[error("Presentation host is not ready")]
    NotReady,

    #[error("Target {target} rejected update: {reason}")]
    Rejected { target: String, reason: String },
}

/// One place the live price is shown (e.g. one connected server)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresentationTarget: Send + Sync {
    fn name(&self) -> String;

    async fn set_display_name(&self, display_name: &str) -> Result<(), PresentationError>;

    async fn set_activity(&self, activity: &str) -> Result<(), PresentationError>;
}

/// Source of the current presentation targets
#[async_trait]
pub trait PresentationHost: Send + Sync {
    /// Fails with `NotReady` before the host has connected
    async fn targets(&self) -> Result<Vec<Arc<dyn PresentationTarget>>, PresentationError>;
}
