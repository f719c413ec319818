//! Console Presentation
//!
//! Presentation target that writes each status update to the log, used when
//! the ticker runs standalone from the CLI.

use std::sync::Arc;
use std::sync::Mutex;
use async_trait::async_trait;

use crate::ports::presentation::{PresentationError, PresentationHost, PresentationTarget};

/// Logs status updates and remembers the latest one
#[derive(Debug, Default)]
pub struct ConsoleTarget {
    name: String,
    current: Mutex<(Option<String>, Option<String>)>,
}

impl ConsoleTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: Mutex::new((None, None)),
        }
    }

    /// Latest (display name, activity) pair
    pub fn current(&self) -> (Option<String>, Option<String>) {
        self.current
            .lock()
            .map(|current| current.clone())
            .unwrap_or_default()
    }

    fn set(&self, f: impl FnOnce(&mut (Option<String>, Option<String>))) -> Result<(), PresentationError> {
        let mut current = self.current.lock().map_err(|_| PresentationError::Rejected {
            target: self.name.clone(),
            reason: "state lock poisoned".to_string(),
        })?;
        f(&mut *current);
        Ok(())
    }
}

#[async_trait]
impl PresentationTarget for ConsoleTarget {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn set_display_name(&self, display_name: &str) -> Result<(), PresentationError> {
        tracing::info!("[{}] display name -> {}", self.name, display_name);
        self.set(|current| current.0 = Some(display_name.to_string()))
    }

    async fn set_activity(&self, activity: &str) -> Result<(), PresentationError> {
        tracing::info!("[{}] watching -> {}", self.name, activity);
        self.set(|current| current.1 = Some(activity.to_string()))
    }
}

/// Host with a fixed list of console targets, always ready
#[derive(Default)]
pub struct ConsoleHost {
    targets: Vec<Arc<ConsoleTarget>>,
}

impl ConsoleHost {
    pub fn new(targets: Vec<Arc<ConsoleTarget>>) -> Self {
        Self { targets }
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self::new(vec![Arc::new(ConsoleTarget::new(name))])
    }
}

#[async_trait]
impl PresentationHost for ConsoleHost {
    async fn targets(&self) -> Result<Vec<Arc<dyn PresentationTarget>>, PresentationError> {
        Ok(self
            .targets
            .iter()
            .map(|target| target.clone() as Arc<dyn PresentationTarget>)
            .collect())
    }
}
