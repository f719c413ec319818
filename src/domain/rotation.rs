use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RotationError {
    #[error("Rotation must contain at least one entry")]
    Empty,
}

/// Ordered, wrapping sequence of token symbols cycled by the status display
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    entries: Vec<String>,
}

impl Rotation {
    pub fn new(entries: Vec<String>) -> Result<Self, RotationError> {
        if entries.is_empty() {
            return Err(RotationError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index following `index`, wrapping to the start
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len()
    }

    /// Entry at `index`, taken modulo the rotation length
    pub fn entry(&self, index: usize) -> &str {
        &self.entries[index % self.entries.len()]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
