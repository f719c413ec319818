//! Presentation Adapters
//!
//! Presentation targets for the status scheduler.

mod console;

pub use console::{ConsoleHost, ConsoleTarget};
