//! Terminal helpers for the CLI

mod progress;

pub use progress::ProgressTracker;
