//! Page-navigation progress signals.
//!
//! The server announces live navigation with loading start/stop commands;
//! the runtime forwards them to a [`ProgressIndicator`]. What the indicator
//! renders (a top bar, a spinner, nothing) is its own concern - only the
//! signal routing lives here.

/// Collaborator notified when live navigation starts and stops loading.
///
/// `Send` because the runtime that owns the indicator is handed to the
/// async driver task.
pub trait ProgressIndicator: Send {
    fn loading_started(&mut self);
    fn loading_stopped(&mut self);
}

/// Default indicator that ignores the signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressIndicator for NoopProgress {
    fn loading_started(&mut self) {}
    fn loading_stopped(&mut self) {}
}
