//! Send lifecycle hooks
//!
//! The transport notifies registered listeners synchronously, in
//! registration order, at two points: immediately before dispatch (where a
//! listener may cancel the send) and immediately after the API call (where
//! the event carries the send outcome).

/// Outcome of a completed send, as reported to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider accepted at least one message
    Success,
    /// The provider accepted no messages
    Failed,
}

/// Event passed to listeners around a single send call
#[derive(Debug, Default)]
pub struct SendEvent {
    cancelled: bool,
    result: Option<SendOutcome>,
}

impl SendEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the send. Only honored before dispatch.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Outcome of the send; `None` until the API call has completed
    pub fn result(&self) -> Option<SendOutcome> {
        self.result
    }

    pub(crate) fn set_result(&mut self, outcome: SendOutcome) {
        self.result = Some(outcome);
    }
}

/// Observer of send lifecycle events
///
/// Both hooks default to no-ops so listeners only implement the point they
/// care about.
pub trait SendListener: Send + Sync {
    /// Called before credentials are checked and before any network call.
    /// Calling [`SendEvent::cancel`] aborts the send.
    fn before_send(&self, _event: &mut SendEvent) {}

    /// Called after the API call with the outcome set. Not called when the
    /// send was cancelled or failed before dispatch.
    fn after_send(&self, _event: &SendEvent) {}
}
