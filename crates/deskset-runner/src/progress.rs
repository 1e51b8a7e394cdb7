//! Delivery of state transitions to observers.

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::RunnerState;

/// Receives every state transition, once, in order.
///
/// `emit` is called synchronously from the run; implementations must not
/// block.
pub trait ProgressSink: Send + Sync {
    /// Deliver one transition.
    fn emit(&self, state: &RunnerState);
}

impl ProgressSink for UnboundedSender<RunnerState> {
    fn emit(&self, state: &RunnerState) {
        if self.send(state.clone()).is_err() {
            trace!(%state, "progress receiver dropped");
        }
    }
}

/// Adapts a closure into a [`ProgressSink`].
pub struct Observer<F>(pub F);

impl<F> ProgressSink for Observer<F>
where
    F: Fn(&RunnerState) + Send + Sync,
{
    fn emit(&self, state: &RunnerState) {
        (self.0)(state);
    }
}
