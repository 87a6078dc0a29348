//! Scoped one-shot timers.
//!
//! A [`ScopedTimer`] owns at most one pending expiry. Restarting it aborts the
//! pending one first, and dropping it aborts whatever is still pending, so an
//! expiry can never outlive the view that armed it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::trace;

pub struct ScopedTimer<A> {
    name: &'static str,
    pending: Option<AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> ScopedTimer<A>
where
    A: Send + 'static,
{
    /// Create an unarmed timer that delivers its action on `action_tx`.
    pub fn new(name: &'static str, action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self { name, pending: None, action_tx }
    }

    /// Arm the timer to send `action` after `after`, superseding any pending expiry.
    pub fn restart(&mut self, after: Duration, action: A) {
        self.cancel();

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(action);
        });

        trace!(timer = self.name, ?after, "timer armed");
        self.pending = Some(handle.abort_handle());
    }

    /// Abort the pending expiry, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<A> Drop for ScopedTimer<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
