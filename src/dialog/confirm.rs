//! Single-slot confirmation channel
//!
//! A dialog hands out one pending confirmation at a time. Arming the slot
//! again silently replaces the previous settle handle: only the most recent
//! waiter is ever settled, and the superseded future stays pending forever.
//! This is a documented caller-contract limitation, not a queue and not an
//! error.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::debug;

/// The at-most-one pending settle handle behind `wait()`
#[derive(Debug, Default)]
pub(crate) enum ConfirmationSlot {
    /// No outstanding waiter
    #[default]
    Idle,
    /// One outstanding waiter, settled by the next success/failure action
    Pending(oneshot::Sender<bool>),
}

impl ConfirmationSlot {
    /// Arm the slot with a fresh waiter, replacing any previous one
    ///
    /// The replaced sender is dropped here; the matching [`Confirmation`]
    /// absorbs the closed channel and never completes.
    pub(crate) fn arm(&mut self) -> Confirmation {
        if matches!(self, Self::Pending(_)) {
            debug!("replacing pending confirmation waiter; the superseded future will never settle");
        }
        let (tx, rx) = oneshot::channel();
        *self = Self::Pending(tx);
        Confirmation {
            inner: ConfirmationInner::Waiting(rx),
        }
    }

    /// Settle the pending waiter, if any
    ///
    /// Returns whether a waiter was pending. Settling an idle slot is a
    /// silent no-op. The send result is ignored: a caller that dropped its
    /// future simply never observes the outcome.
    pub(crate) fn settle(&mut self, accepted: bool) -> bool {
        match std::mem::replace(self, Self::Idle) {
            Self::Pending(tx) => {
                let _ = tx.send(accepted);
                true
            }
            Self::Idle => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

enum ConfirmationInner {
    Waiting(oneshot::Receiver<bool>),
    Abandoned,
}

/// Pending confirmation result returned by `wait()`
///
/// Resolves to `true` on a success action and `false` on a failure action.
/// A future superseded by a later `wait()` call transitions to the abandoned
/// state on its next poll and stays pending indefinitely after that; no waker
/// is registered for it again.
pub struct Confirmation {
    inner: ConfirmationInner,
}

impl Future for Confirmation {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let this = self.get_mut();
        match &mut this.inner {
            ConfirmationInner::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(accepted)) => Poll::Ready(accepted),
                Poll::Ready(Err(_)) => {
                    this.inner = ConfirmationInner::Abandoned;
                    Poll::Pending
                }
                Poll::Pending => Poll::Pending,
            },
            ConfirmationInner::Abandoned => Poll::Pending,
        }
    }
}

impl std::fmt::Debug for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.inner {
            ConfirmationInner::Waiting(_) => "Waiting",
            ConfirmationInner::Abandoned => "Abandoned",
        };
        f.debug_struct("Confirmation").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_settle_resolves_waiter() {
        let mut slot = ConfirmationSlot::default();
        let confirmation = slot.arm();
        assert!(slot.is_pending());

        assert!(slot.settle(true));
        assert!(!slot.is_pending());
        assert!(confirmation.await);
    }

    #[tokio::test]
    async fn test_settle_rejecting_resolves_false() {
        let mut slot = ConfirmationSlot::default();
        let confirmation = slot.arm();
        assert!(slot.settle(false));
        assert!(!confirmation.await);
    }

    #[test]
    fn test_settle_without_waiter_is_noop() {
        let mut slot = ConfirmationSlot::default();
        assert!(!slot.settle(true));
        assert!(!slot.settle(false));
    }

    #[test]
    fn test_rearm_orphans_previous_waiter() {
        let mut slot = ConfirmationSlot::default();
        let mut first = slot.arm();
        let mut second = slot.arm();

        assert!(slot.settle(true));

        // Only the most recent waiter observes the outcome
        assert_eq!((&mut second).now_or_never(), Some(true));
        assert_eq!((&mut first).now_or_never(), None);
    }

    #[test]
    fn test_orphaned_waiter_stays_pending_across_polls() {
        let mut slot = ConfirmationSlot::default();
        let mut first = slot.arm();
        let _second = slot.arm();

        // The superseded future never settles, no matter how often it is polled
        assert_eq!((&mut first).now_or_never(), None);
        assert_eq!((&mut first).now_or_never(), None);
    }
}
