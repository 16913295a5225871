//! # Run Context
//!
//! A [`RunContext`] carries the cancellation signal and optional deadline that govern a
//! whole run. It is cheap to clone; every probe task holds its own copy and watches the
//! same signal as the collector.
//!
//! Explicit cancellation goes through the [`CancelHandle`] returned by
//! [`RunContext::new`]. Deadlines only ever tighten: applying a later deadline to a
//! context that already has an earlier one keeps the earlier one.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Why a context stopped being live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CancelReason {
    #[error("context canceled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    cancel_rx: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Cancels every [`RunContext`] derived from the one it was created with.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

impl RunContext {
    pub fn new() -> (Self, CancelHandle) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = Self {
            cancel_rx,
            deadline: None,
        };
        let handle = CancelHandle {
            cancel_tx: Arc::new(cancel_tx),
        };
        (ctx, handle)
    }

    /// A context that can only end through a deadline added later.
    pub fn background() -> Self {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            cancel_rx,
            deadline: None,
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the reason this context ended, or `None` while it is still live.
    pub fn err(&self) -> Option<CancelReason> {
        if *self.cancel_rx.borrow() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    ///
    /// An explicit cancel takes precedence when both have already happened.
    pub async fn cancelled(&self) -> CancelReason {
        let mut cancel_rx = self.cancel_rx.clone();

        let explicit = async {
            let closed = cancel_rx.wait_for(|cancelled| *cancelled).await.is_err();
            if closed {
                // handle dropped without cancelling, only the deadline is left
                pending::<()>().await;
            }
        };

        tokio::select! {
            biased;
            _ = explicit => CancelReason::Cancelled,
            _ = expire(self.deadline) => CancelReason::DeadlineExceeded,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::background()
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending::<()>().await,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const GRACE: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn fresh_context_is_live() {
        let (ctx, _handle) = RunContext::new();
        assert_eq!(ctx.err(), None);

        let waited = timeout(Duration::from_millis(50), ctx.cancelled()).await;
        assert!(waited.is_err(), "live context should not resolve");
    }

    #[tokio::test]
    async fn cancel_reaches_every_clone() {
        let (ctx, handle) = RunContext::new();
        let clone = ctx.clone();

        let waiter = tokio::spawn(async move { clone.cancelled().await });
        handle.cancel();

        assert_eq!(timeout(GRACE, waiter).await.unwrap().unwrap(), CancelReason::Cancelled);
        assert_eq!(ctx.err(), Some(CancelReason::Cancelled));
    }

    #[tokio::test]
    async fn deadline_expires() {
        let ctx = RunContext::background().with_timeout(Duration::from_millis(30));

        let reason = timeout(GRACE, ctx.cancelled()).await.unwrap();
        assert_eq!(reason, CancelReason::DeadlineExceeded);
        assert_eq!(ctx.err(), Some(CancelReason::DeadlineExceeded));
    }

    #[tokio::test]
    async fn deadlines_only_tighten() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(60);

        let ctx = RunContext::background().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline, Some(early));

        let ctx = RunContext::background().with_deadline(late).with_deadline(early);
        assert_eq!(ctx.deadline, Some(early));
    }

    #[tokio::test]
    async fn explicit_cancel_wins_over_expired_deadline() {
        let (ctx, handle) = RunContext::new();
        let ctx = ctx.with_deadline(Instant::now());
        handle.cancel();

        assert_eq!(ctx.cancelled().await, CancelReason::Cancelled);
        assert_eq!(ctx.err(), Some(CancelReason::Cancelled));
    }

    #[tokio::test]
    async fn dropped_handle_leaves_deadline_in_charge() {
        let (ctx, handle) = RunContext::new();
        drop(handle);
        let ctx = ctx.with_timeout(Duration::from_millis(30));

        let reason = timeout(GRACE, ctx.cancelled()).await.unwrap();
        assert_eq!(reason, CancelReason::DeadlineExceeded);
    }
}
