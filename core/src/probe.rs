//! # Probe
//!
//! A probe is a single connection attempt against one address. The attempt itself is
//! delegated to a [`Dialer`], which reports success or a [`ProbeFailure`]. This layer
//! does not interpret the failure; classification against a policy happens in
//! [`crate::policy`].

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::RunContext;

/// Known phrasing for refused or timed-out connections.
///
/// Only consulted for [`ProbeFailure::Other`], when the transport could not map the
/// error onto a structured kind. Matching is case-sensitive.
pub const BLOCKED_PHRASES: &[&str] = &[
    "connection refused",
    "Connection refused",
    "i/o timeout",
    "timed out",
];

/// Why a connection attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The remote end actively rejected the connection.
    #[error("connection refused")]
    Refused,
    /// No answer within the probe timeout.
    #[error("i/o timeout")]
    TimedOut,
    /// Anything else, with the transport's own description.
    #[error("{0}")]
    Other(String),
}

impl ProbeFailure {
    /// Whether this failure shows the address is blocked (refused or silently dropped).
    pub fn is_blocked(&self) -> bool {
        match self {
            ProbeFailure::Refused | ProbeFailure::TimedOut => true,
            ProbeFailure::Other(text) => BLOCKED_PHRASES.iter().any(|phrase| text.contains(phrase)),
        }
    }
}

impl From<io::Error> for ProbeFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ProbeFailure::Refused,
            io::ErrorKind::TimedOut => ProbeFailure::TimedOut,
            _ => ProbeFailure::Other(err.to_string()),
        }
    }
}

/// Success, or the reason the connection could not be made.
pub type ProbeOutcome = Result<(), ProbeFailure>;

/// Opens a connection to an address and releases it straight away.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Attempts a connection to `addr` within `timeout`.
    ///
    /// Implementations must not keep the connection open after returning.
    async fn dial(&self, addr: &str, timeout: Duration) -> ProbeOutcome;
}

/// Runs one probe against `addr`.
///
/// Returns `None` when `ctx` ends before the dialer answers; the attempt is dropped
/// along with any half-open connection.
pub async fn probe(
    dialer: &dyn Dialer,
    addr: &str,
    timeout: Duration,
    ctx: &RunContext,
) -> Option<ProbeOutcome> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => None,
        outcome = dialer.dial(addr, timeout) => Some(outcome),
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
    use std::future::pending;

    struct Fixed(ProbeOutcome);

    #[async_trait]
    impl Dialer for Fixed {
        async fn dial(&self, _addr: &str, _timeout: Duration) -> ProbeOutcome {
            self.0.clone()
        }
    }

    struct Hang;

    #[async_trait]
    impl Dialer for Hang {
        async fn dial(&self, _addr: &str, _timeout: Duration) -> ProbeOutcome {
            pending().await
        }
    }

    #[test]
    fn io_errors_map_to_structured_kinds() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer");

        assert_eq!(ProbeFailure::from(refused), ProbeFailure::Refused);
        assert_eq!(ProbeFailure::from(timed_out), ProbeFailure::TimedOut);
        assert_eq!(
            ProbeFailure::from(reset),
            ProbeFailure::Other("connection reset by peer".into())
        );
    }

    #[test]
    fn descriptors_render_verbatim() {
        assert_eq!(ProbeFailure::Refused.to_string(), "connection refused");
        assert_eq!(ProbeFailure::TimedOut.to_string(), "i/o timeout");
        assert_eq!(ProbeFailure::Other("no route to host".into()).to_string(), "no route to host");
    }

    #[test]
    fn blocked_detection() {
        assert!(ProbeFailure::Refused.is_blocked());
        assert!(ProbeFailure::TimedOut.is_blocked());

        // Fallback phrasing
        assert!(ProbeFailure::Other("dial tcp 10.0.0.1:22: i/o timeout".into()).is_blocked());
        assert!(ProbeFailure::Other("Connection refused (os error 111)".into()).is_blocked());
        assert!(ProbeFailure::Other("operation timed out".into()).is_blocked());

        // Case-sensitive, anything else is not a confirmed block
        assert!(!ProbeFailure::Other("CONNECTION REFUSED".into()).is_blocked());
        assert!(!ProbeFailure::Other("network is unreachable".into()).is_blocked());
        assert!(!ProbeFailure::Other("invalid socket address".into()).is_blocked());
    }

    #[tokio::test]
    async fn probe_reports_dialer_outcome() {
        let ctx = RunContext::background();

        let ok = probe(&Fixed(Ok(())), "a:1", Duration::from_millis(10), &ctx).await;
        assert_eq!(ok, Some(Ok(())));

        let refused = probe(&Fixed(Err(ProbeFailure::Refused)), "a:1", Duration::from_millis(10), &ctx).await;
        assert_eq!(refused, Some(Err(ProbeFailure::Refused)));
    }

    #[tokio::test]
    async fn probe_gives_up_when_cancelled() {
        let (ctx, handle) = RunContext::new();
        let waiter = ctx.clone();
        let task = tokio::spawn(async move {
            probe(&Hang, "a:1", Duration::from_secs(60), &waiter).await
        });

        handle.cancel();

        let outcome = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn probe_skips_dial_on_ended_context() {
        let (ctx, handle) = RunContext::new();
        handle.cancel();

        let outcome = probe(&Fixed(Ok(())), "a:1", Duration::from_millis(10), &ctx).await;
        assert_eq!(outcome, None);
    }
}
