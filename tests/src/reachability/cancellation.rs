#![cfg(test)]
use std::future::pending;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reachr_core::probe::{Dialer, ProbeOutcome};
use reachr_core::runner::Runner;
use reachr_core::{CancelReason, RunContext, RunError};

use crate::utils::OpenPort;

/// Connects for real, except for addresses that should never answer.
struct Blackhole {
    silent: String,
}

#[async_trait]
impl Dialer for Blackhole {
    async fn dial(&self, addr: &str, timeout: Duration) -> ProbeOutcome {
        if addr == self.silent {
            return pending().await;
        }
        reachr_core::network::TcpDialer.dial(addr, timeout).await
    }
}

#[tokio::test]
async fn cancelling_returns_promptly_without_results() {
    let open = OpenPort::bind().await;
    let silent = "192.0.2.1:9".to_string();
    let runner = Runner::new(Blackhole {
        silent: silent.clone(),
    });

    let (ctx, handle) = RunContext::new();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let started = Instant::now();
    let result = runner
        .run(&[open.address()], &[silent], Duration::from_secs(30), &ctx)
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    match result {
        Err(RunError::Cancelled(CancelReason::Cancelled)) => {}
        other => panic!("expected cancellation, got {other:?}"),
    }
}

#[tokio::test]
async fn run_deadline_caps_slow_probes() {
    let silent = "192.0.2.1:9".to_string();
    let runner = Runner::new(Blackhole {
        silent: silent.clone(),
    });
    let ctx = RunContext::background().with_timeout(Duration::from_millis(100));

    let err = runner
        .run(&[silent], &[], Duration::from_secs(30), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Cancelled(CancelReason::DeadlineExceeded)));
    assert!(err.results().is_none());
}
