//! # Run Orchestration
//!
//! A run probes every address on both lists at once and folds the results into a
//! [`ResultSet`].
//!
//! 1. One task per address is spawned up front: allow entries first, then deny entries.
//!    There is no worker pool; the number of probes in flight equals the number of
//!    addresses.
//! 2. Each task dials, attaches the outcome to its [`ProbeTask`] and hands it back over a
//!    bounded queue. Handing back races against the [`RunContext`], so a task never
//!    waits on a collector that has already given up.
//! 3. The collector classifies results in arrival order until every task has reported,
//!    or returns [`RunError::Cancelled`] as soon as the context ends.

use std::sync::Arc;
use std::time::Duration;

use reachr_common::policy::Policy;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info, info_span, trace, warn};

use crate::context::RunContext;
use crate::error::RunError;
use crate::network::TcpDialer;
use crate::policy::{self, Expectation, ProbeTask};
use crate::probe::{self, Dialer};
use crate::results::ResultSet;

/// Capacity of the queue between probe tasks and the collector.
pub const RESULT_QUEUE_CAPACITY: usize = 10;

type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

pub struct Runner {
    dialer: Arc<dyn Dialer>,
    on_result: Option<ProgressCallback>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(TcpDialer)
    }
}

impl Runner {
    pub fn new<D: Dialer + 'static>(dialer: D) -> Self {
        Self::with_dialer(Arc::new(dialer))
    }

    pub fn with_dialer(dialer: Arc<dyn Dialer>) -> Self {
        Self {
            dialer,
            on_result: None,
        }
    }

    /// Called with `(completed, total)` each time a probe result is classified.
    pub fn on_result<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_result = Some(Box::new(callback));
        self
    }

    /// Probes every address in `allow` and `deny` and classifies the outcomes.
    ///
    /// `timeout` bounds each connection attempt; `ctx` bounds the run as a whole.
    pub async fn run(
        &self,
        allow: &[String],
        deny: &[String],
        timeout: Duration,
        ctx: &RunContext,
    ) -> Result<ResultSet, RunError> {
        let total = allow.len() + deny.len();
        if total == 0 {
            return Err(RunError::NoTestConditions);
        }

        let span = info_span!("run", total, allow = allow.len(), deny = deny.len());
        self.fan_out_and_collect(allow, deny, timeout, ctx)
            .instrument(span)
            .await
    }

    /// Runs the lists of a loaded policy. The policy's own timeout wins over `timeout`.
    pub async fn run_policy(
        &self,
        policy: &Policy,
        timeout: Duration,
        ctx: &RunContext,
    ) -> Result<ResultSet, RunError> {
        let timeout = policy.timeout().unwrap_or(timeout);
        self.run(&policy.allow, &policy.deny, timeout, ctx).await
    }

    async fn fan_out_and_collect(
        &self,
        allow: &[String],
        deny: &[String],
        timeout: Duration,
        ctx: &RunContext,
    ) -> Result<ResultSet, RunError> {
        let total = allow.len() + deny.len();
        let (result_tx, mut result_rx) = mpsc::channel::<ProbeTask>(RESULT_QUEUE_CAPACITY);

        let tasks = allow
            .iter()
            .map(|addr| ProbeTask::new(Expectation::Allow, addr.as_str()))
            .chain(deny.iter().map(|addr| ProbeTask::new(Expectation::Deny, addr.as_str())));

        for task in tasks {
            tokio::spawn(execute(
                Arc::clone(&self.dialer),
                task,
                timeout,
                ctx.clone(),
                result_tx.clone(),
            ));
        }
        drop(result_tx);

        info!(?timeout, "probes launched");

        let mut results = ResultSet::default();
        let mut remaining = total;

        while remaining > 0 {
            tokio::select! {
                biased;
                reason = ctx.cancelled() => {
                    warn!(%reason, remaining, "run aborted before all probes reported");
                    return Err(RunError::Cancelled(reason));
                }
                received = result_rx.recv() => {
                    let Some(task) = received else {
                        return Err(RunError::ProbesAborted { outstanding: remaining });
                    };

                    let verdict = policy::classify(&task);
                    debug!(
                        addr = %task.address,
                        expectation = %task.expectation,
                        bucket = %verdict.bucket,
                        "probe classified"
                    );
                    results.record(verdict);

                    remaining -= 1;
                    if let Some(callback) = &self.on_result {
                        callback(total - remaining, total);
                    }
                }
            }
        }

        if results.has_failures() {
            info!(failures = results.failures(), "run finished with policy violations");
            return Err(RunError::PolicyViolation { results });
        }

        info!("run finished, every address matched its policy");
        Ok(results)
    }
}

/// Probes with the TCP dialer.
pub async fn run(
    allow: &[String],
    deny: &[String],
    timeout: Duration,
    ctx: &RunContext,
) -> Result<ResultSet, RunError> {
    Runner::default().run(allow, deny, timeout, ctx).await
}

async fn execute(
    dialer: Arc<dyn Dialer>,
    task: ProbeTask,
    timeout: Duration,
    ctx: RunContext,
    result_tx: mpsc::Sender<ProbeTask>,
) {
    let Some(outcome) = probe::probe(dialer.as_ref(), &task.address, timeout, &ctx).await else {
        trace!(addr = %task.address, "probe abandoned");
        return;
    };

    let task = task.with_outcome(outcome);

    tokio::select! {
        biased;
        _ = ctx.cancelled() => {}
        sent = result_tx.send(task) => {
            if sent.is_err() {
                trace!("collector gone, result dropped");
            }
        }
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
