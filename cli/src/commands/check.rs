use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use reachr_common::{config::Config, error, info, policy::Policy, success, targets, warn};
use reachr_core::{CancelHandle, ResultSet, RunContext, RunError, Runner};

use crate::commands::CheckArgs;
use crate::terminal::{format, spinner};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

pub const EXIT_VIOLATION: u8 = 1;
pub const EXIT_ABORTED: u8 = 2;

pub async fn check(args: CheckArgs, cfg: &Config) -> anyhow::Result<ExitCode> {
    let policy = match build_policy(&args) {
        Ok(policy) => policy,
        Err(err) => {
            error!("{err:#}");
            return Ok(ExitCode::from(EXIT_ABORTED));
        }
    };
    info!(
        "Checking {} allowed and {} denied addresses",
        policy.allow.len(),
        policy.deny.len()
    );

    let (ctx, handle) = RunContext::new();
    let ctx = match args.deadline {
        Some(secs) => ctx.with_timeout(Duration::from_secs(secs)),
        None => ctx,
    };
    cancel_on_interrupt(handle);

    let mut runner = Runner::default();
    if !cfg.json && cfg.quiet < 2 {
        spinner::report_probe_progress(0, policy.allow.len() + policy.deny.len());
        runner = runner.on_result(spinner::report_probe_progress);
    }

    let start_time = Instant::now();
    let outcome = runner.run_policy(&policy, DEFAULT_PROBE_TIMEOUT, &ctx).await;
    spinner::finish();

    match outcome {
        Ok(results) => {
            emit(&results, start_time.elapsed(), cfg)?;
            success!("Every address matches its policy");
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ RunError::PolicyViolation { .. }) => {
            if let Some(results) = err.results() {
                emit(results, start_time.elapsed(), cfg)?;
            }
            error!("Run {err}");
            Ok(ExitCode::from(EXIT_VIOLATION))
        }
        Err(err @ RunError::NoTestConditions) => {
            error!("{err}: pass addresses with --allow/--deny or a --policy file");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
        Err(err) => {
            error!("Run aborted: {err}");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
    }
}

/// Merges the optional policy file with the addresses and timeout given as flags.
fn build_policy(args: &CheckArgs) -> anyhow::Result<Policy> {
    let mut policy = match &args.policy {
        Some(path) => Policy::load(path).context("could not load the policy")?,
        None => Policy::default(),
    };

    policy.extend(
        targets::split_addresses(&args.allow),
        targets::split_addresses(&args.deny),
    );
    if args.timeout.is_some() {
        policy.timeout_ms = args.timeout;
    }

    Ok(policy)
}

fn cancel_on_interrupt(handle: CancelHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding probes");
            handle.cancel();
        }
    });
}

fn emit(results: &ResultSet, elapsed: Duration, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        let json = serde_json::to_string_pretty(results).context("could not serialize results")?;
        println!("{json}");
    } else {
        format::report(results, elapsed, cfg);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
