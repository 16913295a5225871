#![cfg(test)]
use std::time::Duration;

use reachr_common::policy::Policy;
use reachr_core::{ResultSet, RunContext, RunError, run};
use reachr_core::runner::Runner;

use crate::utils::{OpenPort, closed_port};

const PROBE_TIMEOUT: Duration = Duration::from_millis(200);

/// Nothing listening: an allow entry fails with the refusal, a deny entry passes.
#[tokio::test]
async fn closed_port_fails_allow_and_passes_deny() {
    let addr = closed_port().await;
    let ctx = RunContext::background();

    let err = run(&[addr.clone()], &[], PROBE_TIMEOUT, &ctx)
        .await
        .expect_err("allow against a closed port must fail");
    let results: ResultSet = err.into_results().expect("violation carries results");
    assert_eq!(results.allow_failed(), [format!("Allow {addr}: connection refused")]);
    assert_eq!(results.len(), 1);

    let results = run(&[], &[addr.clone()], PROBE_TIMEOUT, &ctx)
        .await
        .expect("deny against a closed port must pass");
    assert_eq!(results.deny_success(), [format!("Deny {addr}: OK")]);
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn open_port_passes_allow_and_fails_deny() {
    let port = OpenPort::bind().await;
    let addr = port.address();
    let ctx = RunContext::background();

    let results = run(&[addr.clone()], &[], PROBE_TIMEOUT, &ctx).await.unwrap();
    assert_eq!(results.allow_success(), [format!("Allow {addr} OK")]);

    let err = run(&[], &[addr.clone()], PROBE_TIMEOUT, &ctx).await.unwrap_err();
    assert!(matches!(err, RunError::PolicyViolation { .. }));
    assert_eq!(
        err.results().unwrap().deny_failed(),
        [format!("Deny {addr} unexpected success connection")]
    );
}

#[tokio::test]
async fn mixed_policy_lands_every_address_once() {
    let open_a = OpenPort::bind().await;
    let open_b = OpenPort::bind().await;
    let closed = closed_port().await;

    let allow = vec![open_a.address(), open_b.address(), closed.clone()];
    let deny = vec![closed.clone(), open_a.address(), "malformed".to_string()];

    let err = run(&allow, &deny, PROBE_TIMEOUT, &RunContext::background())
        .await
        .unwrap_err();
    let results = err.into_results().unwrap();

    assert_eq!(results.len(), allow.len() + deny.len());
    assert_eq!(results.allow_success().len(), 2);
    assert_eq!(results.allow_failed().len(), 1);
    assert_eq!(results.deny_success(), [format!("Deny {closed}: OK")]);
    assert_eq!(results.deny_failed().len(), 2);
    assert!(results.deny_failed().iter().any(|line| line.starts_with("Deny malformed ")));
}

#[tokio::test]
async fn empty_lists_are_rejected() {
    let result = run(&[], &[], PROBE_TIMEOUT, &RunContext::background()).await;
    assert!(matches!(result, Err(RunError::NoTestConditions)));
}

#[tokio::test]
async fn policy_file_drives_a_run() {
    let open = OpenPort::bind().await;
    let closed = closed_port().await;
    let raw = format!(
        r#"{{"allow": ["{}"], "deny": ["{}"], "timeout_ms": 300}}"#,
        open.address(),
        closed
    );
    let policy = Policy::from_json(&raw).unwrap();

    let results = Runner::default()
        .run_policy(&policy, Duration::from_secs(5), &RunContext::background())
        .await
        .unwrap();

    assert_eq!(results.allow_success().len(), 1);
    assert_eq!(results.deny_success().len(), 1);
    assert!(!results.has_failures());
}
