use std::process::ExitCode;
use std::time::Duration;

use colored::*;
use reachr_common::{config::Config, success, warn};
use reachr_core::RunContext;
use reachr_core::network::TcpDialer;
use reachr_core::probe::{self, ProbeFailure};
use serde_json::json;

use crate::commands::check::{EXIT_ABORTED, EXIT_VIOLATION};
use crate::terminal::{colors, print};

pub async fn probe(addr: &str, timeout: Duration, cfg: &Config) -> anyhow::Result<ExitCode> {
    let (ctx, handle) = RunContext::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let Some(outcome) = probe::probe(&TcpDialer, addr, timeout, &ctx).await else {
        let reason = ctx.err().map(|reason| reason.to_string()).unwrap_or_default();
        warn!("Probe of {addr} was interrupted: {reason}");
        return Ok(ExitCode::from(EXIT_ABORTED));
    };

    if cfg.json {
        let failure = outcome.as_ref().err();
        let report = json!({
            "address": addr,
            "connected": outcome.is_ok(),
            "failure": failure.map(ToString::to_string),
            "kind": failure.map(failure_kind),
            "blocked": failure.is_some_and(ProbeFailure::is_blocked),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print::aligned_line("Address", addr.color(colors::ADDRESS));
        print::aligned_line("Timeout", format!("{}ms", timeout.as_millis()));
        match &outcome {
            Ok(()) => print::aligned_line("Outcome", "connected".color(colors::PASS)),
            Err(failure) => {
                print::aligned_line("Outcome", failure_kind(failure).color(colors::FAIL));
                print::aligned_line("Descriptor", failure.to_string());
                let blocked = if failure.is_blocked() { "yes" } else { "no" };
                print::aligned_line("Blocked", blocked);
            }
        }
    }

    match outcome {
        Ok(()) => {
            success!("{addr} accepted the connection");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::from(EXIT_VIOLATION)),
    }
}

fn failure_kind(failure: &ProbeFailure) -> &'static str {
    match failure {
        ProbeFailure::Refused => "refused",
        ProbeFailure::TimedOut => "timed out",
        ProbeFailure::Other(_) => "other",
    }
}
