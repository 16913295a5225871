//! # Policy Classification
//!
//! Turns a finished [`ProbeTask`] into a [`Verdict`]: the bucket it belongs in and the
//! line reported for it.
//!
//! | Expectation | Outcome                   | Bucket         |
//! |-------------|---------------------------|----------------|
//! | allow       | connected                 | `allowSuccess` |
//! | allow       | any failure               | `allowFailed`  |
//! | deny        | refused / timed out       | `denySuccess`  |
//! | deny        | connected                 | `denyFailed`   |
//! | deny        | any other failure         | `denyFailed`   |
//!
//! A deny entry that fails for an unrecognised reason cannot confirm the block, so it
//! counts against the policy.

use std::fmt;

use crate::probe::{ProbeFailure, ProbeOutcome};

/// Whether an address must be reachable or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    Allow,
    Deny,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Allow => write!(f, "allow"),
            Expectation::Deny => write!(f, "deny"),
        }
    }
}

/// One address to probe, owned by a single probe task until it is handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTask {
    pub expectation: Expectation,
    pub address: String,
    /// `None` means the connection succeeded.
    pub outcome: Option<ProbeFailure>,
}

impl ProbeTask {
    pub fn new(expectation: Expectation, address: impl Into<String>) -> Self {
        Self {
            expectation,
            address: address.into(),
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: ProbeOutcome) -> Self {
        self.outcome = outcome.err();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    AllowSuccess,
    AllowFailed,
    DenySuccess,
    DenyFailed,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::AllowSuccess,
        Bucket::AllowFailed,
        Bucket::DenySuccess,
        Bucket::DenyFailed,
    ];

    pub fn is_failure(self) -> bool {
        matches!(self, Bucket::AllowFailed | Bucket::DenyFailed)
    }

    pub fn key(self) -> &'static str {
        match self {
            Bucket::AllowSuccess => "allowSuccess",
            Bucket::AllowFailed => "allowFailed",
            Bucket::DenySuccess => "denySuccess",
            Bucket::DenyFailed => "denyFailed",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub bucket: Bucket,
    pub message: String,
}

pub fn classify(task: &ProbeTask) -> Verdict {
    let addr = &task.address;
    let (bucket, message) = match (task.expectation, &task.outcome) {
        (Expectation::Allow, None) => (Bucket::AllowSuccess, format!("Allow {addr} OK")),
        (Expectation::Allow, Some(failure)) => {
            (Bucket::AllowFailed, format!("Allow {addr}: {failure}"))
        }
        (Expectation::Deny, None) => (
            Bucket::DenyFailed,
            format!("Deny {addr} unexpected success connection"),
        ),
        (Expectation::Deny, Some(failure)) if failure.is_blocked() => {
            (Bucket::DenySuccess, format!("Deny {addr}: OK"))
        }
        (Expectation::Deny, Some(failure)) => {
            (Bucket::DenyFailed, format!("Deny {addr} {failure}"))
        }
    };

    Verdict { bucket, message }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
