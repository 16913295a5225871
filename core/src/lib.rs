//! # reachr core
//!
//! Verifies a reachability policy by dialing every listed address concurrently and
//! checking each outcome against what the policy expects.
//!
//! * **[`probe`]**: one connection attempt per address, behind the [`probe::Dialer`] seam.
//! * **[`network`]**: the concrete TCP dialer.
//! * **[`policy`]**: expectations and the classification of a finished probe.
//! * **[`results`]**: the four result buckets handed back to callers.
//! * **[`runner`]**: fan-out/fan-in orchestration of a whole run.
//! * **[`context`]**: cancellation and deadlines shared by everything in a run.

pub mod context;
pub mod error;
pub mod network;
pub mod policy;
pub mod probe;
pub mod results;
pub mod runner;

pub use context::{CancelHandle, CancelReason, RunContext};
pub use error::RunError;
pub use results::ResultSet;
pub use runner::{Runner, run};
