//! Shared building blocks for the `reachr` crates: run configuration, policy files,
//! address list parsing and the status-log macros used across the workspace.

pub mod config;
pub mod log;
pub mod policy;
pub mod targets;

#[doc(hidden)]
pub use tracing as __tracing;
