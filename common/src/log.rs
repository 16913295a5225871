//! # Status Logging
//!
//! Thin wrappers around [`tracing`] used for user-facing status lines.
//!
//! Every macro logs under a dedicated `reachr::status::*` target so the terminal
//! formatter can pick a matching symbol, and so the whole family can be enabled with a
//! single `reachr::status=info` filter directive.

pub const TARGET_ROOT: &str = "reachr::status";
pub const TARGET_INFO: &str = "reachr::status::info";
pub const TARGET_SUCCESS: &str = "reachr::status::success";
pub const TARGET_WARN: &str = "reachr::status::warn";
pub const TARGET_ERROR: &str = "reachr::status::error";
pub const TARGET_PRINT: &str = "reachr::status::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::log::TARGET_INFO, $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::log::TARGET_SUCCESS, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: $crate::log::TARGET_WARN, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!(target: $crate::log::TARGET_ERROR, $($arg)*)
    };
}
