use thiserror::Error;

use crate::context::CancelReason;
use crate::results::ResultSet;

/// Ways a run can end without a clean pass.
#[derive(Debug, Error)]
pub enum RunError {
    /// Neither list contained an address.
    #[error("no test conditions")]
    NoTestConditions,

    /// The run context ended before every probe reported. Partial results are dropped.
    #[error(transparent)]
    Cancelled(#[from] CancelReason),

    /// The run completed but at least one address contradicted its expectation.
    #[error("has failed test conditions")]
    PolicyViolation { results: ResultSet },

    /// Every probe task went away while some had still not reported.
    #[error("{outstanding} probe(s) exited without reporting a result")]
    ProbesAborted { outstanding: usize },
}

impl RunError {
    /// The full result set, available only for policy violations.
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            RunError::PolicyViolation { results } => Some(results),
            _ => None,
        }
    }

    pub fn into_results(self) -> Option<ResultSet> {
        match self {
            RunError::PolicyViolation { results } => Some(results),
            _ => None,
        }
    }
}
