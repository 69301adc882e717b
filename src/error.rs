//! Error taxonomy for the turn-resolution engine.
//!
//! Every failure here is locally recoverable: a rejected submission or
//! oracle failure leaves the previous state fully intact, and persistence
//! corruption is recovered by starting a fresh game. Display strings are
//! the short in-universe messages surfaced to the player.

use thiserror::Error;

/// Reasons a directive submission is rejected before any work happens.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("the chronicle requires a directive or a destination")]
    EmptyDirective,
    #[error("the oracle is already being consulted")]
    TurnInFlight,
    #[error("this life has ended; choose a successor first")]
    GameOver,
}

/// Failures of the external narrative oracle. A timeout is deliberately
/// distinct from a well-formed error response: the turn is not applied in
/// either case, but the player message differs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("The Oracle is taking too long to transcribe the heavens. Try again.")]
    Timeout,
    #[error("A disturbance in the chronicles has occurred.")]
    Backend(String),
}

/// Top-level engine failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] SubmitError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    /// An arithmetic or bookkeeping failure while computing the candidate
    /// next state. The previous state is preserved unchanged.
    #[error("the chronicle rejected the entry: {0}")]
    StateApply(String),
    #[error("no such lineage entry: {0}")]
    UnknownLineageEntry(usize),
    #[error("no succession is pending")]
    NoSuccessionPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_distinct_from_backend_failure() {
        let timeout = OracleError::Timeout.to_string();
        let backend = OracleError::Backend("http 500".into()).to_string();
        assert_ne!(timeout, backend);
        assert!(timeout.contains("too long"));
    }

    #[test]
    fn submit_errors_convert_into_engine_errors() {
        let err: EngineError = SubmitError::TurnInFlight.into();
        assert!(matches!(err, EngineError::Rejected(SubmitError::TurnInFlight)));
    }
}
