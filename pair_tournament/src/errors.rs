//! Engine error types.

use thiserror::Error;

use crate::entities::{MatchId, MatchStatus, Round};

/// Engine errors
///
/// Every variant signals a caller bug or a broken structural invariant.
/// Operational shortfalls (a match that does not fit in the schedule) are
/// returned as data by the scheduler instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input outside of what the engine can work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed configuration value
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Bracket destination match was never generated
    #[error("Bracket match not found: {round} position {position}")]
    BracketSlotNotFound { round: Round, position: u32 },

    /// Match not present in the provided collection
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Match lifecycle transition not allowed from the current status
    #[error("Match {match_id} is {actual}, cannot {action}")]
    InvalidState {
        match_id: MatchId,
        actual: MatchStatus,
        action: &'static str,
    },
}

impl EngineError {
    /// True for the errors that mean something expected to exist is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::BracketSlotNotFound { .. } | EngineError::MatchNotFound(_)
        )
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
