//! Error types for phase release
//!
//! Board failures are surfaced unchanged; nothing in this crate retries.

use crate::state::ReleaseState;

/// Errors reported by a [`BoardClient`](crate::BoardClient)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Board API answered with a failure status
    #[error("board transport error (status {status}): {message}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Board, list or card does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other client failure
    #[error("board error: {0}")]
    Other(String),
}

impl BoardError {
    /// Create transport error
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }
}

/// Release state machine violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition not in the allowed table
    #[error("illegal transition {from} -> {to}")]
    IllegalTransition {
        /// State before
        from: ReleaseState,
        /// Requested state
        to: ReleaseState,
    },

    /// State moved since the caller last observed it
    #[error("transition in progress: expected {expected}, found {actual}")]
    TransitionInProgress {
        /// State the caller advanced from
        expected: ReleaseState,
        /// State actually held
        actual: ReleaseState,
    },

    /// Every phase has already been released
    #[error("release already finished")]
    Finished,
}

/// Errors from running a release workflow
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// Board call failed
    #[error("board call failed: {0}")]
    Board(#[from] BoardError),

    /// State machine rejected a step
    #[error("release state error: {0}")]
    State(#[from] StateMachineError),

    /// Phase cards were still open after the configured number of polls
    #[error("phase {phase} not complete after {polls} polls")]
    PollLimitExceeded {
        /// Phase key being waited on
        phase: String,
        /// Polls performed
        polls: u32,
    },
}
