//! Phase release state machine
//!
//! ```text
//! Idle ──► Released(k) ──► WaitingCompletion(k) ──► Advancing ──► Released(k')
//!   │                                                   │
//!   └──────────────────────► Done ◄─────────────────────┘
//! ```
//!
//! [`PhaseRelease`] holds the state and the phase index behind one lock.
//! Readers take a [`ReleaseSnapshot`]; the only writer is
//! [`PhaseRelease::advance`], which checks and sets under the write lock.

use crate::error::StateMachineError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a release stands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "phase", rename_all = "snake_case")]
pub enum ReleaseState {
    /// Nothing released yet
    Idle,
    /// Cards for the phase are being created
    Released(String),
    /// Cards exist; waiting for all of them to complete
    WaitingCompletion(String),
    /// Phase finished; the next one is being selected
    Advancing,
    /// Every phase completed
    Done,
}

impl ReleaseState {
    /// Phase key for states that carry one
    #[must_use]
    pub fn phase(&self) -> Option<&str> {
        match self {
            Self::Released(key) | Self::WaitingCompletion(key) => Some(key),
            Self::Idle | Self::Advancing | Self::Done => None,
        }
    }

    /// Whether no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Released(key) => write!(f, "released({key})"),
            Self::WaitingCompletion(key) => write!(f, "waiting_completion({key})"),
            Self::Advancing => write!(f, "advancing"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Validate a state transition
pub fn validate_transition(from: &ReleaseState, to: &ReleaseState) -> Result<(), StateMachineError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

fn allowed(from: &ReleaseState, to: &ReleaseState) -> bool {
    use ReleaseState::{Advancing, Done, Idle, Released, WaitingCompletion};
    match (from, to) {
        (Idle | Advancing, Released(_) | Done) | (WaitingCompletion(_), Advancing) => true,
        (Released(released), WaitingCompletion(waiting)) => released == waiting,
        _ => false,
    }
}

/// Read-only view of a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSnapshot {
    /// Current state
    pub state: ReleaseState,
    /// Index of the current (or next) phase in release order
    pub index: usize,
    /// Number of phases to release
    pub total: usize,
}

#[derive(Debug)]
struct Inner {
    keys: Vec<String>,
    index: usize,
    state: ReleaseState,
}

/// Thread-safe release progress over an ordered list of phase keys
#[derive(Debug)]
pub struct PhaseRelease {
    inner: RwLock<Inner>,
}

impl PhaseRelease {
    /// Create for phase keys already in release order
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                keys,
                index: 0,
                state: ReleaseState::Idle,
            }),
        }
    }

    /// Current state, index and phase count
    #[must_use]
    pub fn snapshot(&self) -> ReleaseSnapshot {
        let inner = self.inner.read();
        ReleaseSnapshot {
            state: inner.state.clone(),
            index: inner.index,
            total: inner.keys.len(),
        }
    }

    /// Phase keys in release order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys.clone()
    }

    /// Move one step forward from `expected`
    ///
    /// Fails with [`StateMachineError::TransitionInProgress`] when another
    /// caller already moved the release past `expected`.
    pub fn advance(&self, expected: &ReleaseState) -> Result<ReleaseState, StateMachineError> {
        let mut inner = self.inner.write();
        if inner.state != *expected {
            return Err(StateMachineError::TransitionInProgress {
                expected: expected.clone(),
                actual: inner.state.clone(),
            });
        }

        let next = match &inner.state {
            ReleaseState::Idle | ReleaseState::Advancing => inner
                .keys
                .get(inner.index)
                .map_or(ReleaseState::Done, |key| ReleaseState::Released(key.clone())),
            ReleaseState::Released(key) => ReleaseState::WaitingCompletion(key.clone()),
            ReleaseState::WaitingCompletion(_) => ReleaseState::Advancing,
            ReleaseState::Done => return Err(StateMachineError::Finished),
        };
        validate_transition(&inner.state, &next)?;

        if next == ReleaseState::Advancing {
            inner.index += 1;
        }
        tracing::debug!("Release transition: {} -> {}", inner.state, next);
        inner.state = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn released(key: &str) -> ReleaseState {
        ReleaseState::Released(key.to_string())
    }

    fn waiting(key: &str) -> ReleaseState {
        ReleaseState::WaitingCompletion(key.to_string())
    }

    #[test]
    fn allowed_table() {
        use ReleaseState::{Advancing, Done, Idle};
        assert!(validate_transition(&Idle, &released("1")).is_ok());
        assert!(validate_transition(&Idle, &Done).is_ok());
        assert!(validate_transition(&released("1"), &waiting("1")).is_ok());
        assert!(validate_transition(&waiting("1"), &Advancing).is_ok());
        assert!(validate_transition(&Advancing, &released("2")).is_ok());
        assert!(validate_transition(&Advancing, &Done).is_ok());

        assert!(validate_transition(&Idle, &Advancing).is_err());
        assert!(validate_transition(&released("1"), &waiting("2")).is_err());
        assert!(validate_transition(&released("1"), &Done).is_err());
        assert!(validate_transition(&Done, &Idle).is_err());
        assert!(validate_transition(&Done, &released("1")).is_err());
    }

    #[test]
    fn walks_all_phases_in_order() {
        let release = PhaseRelease::new(vec!["1".to_string(), "2".to_string()]);
        let mut seen = Vec::new();
        let mut state = ReleaseState::Idle;
        while !state.is_terminal() {
            state = release.advance(&state).unwrap();
            seen.push(state.clone());
        }

        assert_eq!(
            seen,
            vec![
                released("1"),
                waiting("1"),
                ReleaseState::Advancing,
                released("2"),
                waiting("2"),
                ReleaseState::Advancing,
                ReleaseState::Done,
            ]
        );
        let snapshot = release.snapshot();
        assert_eq!(snapshot.index, 2);
        assert_eq!(snapshot.total, 2);
    }

    #[test]
    fn empty_release_goes_straight_to_done() {
        let release = PhaseRelease::new(Vec::new());
        assert_eq!(release.advance(&ReleaseState::Idle).unwrap(), ReleaseState::Done);
        assert_eq!(release.advance(&ReleaseState::Done), Err(StateMachineError::Finished));
    }

    #[test]
    fn stale_expectation_is_rejected() {
        let release = PhaseRelease::new(vec!["1".to_string()]);
        release.advance(&ReleaseState::Idle).unwrap();

        let err = release.advance(&ReleaseState::Idle).unwrap_err();
        assert_eq!(
            err,
            StateMachineError::TransitionInProgress {
                expected: ReleaseState::Idle,
                actual: released("1"),
            }
        );
    }

    #[test]
    fn concurrent_advances_only_one_wins() {
        let release = Arc::new(PhaseRelease::new(vec!["1".to_string(), "2".to_string()]));
        release.advance(&ReleaseState::Idle).unwrap();
        release.advance(&released("1")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let release = Arc::clone(&release);
                std::thread::spawn(move || release.advance(&waiting("1")).is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);

        let snapshot = release.snapshot();
        assert_eq!(snapshot.state, ReleaseState::Advancing);
        assert_eq!(snapshot.index, 1);
    }

    #[test]
    fn state_serializes_tagged() {
        let json = serde_json::to_string(&released("3")).unwrap();
        assert_eq!(json, r#"{"state":"released","phase":"3"}"#);
        let json = serde_json::to_string(&ReleaseState::Done).unwrap();
        assert_eq!(json, r#"{"state":"done"}"#);
    }
}
