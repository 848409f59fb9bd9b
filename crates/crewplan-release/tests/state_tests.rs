use crewplan_release::{validate_transition, PhaseRelease, ReleaseState, StateMachineError};
use proptest::prelude::*;

fn any_state() -> impl Strategy<Value = ReleaseState> {
    prop_oneof![
        Just(ReleaseState::Idle),
        "[0-9]{1,2}".prop_map(ReleaseState::Released),
        "[0-9]{1,2}".prop_map(ReleaseState::WaitingCompletion),
        Just(ReleaseState::Advancing),
        Just(ReleaseState::Done),
    ]
}

#[test]
fn done_is_terminal() {
    for to in [
        ReleaseState::Idle,
        ReleaseState::Released("1".to_string()),
        ReleaseState::Advancing,
        ReleaseState::Done,
    ] {
        assert!(validate_transition(&ReleaseState::Done, &to).is_err());
    }
}

#[test]
fn released_must_wait_on_same_phase() {
    let from = ReleaseState::Released("2".to_string());
    assert!(validate_transition(&from, &ReleaseState::WaitingCompletion("2".to_string())).is_ok());
    assert_eq!(
        validate_transition(&from, &ReleaseState::WaitingCompletion("3".to_string())),
        Err(StateMachineError::IllegalTransition {
            from: from.clone(),
            to: ReleaseState::WaitingCompletion("3".to_string()),
        })
    );
}

proptest! {
    #[test]
    fn prop_no_transition_out_of_done_or_into_idle(from in any_state(), to in any_state()) {
        if from.is_terminal() || to == ReleaseState::Idle {
            prop_assert!(validate_transition(&from, &to).is_err());
        }
    }

    #[test]
    fn prop_advance_releases_every_key_once(count in 0usize..12) {
        let keys: Vec<String> = (0..count).map(|k| k.to_string()).collect();
        let release = PhaseRelease::new(keys.clone());

        let mut released = Vec::new();
        let mut state = ReleaseState::Idle;
        while !state.is_terminal() {
            let next = release.advance(&state).unwrap();
            prop_assert!(validate_transition(&state, &next).is_ok());
            if let ReleaseState::Released(key) = &next {
                released.push(key.clone());
            }
            state = next;
        }

        prop_assert_eq!(released, keys);
        prop_assert_eq!(release.snapshot().index, count);
    }
}
