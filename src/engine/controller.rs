//! Uniform initialize / step / complete / reset contract
//!
//! Everything here is pure: `step` clones the incoming state and advances the
//! copy, so earlier snapshots stay valid for undo and replay.

use std::collections::HashSet;

use super::bubble::BubbleState;
use super::counting::CountingState;
use super::element::Element;
use super::event::StepEvent;
use super::heap::HeapState;
use super::insertion::InsertionState;
use super::invariant;
use super::merge::MergeState;
use super::quick::QuickState;
use super::radix::RadixState;
use super::selection::SelectionState;
use super::state::{AlgorithmId, ExecutionState};
use crate::error::{EngineError, Result};

/// Reject seeds no algorithm can run on
pub fn validate_seed(seed: &[Element]) -> Result<()> {
    if seed.is_empty() {
        return Err(EngineError::invalid_seed("dataset is empty"));
    }
    let mut seen = HashSet::with_capacity(seed.len());
    if let Some(dup) = seed.iter().find(|e| !seen.insert(e.id)) {
        return Err(EngineError::invalid_seed(format!(
            "element id {} appears more than once",
            dup.id
        )));
    }
    Ok(())
}

/// Build the starting state for `algorithm` from a copy of `seed`
pub fn initialize(algorithm: AlgorithmId, seed: &[Element]) -> Result<ExecutionState> {
    validate_seed(seed)?;
    let seed = seed.to_vec();
    let state = match algorithm {
        AlgorithmId::Bubble => ExecutionState::Bubble(BubbleState::new(seed)),
        AlgorithmId::Selection => ExecutionState::Selection(SelectionState::new(seed)),
        AlgorithmId::Insertion => ExecutionState::Insertion(InsertionState::new(seed)),
        AlgorithmId::Merge => ExecutionState::Merge(MergeState::new(seed)),
        AlgorithmId::Quick => ExecutionState::Quick(QuickState::new(seed)),
        AlgorithmId::Heap => ExecutionState::Heap(HeapState::new(seed)),
        AlgorithmId::Counting => ExecutionState::Counting(CountingState::new(seed)?),
        AlgorithmId::Radix => ExecutionState::Radix(RadixState::new(seed)),
    };
    log::debug!(
        "initialized {} over {} elements",
        algorithm,
        state.dataset().len()
    );
    Ok(state)
}

/// Advance one unit of work. A complete state comes back unchanged with
/// [`StepEvent::NoOp`].
pub fn step(state: &ExecutionState) -> (ExecutionState, StepEvent) {
    if state.is_complete() {
        return (state.clone(), StepEvent::NoOp);
    }
    let mut next = state.clone();
    let event = next.machine_mut().advance();

    if cfg!(debug_assertions) {
        if let Err(violation) = invariant::check(&next) {
            panic!("{} after {:?}", violation, event);
        }
    }

    if next.is_complete() {
        log::info!("{} finished", next.algorithm());
    }
    (next, event)
}

pub fn is_complete(state: &ExecutionState) -> bool {
    state.is_complete()
}

/// Discard any previous state and start over
pub fn reset(algorithm: AlgorithmId, seed: &[Element]) -> Result<ExecutionState> {
    initialize(algorithm, seed)
}

/// Every state from the initial one through `steps` steps later
pub fn replay(algorithm: AlgorithmId, seed: &[Element], steps: usize) -> Result<Vec<ExecutionState>> {
    let mut states = Vec::with_capacity(steps + 1);
    let mut current = initialize(algorithm, seed)?;
    for _ in 0..steps {
        let (next, _) = step(&current);
        states.push(current);
        current = next;
    }
    states.push(current);
    Ok(states)
}

/// Step until complete, returning the final state and the number of steps taken
pub fn run_to_completion(state: &ExecutionState) -> (ExecutionState, usize) {
    let mut current = state.clone();
    let mut steps = 0;
    while !current.is_complete() {
        current = step(&current).0;
        steps += 1;
    }
    (current, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::values;
    use crate::engine::Color;
    use crate::seed::{from_colors, from_values};

    #[test]
    fn test_empty_seed_is_rejected() {
        for algorithm in AlgorithmId::ALL {
            let err = initialize(algorithm, &[]).unwrap_err();
            assert!(matches!(err, EngineError::InvalidSeed { .. }));
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let seed = vec![Element::new(1, 5), Element::new(1, 6)];
        assert!(initialize(AlgorithmId::Bubble, &seed).is_err());
    }

    #[test]
    fn test_step_does_not_touch_input_state() {
        let seed = from_values(&[3, 2, 1]);
        let state = initialize(AlgorithmId::Bubble, &seed).unwrap();
        let snapshot = state.clone();
        let (next, event) = step(&state);
        assert_eq!(state, snapshot);
        assert_ne!(next, state);
        assert!(!event.is_noop());
    }

    #[test]
    fn test_step_on_complete_state_is_noop() {
        let seed = from_values(&[4, 1, 3]);
        let state = initialize(AlgorithmId::Selection, &seed).unwrap();
        let (done, steps) = run_to_completion(&state);
        assert_eq!(steps, 3);
        assert!(is_complete(&done));

        let (again, event) = step(&done);
        assert_eq!(event, StepEvent::NoOp);
        assert_eq!(again, done);
    }

    #[test]
    fn test_every_algorithm_sorts_seed() {
        let seed = from_colors(&[
            Color::Blue,
            Color::Orange,
            Color::Green,
            Color::Orange,
            Color::Red,
            Color::Purple,
            Color::Yellow,
        ]);
        for algorithm in AlgorithmId::ALL {
            let state = initialize(algorithm, &seed).unwrap();
            let (done, _) = run_to_completion(&state);
            assert!(invariant::is_sorted_by_key(&done), "{} did not sort", algorithm);
            assert_eq!(values(done.dataset()), vec![0, 1, 1, 2, 3, 4, 5], "{}", algorithm);
        }
    }

    #[test]
    fn test_counting_rejects_colors_that_disagree_with_values() {
        let seed = from_values(&[9, 4, 7, 4, 0, 12, 3]);
        let err = initialize(AlgorithmId::Counting, &seed).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeed { .. }));
        for algorithm in AlgorithmId::ALL {
            if algorithm == AlgorithmId::Counting {
                continue;
            }
            let (done, _) = run_to_completion(&initialize(algorithm, &seed).unwrap());
            assert_eq!(values(done.dataset()), vec![0, 3, 4, 4, 7, 9, 12]);
        }
    }

    #[test]
    fn test_replay_matches_manual_stepping() {
        let seed = from_values(&[5, 1, 4]);
        let states = replay(AlgorithmId::Quick, &seed, 4).unwrap();
        assert_eq!(states.len(), 5);
        let mut current = reset(AlgorithmId::Quick, &seed).unwrap();
        for expected in &states[1..] {
            current = step(&current).0;
            assert_eq!(&current, expected);
        }
    }
}
