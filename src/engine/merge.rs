//! Stable two-way merge of pre-sorted runs, one element per step

use serde::{Deserialize, Serialize};

use super::element::{Element, is_sorted};
use super::event::{Side, StepEvent};
use super::state::{AlgorithmId, SortMachine};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeState {
    /// `merged ++ left[left_pointer..] ++ right[right_pointer..]`
    pub dataset: Vec<Element>,
    pub complete: bool,
    pub left: Vec<Element>,
    pub right: Vec<Element>,
    pub left_pointer: usize,
    pub right_pointer: usize,
    pub merged: Vec<Element>,
}

impl MergeState {
    /// Split the seed in half and stably pre-sort each half into a run
    pub fn new(seed: Vec<Element>) -> Self {
        let mut left = seed;
        let mut right = left.split_off(left.len() / 2);
        left.sort_by_key(|e| e.value);
        right.sort_by_key(|e| e.value);
        Self::build(left, right)
    }

    /// Merge two caller-supplied runs; each must already be sorted
    pub fn from_sorted_runs(left: Vec<Element>, right: Vec<Element>) -> Result<Self> {
        if left.is_empty() && right.is_empty() {
            return Err(EngineError::invalid_seed("both merge runs are empty"));
        }
        if !is_sorted(&left) || !is_sorted(&right) {
            return Err(EngineError::invalid_seed("merge runs must be sorted"));
        }
        Ok(Self::build(left, right))
    }

    fn build(left: Vec<Element>, right: Vec<Element>) -> Self {
        let mut state = Self {
            dataset: Vec::with_capacity(left.len() + right.len()),
            complete: left.is_empty() && right.is_empty(),
            merged: Vec::with_capacity(left.len() + right.len()),
            left,
            right,
            left_pointer: 0,
            right_pointer: 0,
        };
        state.refresh_dataset();
        state
    }

    fn refresh_dataset(&mut self) {
        self.dataset.clear();
        self.dataset.extend_from_slice(&self.merged);
        self.dataset.extend_from_slice(&self.left[self.left_pointer..]);
        self.dataset.extend_from_slice(&self.right[self.right_pointer..]);
    }

    /// Next input to draw from; ties favour the left run
    fn next_side(&self) -> Side {
        match (
            self.left.get(self.left_pointer),
            self.right.get(self.right_pointer),
        ) {
            (Some(l), Some(r)) if l.value <= r.value => Side::Left,
            (Some(_), Some(_)) => Side::Right,
            (Some(_), None) => Side::Left,
            (None, _) => Side::Right,
        }
    }
}

impl SortMachine for MergeState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Merge
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        let side = self.next_side();
        let element = match side {
            Side::Left => {
                self.left_pointer += 1;
                self.left[self.left_pointer - 1]
            }
            Side::Right => {
                self.right_pointer += 1;
                self.right[self.right_pointer - 1]
            }
        };
        self.merged.push(element);
        self.complete =
            self.left_pointer == self.left.len() && self.right_pointer == self.right.len();
        self.refresh_dataset();

        StepEvent::Merged {
            id: element.id,
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::{ids, values};
    use crate::seed::from_values;

    #[test]
    fn test_new_splits_and_presorts_halves() {
        let state = MergeState::new(from_values(&[5, 1, 4, 2, 3]));
        assert_eq!(values(&state.left), vec![1, 5]);
        assert_eq!(values(&state.right), vec![2, 3, 4]);
    }

    #[test]
    fn test_ties_take_left_first() {
        let left = vec![Element::new(0, 1), Element::new(1, 3)];
        let right = vec![Element::new(2, 1), Element::new(3, 2)];
        let mut state = MergeState::from_sorted_runs(left, right).unwrap();
        let first = state.advance();
        assert_eq!(
            first,
            StepEvent::Merged {
                id: 0,
                side: Side::Left
            }
        );
        while !state.complete {
            state.advance();
        }
        assert_eq!(ids(&state.merged), vec![0, 2, 3, 1]);
        assert_eq!(state.dataset, state.merged);
    }

    #[test]
    fn test_drains_remaining_run_one_at_a_time() {
        let left = vec![Element::new(0, 1)];
        let right = vec![Element::new(1, 5), Element::new(2, 6)];
        let mut state = MergeState::from_sorted_runs(left, right).unwrap();
        state.advance();
        assert_eq!(state.left_pointer, 1);
        assert!(!state.complete);
        state.advance();
        assert!(!state.complete);
        state.advance();
        assert!(state.complete);
    }

    #[test]
    fn test_unsorted_runs_are_rejected() {
        let left = vec![Element::new(0, 4), Element::new(1, 2)];
        let err = MergeState::from_sorted_runs(left, Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeed { .. }));
    }
}
