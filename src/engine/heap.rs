//! Heapsort as build-then-extract with an explicit sift cursor

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapState {
    /// `dataset[..heap_size]` is the heap, the rest is the sorted tail
    pub dataset: Vec<Element>,
    pub complete: bool,
    pub heap_size: usize,
    pub build_phase_complete: bool,
    /// Subtree root the build phase is currently heapifying
    pub heapify_root: usize,
    /// Node the current sift-down is at, if one is running
    pub sift_cursor: Option<usize>,
    /// Extracted elements, smallest first; mirrors `dataset[heap_size..]`
    pub extracted: Vec<Element>,
}

/// Children of `node` inside a heap of `size` elements
pub fn children(node: usize, size: usize) -> impl Iterator<Item = usize> {
    [2 * node + 1, 2 * node + 2].into_iter().filter(move |&c| c < size)
}

impl HeapState {
    pub fn new(seed: Vec<Element>) -> Self {
        let heap_size = seed.len();
        let mut state = Self {
            dataset: seed,
            complete: false,
            heap_size,
            build_phase_complete: false,
            heapify_root: 0,
            sift_cursor: None,
            extracted: Vec::new(),
        };
        if heap_size < 2 {
            state.build_phase_complete = true;
            state.complete = true;
        } else {
            state.heapify_root = heap_size / 2 - 1;
            state.sift_cursor = Some(state.heapify_root);
        }
        state
    }

    /// One comparison at `node`; returns the child swapped with, if any
    fn sift_once(&mut self, node: usize) -> Option<usize> {
        let mut largest = node;
        for child in children(node, self.heap_size) {
            if self.dataset[child].value > self.dataset[largest].value {
                largest = child;
            }
        }
        if largest == node {
            self.sift_cursor = None;
            return None;
        }
        self.dataset.swap(node, largest);
        self.sift_cursor = Some(largest);
        Some(largest)
    }

    /// Move to the next build root once the current sift has settled
    fn next_build_root(&mut self) {
        if self.sift_cursor.is_some() {
            return;
        }
        if self.heapify_root == 0 {
            log::debug!("heap: max-heap built over {} elements", self.heap_size);
            self.build_phase_complete = true;
        } else {
            self.heapify_root -= 1;
            self.sift_cursor = Some(self.heapify_root);
        }
    }

    fn extract(&mut self) -> StepEvent {
        let last = self.heap_size - 1;
        self.dataset.swap(0, last);
        self.heap_size = last;
        let element = self.dataset[last];
        self.extracted.insert(0, element);
        if self.heap_size <= 1 {
            self.complete = true;
        } else {
            self.sift_cursor = Some(0);
        }
        StepEvent::Extracted {
            id: element.id,
            heap_size: self.heap_size,
        }
    }
}

impl SortMachine for HeapState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Heap
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        match self.sift_cursor {
            Some(node) => {
                let swapped_with = self.sift_once(node);
                if !self.build_phase_complete {
                    self.next_build_root();
                }
                StepEvent::Sifted { node, swapped_with }
            }
            None => self.extract(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::values;
    use crate::seed::from_values;

    fn is_max_heap(state: &HeapState) -> bool {
        (0..state.heap_size).all(|node| {
            children(node, state.heap_size)
                .all(|c| state.dataset[node].value >= state.dataset[c].value)
        })
    }

    #[test]
    fn test_build_phase_produces_max_heap() {
        let mut state = HeapState::new(from_values(&[3, 9, 2, 7, 5, 8]));
        assert_eq!(state.heapify_root, 2);
        while !state.build_phase_complete {
            state.advance();
        }
        assert!(is_max_heap(&state));
        assert_eq!(state.dataset[0].value, 9);
        assert_eq!(state.heap_size, 6);
    }

    #[test]
    fn test_extraction_grows_sorted_tail() {
        let mut state = HeapState::new(from_values(&[4, 1, 3, 2]));
        while !state.build_phase_complete {
            state.advance();
        }
        let event = state.advance();
        assert!(matches!(event, StepEvent::Extracted { heap_size: 3, .. }));
        assert_eq!(values(&state.extracted), vec![4]);
        while !state.complete {
            state.advance();
        }
        assert_eq!(values(&state.dataset), vec![1, 2, 3, 4]);
        assert_eq!(values(&state.extracted), vec![2, 3, 4]);
        assert_eq!(state.heap_size, 1);
    }

    #[test]
    fn test_two_elements() {
        let mut state = HeapState::new(from_values(&[1, 2]));
        while !state.complete {
            state.advance();
        }
        assert_eq!(values(&state.dataset), vec![1, 2]);
    }
}
