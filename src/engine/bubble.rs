//! Bubble sort, one adjacent comparison per step

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleState {
    pub dataset: Vec<Element>,
    pub complete: bool,
    /// Left index of the next pair to compare
    pub compare_index: usize,
    /// Finished passes; the last `passes_completed` slots are final
    pub passes_completed: usize,
    pub swaps_this_pass: usize,
}

impl BubbleState {
    pub fn new(seed: Vec<Element>) -> Self {
        let complete = seed.len() < 2;
        Self {
            dataset: seed,
            complete,
            compare_index: 0,
            passes_completed: 0,
            swaps_this_pass: 0,
        }
    }

    /// Exclusive end of the region still being bubbled
    pub fn unsorted_end(&self) -> usize {
        self.dataset.len() - self.passes_completed.min(self.dataset.len())
    }

    fn finish_pass(&mut self) {
        self.passes_completed += 1;
        if self.swaps_this_pass == 0 || self.unsorted_end() <= 1 {
            log::debug!(
                "bubble: finished after {} passes",
                self.passes_completed
            );
            self.complete = true;
            return;
        }
        self.compare_index = 0;
        self.swaps_this_pass = 0;
    }
}

impl SortMachine for BubbleState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Bubble
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        let left = self.compare_index;
        let right = left + 1;
        let swapped = self.dataset[left].value > self.dataset[right].value;
        if swapped {
            self.dataset.swap(left, right);
            self.swaps_this_pass += 1;
        }
        self.compare_index += 1;

        if self.compare_index + 1 >= self.unsorted_end() {
            self.finish_pass();
        }

        StepEvent::Compared {
            left,
            right,
            swapped,
        }
    }
}
