//! Selection sort, one minimum selection per step

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub dataset: Vec<Element>,
    pub complete: bool,
    /// `[0, sorted_boundary)` is final
    pub sorted_boundary: usize,
    /// Where the most recent minimum was found
    pub current_min_index: Option<usize>,
}

impl SelectionState {
    pub fn new(seed: Vec<Element>) -> Self {
        Self {
            complete: seed.is_empty(),
            dataset: seed,
            sorted_boundary: 0,
            current_min_index: None,
        }
    }
}

impl SortMachine for SelectionState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Selection
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        let boundary = self.sorted_boundary;
        let mut min_index = boundary;
        for i in boundary + 1..self.dataset.len() {
            // strict: leftmost minimum wins
            if self.dataset[i].value < self.dataset[min_index].value {
                min_index = i;
            }
        }
        self.dataset.swap(boundary, min_index);
        self.current_min_index = Some(min_index);
        self.sorted_boundary += 1;
        self.complete = self.sorted_boundary == self.dataset.len();

        StepEvent::MinimumSelected {
            boundary,
            min_index,
        }
    }
}
