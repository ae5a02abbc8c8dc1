//! Insertion sort as alternating pick-up / splice steps

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionState {
    /// `destination ++ pending ++ source_queue`
    pub dataset: Vec<Element>,
    pub complete: bool,
    /// Untouched seed elements still waiting
    pub source_queue: VecDeque<Element>,
    /// Always sorted
    pub destination: Vec<Element>,
    /// Element picked up but not yet inserted
    pub pending: Option<Element>,
}

impl InsertionState {
    pub fn new(seed: Vec<Element>) -> Self {
        let mut state = Self {
            dataset: Vec::with_capacity(seed.len()),
            complete: seed.is_empty(),
            source_queue: seed.into(),
            destination: Vec::new(),
            pending: None,
        };
        state.refresh_dataset();
        state
    }

    fn refresh_dataset(&mut self) {
        self.dataset.clear();
        self.dataset.extend(self.destination.iter().copied());
        self.dataset.extend(self.pending);
        self.dataset.extend(self.source_queue.iter().copied());
    }

    /// Position just past the last destination element `<=` value, scanning
    /// from the back so equal keys keep their arrival order.
    fn insertion_point(&self, value: u32) -> usize {
        let mut position = self.destination.len();
        while position > 0 && self.destination[position - 1].value > value {
            position -= 1;
        }
        position
    }
}

impl SortMachine for InsertionState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Insertion
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        let event = match self.pending.take() {
            None => {
                let element = self
                    .source_queue
                    .pop_front()
                    .expect("incomplete insertion state has a queued element");
                self.pending = Some(element);
                StepEvent::Dequeued { id: element.id }
            }
            Some(element) => {
                let position = self.insertion_point(element.value);
                self.destination.insert(position, element);
                self.complete = self.source_queue.is_empty();
                StepEvent::Inserted {
                    id: element.id,
                    position,
                }
            }
        };
        self.refresh_dataset();
        event
    }
}
