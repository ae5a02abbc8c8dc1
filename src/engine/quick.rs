//! Quicksort over an explicit range stack with Lomuto partitioning
//!
//! The pivot is always the last element of the active range, which keeps runs
//! reproducible. A step either starts a partition, scans one element, or
//! settles the pivot and pushes the sub-ranges.

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

/// Inclusive index range `start..=end`
pub type Range = (usize, usize);

/// Cursor of the partition in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub range: Range,
    pub pivot_index: usize,
    /// Next element to compare against the pivot
    pub scan_pointer: usize,
    /// Everything in `start..boundary_index` is below the pivot
    pub boundary_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickState {
    pub dataset: Vec<Element>,
    pub complete: bool,
    /// Pending ranges, each holding at least two elements
    pub range_stack: Vec<Range>,
    pub active: Option<Partition>,
    /// Ranges whose indices hold their final values
    pub sorted_ranges: Vec<Range>,
}

impl QuickState {
    pub fn new(seed: Vec<Element>) -> Self {
        let mut state = Self {
            dataset: seed,
            complete: false,
            range_stack: Vec::new(),
            active: None,
            sorted_ranges: Vec::new(),
        };
        let len = state.dataset.len();
        if len > 0 {
            state.schedule((0, len - 1));
        }
        state.complete = state.range_stack.is_empty() && state.covers_all();
        state
    }

    /// Push a range, or record it sorted straight away if it has one element
    fn schedule(&mut self, (start, end): Range) {
        if start < end {
            self.range_stack.push((start, end));
        } else if start == end {
            self.sorted_ranges.push((start, end));
        }
    }

    /// True once the sorted ranges cover every index
    pub fn covers_all(&self) -> bool {
        let mut covered = vec![false; self.dataset.len()];
        for &(start, end) in &self.sorted_ranges {
            for slot in covered.iter_mut().take(end + 1).skip(start) {
                *slot = true;
            }
        }
        covered.into_iter().all(|c| c)
    }

    fn update_complete(&mut self) {
        if self.active.is_none() && self.range_stack.is_empty() && self.covers_all() {
            log::debug!("quick: all {} indices settled", self.dataset.len());
            self.complete = true;
        }
    }

    fn start_partition(&mut self) -> StepEvent {
        let (start, end) = self
            .range_stack
            .pop()
            .expect("incomplete quick state has a range to partition");
        if start >= end {
            self.sorted_ranges.push((start, end));
            self.update_complete();
            return StepEvent::RangeSorted { start, end };
        }
        self.active = Some(Partition {
            range: (start, end),
            pivot_index: end,
            scan_pointer: start,
            boundary_index: start,
        });
        StepEvent::PartitionStarted {
            start,
            end,
            pivot: self.dataset[end].value,
        }
    }

    fn scan(&mut self, mut partition: Partition) -> StepEvent {
        let index = partition.scan_pointer;
        let pivot = self.dataset[partition.pivot_index].value;
        let moved_to = if self.dataset[index].value < pivot {
            let to = partition.boundary_index;
            self.dataset.swap(index, to);
            partition.boundary_index += 1;
            Some(to)
        } else {
            None
        };
        partition.scan_pointer += 1;
        self.active = Some(partition);
        StepEvent::Scanned {
            index,
            pivot,
            moved_to,
        }
    }

    fn place_pivot(&mut self, partition: Partition) -> StepEvent {
        let (start, end) = partition.range;
        let index = partition.boundary_index;
        self.dataset.swap(index, partition.pivot_index);
        self.sorted_ranges.push((index, index));
        self.active = None;

        // right first so the left side is partitioned next
        if index < end {
            self.schedule((index + 1, end));
        }
        if index > start {
            self.schedule((start, index - 1));
        }
        self.update_complete();
        StepEvent::PivotPlaced { index }
    }
}

impl SortMachine for QuickState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Quick
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        match self.active {
            None => self.start_partition(),
            Some(partition) if partition.scan_pointer < partition.pivot_index => {
                self.scan(partition)
            }
            Some(partition) => self.place_pivot(partition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::values;
    use crate::seed::from_values;

    #[test]
    fn test_first_partition_places_pivot() {
        let mut state = QuickState::new(from_values(&[6, 2, 8, 1, 9, 4]));
        assert_eq!(
            state.advance(),
            StepEvent::PartitionStarted {
                start: 0,
                end: 5,
                pivot: 4
            }
        );
        loop {
            if let StepEvent::PivotPlaced { index } = state.advance() {
                assert_eq!(index, 2);
                break;
            }
        }
        assert_eq!(state.dataset[2].value, 4);
        let mut left = values(&state.dataset[..2]);
        left.sort();
        assert_eq!(left, vec![1, 2]);
        let mut right = values(&state.dataset[3..]);
        right.sort();
        assert_eq!(right, vec![6, 8, 9]);
        assert!(state.sorted_ranges.contains(&(2, 2)));
        assert_eq!(state.range_stack, vec![(3, 5), (0, 1)]);
    }

    #[test]
    fn test_trivial_subranges_are_never_pushed() {
        let mut state = QuickState::new(from_values(&[3, 1, 2]));
        while !state.complete {
            state.advance();
            assert!(state.range_stack.iter().all(|&(s, e)| s < e));
        }
        assert_eq!(values(&state.dataset), vec![1, 2, 3]);
        assert!(state.covers_all());
    }

    #[test]
    fn test_single_element_starts_complete() {
        let state = QuickState::new(from_values(&[42]));
        assert!(state.complete);
        assert_eq!(state.sorted_ranges, vec![(0, 0)]);
    }

    #[test]
    #[should_panic(expected = "range to partition")]
    fn test_advancing_past_completion_panics() {
        let mut state = QuickState::new(from_values(&[2, 1]));
        while !state.complete {
            state.advance();
        }
        state.advance();
    }
}
