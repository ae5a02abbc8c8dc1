//! LSD radix sort over decimal digits, one element moved per step

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};

pub const BUCKET_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadixPhase {
    Distribute,
    Collect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadixState {
    /// `working ++ buckets[0] ++ .. ++ buckets[9]`
    pub dataset: Vec<Element>,
    pub complete: bool,
    /// 1, 10, 100, ...
    pub digit_place: u64,
    /// Highest place any value has a digit at
    pub max_digit_place: u64,
    pub phase: RadixPhase,
    pub working: VecDeque<Element>,
    pub buckets: Vec<VecDeque<Element>>,
    /// Bucket being drained during collect
    pub bucket_cursor: usize,
    /// Elements distributed so far in this pass
    pub item_cursor: usize,
}

/// Largest power of ten not above `max_value` (1 for zero)
pub fn max_digit_place(max_value: u32) -> u64 {
    let mut place = 1u64;
    while place * 10 <= u64::from(max_value) {
        place *= 10;
    }
    place
}

/// Decimal digit of `value` at `place`
pub fn digit_at(value: u32, place: u64) -> u8 {
    ((u64::from(value) / place) % 10) as u8
}

impl RadixState {
    pub fn new(seed: Vec<Element>) -> Self {
        let max_value = seed.iter().map(|e| e.value).max().unwrap_or(0);
        let mut state = Self {
            dataset: Vec::with_capacity(seed.len()),
            complete: seed.is_empty(),
            digit_place: 1,
            max_digit_place: max_digit_place(max_value),
            phase: RadixPhase::Distribute,
            working: seed.into(),
            buckets: vec![VecDeque::new(); BUCKET_COUNT],
            bucket_cursor: 0,
            item_cursor: 0,
        };
        state.refresh_dataset();
        state
    }

    fn refresh_dataset(&mut self) {
        self.dataset.clear();
        self.dataset.extend(self.working.iter().copied());
        for bucket in &self.buckets {
            self.dataset.extend(bucket.iter().copied());
        }
    }

    /// First non-empty bucket at or after `from`
    fn first_filled_bucket(&self, from: usize) -> usize {
        (from..BUCKET_COUNT)
            .find(|&b| !self.buckets[b].is_empty())
            .unwrap_or(BUCKET_COUNT)
    }

    fn distribute_one(&mut self) -> StepEvent {
        let element = self
            .working
            .pop_front()
            .expect("radix distribute phase has a working element");
        let digit = digit_at(element.value, self.digit_place);
        self.buckets[usize::from(digit)].push_back(element);
        self.item_cursor += 1;

        if self.working.is_empty() {
            self.phase = RadixPhase::Collect;
            self.bucket_cursor = self.first_filled_bucket(0);
        }
        StepEvent::Distributed {
            id: element.id,
            digit,
        }
    }

    fn collect_one(&mut self) -> StepEvent {
        let bucket = self.first_filled_bucket(self.bucket_cursor);
        let element = self
            .buckets
            .get_mut(bucket)
            .and_then(VecDeque::pop_front)
            .expect("radix collect phase has a filled bucket");
        self.working.push_back(element);
        // exhaustion is judged on what is left after the removal
        self.bucket_cursor = self.first_filled_bucket(bucket);

        if self.bucket_cursor == BUCKET_COUNT {
            self.finish_pass();
        }
        StepEvent::Collected {
            id: element.id,
            bucket: bucket as u8,
        }
    }

    fn finish_pass(&mut self) {
        log::debug!("radix: pass at place {} collected", self.digit_place);
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.bucket_cursor = 0;
        self.item_cursor = 0;
        self.digit_place *= 10;
        if self.digit_place > self.max_digit_place {
            self.complete = true;
        } else {
            self.phase = RadixPhase::Distribute;
        }
    }
}

impl SortMachine for RadixState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Radix
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        let event = match self.phase {
            RadixPhase::Distribute => self.distribute_one(),
            RadixPhase::Collect => self.collect_one(),
        };
        self.refresh_dataset();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::{ids, values};
    use crate::seed::from_values;

    fn run_pass(state: &mut RadixState) {
        let place = state.digit_place;
        while !state.complete && state.digit_place == place {
            state.advance();
        }
    }

    #[test]
    fn test_max_digit_place() {
        assert_eq!(max_digit_place(0), 1);
        assert_eq!(max_digit_place(9), 1);
        assert_eq!(max_digit_place(10), 10);
        assert_eq!(max_digit_place(802), 100);
        assert_eq!(max_digit_place(u32::MAX), 1_000_000_000);
    }

    #[test]
    fn test_ones_pass_is_stable() {
        let mut state = RadixState::new(from_values(&[170, 45, 75, 90, 802, 24, 2, 66]));
        run_pass(&mut state);
        assert_eq!(state.digit_place, 10);
        assert_eq!(
            values(&state.dataset),
            vec![170, 90, 802, 2, 24, 45, 75, 66]
        );
        assert_eq!(ids(&state.dataset), vec![0, 3, 4, 6, 5, 1, 2, 7]);

        while !state.complete {
            state.advance();
        }
        assert_eq!(
            values(&state.dataset),
            vec![2, 24, 45, 66, 75, 90, 170, 802]
        );
        assert_eq!(state.digit_place, 1000);
    }

    #[test]
    fn test_collect_skips_empty_buckets() {
        let mut state = RadixState::new(from_values(&[3, 1]));
        state.advance();
        state.advance();
        assert_eq!(state.phase, RadixPhase::Collect);
        assert_eq!(state.bucket_cursor, 1);
        assert_eq!(
            state.advance(),
            StepEvent::Collected { id: 1, bucket: 1 }
        );
        assert_eq!(state.bucket_cursor, 3);
        state.advance();
        assert!(state.complete);
        assert_eq!(values(&state.dataset), vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "filled bucket")]
    fn test_collect_from_empty_buckets_panics() {
        let mut state = RadixState::new(from_values(&[3, 1]));
        state.phase = RadixPhase::Collect;
        state.advance();
    }
}
