//! Counting sort over the fixed [`Color`] domain
//!
//! Two phases. Counting tallies one element per step, visiting colors in
//! placement order. Placing then moves one element per step into the output,
//! color by color, preserving seed order inside each color.
//!
//! The color is only a valid key when it orders elements the way their values
//! do: each color holds a single value, and later colors hold strictly larger
//! ones, so equal values share a color and keep their seed order.
//! Seeds built with [`Element::colored`] always qualify.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::element::{Color, Element};
use super::event::StepEvent;
use super::state::{AlgorithmId, SortMachine};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountingPhase {
    Counting,
    Placing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingState {
    /// `output ++ unplaced elements in seed order`
    pub dataset: Vec<Element>,
    pub complete: bool,
    pub phase: CountingPhase,
    pub color_counts: BTreeMap<Color, usize>,
    pub color_order: Vec<Color>,
    /// Index into `color_order` of the color being counted or placed
    pub cursor: usize,
    pub output: Vec<Element>,
    /// Seed elements in their original order
    pub source: Vec<Element>,
    /// Color of each source element
    pub keys: Vec<Color>,
    /// Per source element: already counted
    pub counted: Vec<bool>,
    /// Per source element: already moved to the output
    pub placed: Vec<bool>,
}

impl CountingState {
    /// Every seed element must carry a color tag that agrees with its value
    pub fn new(seed: Vec<Element>) -> Result<Self> {
        let keys = seed
            .iter()
            .map(|e| {
                e.tag.ok_or_else(|| {
                    EngineError::invalid_seed(format!(
                        "counting sort needs a color on every element, #{} has none",
                        e.id
                    ))
                })
            })
            .collect::<Result<Vec<Color>>>()?;
        check_keys_follow_values(&seed, &keys)?;
        let len = seed.len();
        Ok(Self {
            dataset: seed.clone(),
            complete: len == 0,
            phase: CountingPhase::Counting,
            color_counts: Color::ALL.iter().map(|&c| (c, 0)).collect(),
            color_order: Color::ALL.to_vec(),
            cursor: 0,
            output: Vec::with_capacity(len),
            source: seed,
            keys,
            counted: vec![false; len],
            placed: vec![false; len],
        })
    }

    /// Number of elements tallied so far
    pub fn counted_total(&self) -> usize {
        self.color_counts.values().sum()
    }

    /// First source index of the cursor color (or a later one) not yet marked
    /// in `marks`, together with the color cursor it was found under.
    fn next_unmarked(&self, marks: &[bool]) -> (usize, Option<usize>) {
        let mut cursor = self.cursor;
        while cursor < self.color_order.len() {
            let color = self.color_order[cursor];
            let found = (0..self.keys.len()).find(|&i| !marks[i] && self.keys[i] == color);
            if found.is_some() {
                return (cursor, found);
            }
            cursor += 1;
        }
        (cursor, None)
    }

    fn refresh_dataset(&mut self) {
        self.dataset.clear();
        self.dataset.extend_from_slice(&self.output);
        self.dataset.extend(
            self.source
                .iter()
                .zip(&self.placed)
                .filter(|(_, placed)| !**placed)
                .map(|(e, _)| *e),
        );
    }

    fn count_one(&mut self) -> StepEvent {
        let (cursor, next) = self.next_unmarked(&self.counted);
        self.cursor = cursor;
        let index = next.expect("counting phase has an uncounted element");
        let element = self.source[index];
        let color = self.keys[index];
        self.counted[index] = true;
        *self.color_counts.entry(color).or_insert(0) += 1;

        if self.counted_total() == self.source.len() {
            log::debug!("counting: tallied {:?}", self.color_counts);
            self.phase = CountingPhase::Placing;
            self.cursor = 0;
        }
        StepEvent::Counted {
            id: element.id,
            color,
        }
    }

    fn place_one(&mut self) -> StepEvent {
        let (cursor, next) = self.next_unmarked(&self.placed);
        self.cursor = cursor;
        let index = next.expect("placing phase has an unplaced element");
        let element = self.source[index];
        self.placed[index] = true;
        self.output.push(element);
        self.complete = self.output.len() == self.source.len();
        self.refresh_dataset();
        StepEvent::Placed {
            id: element.id,
            color: self.keys[index],
        }
    }
}

/// Placing by color must also leave values ascending
fn check_keys_follow_values(seed: &[Element], keys: &[Color]) -> Result<()> {
    let mut value_of: BTreeMap<Color, u32> = BTreeMap::new();
    for (element, &color) in seed.iter().zip(keys) {
        let value = *value_of.entry(color).or_insert(element.value);
        if value != element.value {
            return Err(EngineError::invalid_seed(format!(
                "counting sort needs one value per color, {} holds {} and {}",
                color.as_str(),
                value,
                element.value
            )));
        }
    }
    // map iterates in placement order
    let ordered: Vec<(Color, u32)> = value_of.into_iter().collect();
    if let Some(pair) = ordered.windows(2).find(|pair| pair[0].1 >= pair[1].1) {
        let ((first, low), (second, high)) = (pair[0], pair[1]);
        return Err(EngineError::invalid_seed(format!(
            "{} is placed before {} but holds {} against {}",
            first.as_str(),
            second.as_str(),
            low,
            high
        )));
    }
    Ok(())
}

impl SortMachine for CountingState {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Counting
    }

    fn dataset(&self) -> &[Element] {
        &self.dataset
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) -> StepEvent {
        match self.phase {
            CountingPhase::Counting => self.count_one(),
            CountingPhase::Placing => self.place_one(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::element::{ids, values};
    use crate::seed::from_values;

    fn seed() -> Vec<Element> {
        vec![
            Element::colored(0, Color::Blue),
            Element::colored(1, Color::Red),
            Element::colored(2, Color::Blue),
            Element::colored(3, Color::Green),
            Element::colored(4, Color::Red),
        ]
    }

    #[test]
    fn test_counting_visits_colors_in_order() {
        let mut state = CountingState::new(seed()).unwrap();
        let visited: Vec<u32> = (0..5)
            .map(|_| match state.advance() {
                StepEvent::Counted { id, .. } => id,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(visited, vec![1, 4, 3, 0, 2]);
        assert_eq!(state.phase, CountingPhase::Placing);
        assert_eq!(state.color_counts[&Color::Red], 2);
        assert_eq!(state.color_counts[&Color::Blue], 2);
        assert_eq!(state.color_counts[&Color::Purple], 0);
    }

    #[test]
    fn test_placing_is_stable_and_grouped() {
        let mut state = CountingState::new(seed()).unwrap();
        while !state.complete {
            state.advance();
        }
        assert_eq!(ids(&state.output), vec![1, 4, 3, 0, 2]);
        assert_eq!(state.dataset, state.output);
    }

    #[test]
    fn test_dataset_shows_unplaced_tail() {
        let mut state = CountingState::new(seed()).unwrap();
        for _ in 0..6 {
            state.advance();
        }
        assert_eq!(ids(&state.output), vec![1]);
        assert_eq!(ids(&state.dataset), vec![1, 0, 2, 3, 4]);
    }

    #[test]
    fn test_untagged_element_is_rejected() {
        let err = CountingState::new(vec![Element::new(0, 3)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeed { .. }));
    }

    #[test]
    fn test_color_shared_by_two_values_is_rejected() {
        // 4 and 3 land in the same value band
        let err = CountingState::new(from_values(&[9, 4, 7, 4, 0, 12, 3])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeed { .. }));
    }

    #[test]
    fn test_colors_out_of_value_order_are_rejected() {
        let seed = vec![
            Element::new(0, 10).with_tag(Color::Red),
            Element::new(1, 5).with_tag(Color::Blue),
        ];
        let err = CountingState::new(seed).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeed { .. }));
    }

    #[test]
    fn test_consistent_tags_sort_by_value() {
        let seed = vec![
            Element::new(0, 70).with_tag(Color::Blue),
            Element::new(1, 10).with_tag(Color::Red),
            Element::new(2, 70).with_tag(Color::Blue),
            Element::new(3, 40).with_tag(Color::Yellow),
        ];
        let mut state = CountingState::new(seed).unwrap();
        while !state.complete {
            state.advance();
        }
        assert_eq!(values(&state.dataset), vec![10, 40, 70, 70]);
        assert_eq!(ids(&state.dataset), vec![1, 3, 0, 2]);
    }

    #[test]
    #[should_panic(expected = "unplaced element")]
    fn test_placing_past_the_end_panics() {
        let mut state = CountingState::new(seed()).unwrap();
        while !state.complete {
            state.advance();
        }
        state.advance();
    }
}
