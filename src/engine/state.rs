//! Execution state shared by every algorithm
//!
//! One variant per algorithm family. Each variant owns its own copy of the
//! dataset, so two states never share mutable storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bubble::BubbleState;
use super::counting::CountingState;
use super::element::Element;
use super::event::StepEvent;
use super::heap::HeapState;
use super::insertion::InsertionState;
use super::merge::MergeState;
use super::quick::QuickState;
use super::radix::RadixState;
use super::selection::SelectionState;
use crate::error::EngineError;

/// The algorithms a session can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Counting,
    Radix,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 8] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
        AlgorithmId::Counting,
        AlgorithmId::Radix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
            AlgorithmId::Counting => "counting",
            AlgorithmId::Radix => "radix",
        }
    }

    /// Whether equal keys keep their seed order through this algorithm
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            AlgorithmId::Bubble
                | AlgorithmId::Insertion
                | AlgorithmId::Merge
                | AlgorithmId::Counting
                | AlgorithmId::Radix
        )
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bubble" => Ok(AlgorithmId::Bubble),
            "selection" => Ok(AlgorithmId::Selection),
            "insertion" => Ok(AlgorithmId::Insertion),
            "merge" => Ok(AlgorithmId::Merge),
            "quick" | "quicksort" => Ok(AlgorithmId::Quick),
            "heap" | "heapsort" => Ok(AlgorithmId::Heap),
            "counting" => Ok(AlgorithmId::Counting),
            "radix" => Ok(AlgorithmId::Radix),
            _ => Err(EngineError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Behaviour every per-algorithm state machine provides
pub trait SortMachine {
    fn algorithm(&self) -> AlgorithmId;

    /// Current visible arrangement (always a permutation of the seed)
    fn dataset(&self) -> &[Element];

    fn is_complete(&self) -> bool;

    /// Perform exactly one unit of work. Only called while incomplete.
    fn advance(&mut self) -> StepEvent;
}

/// Complete state of one running algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum ExecutionState {
    Bubble(BubbleState),
    Selection(SelectionState),
    Insertion(InsertionState),
    Merge(MergeState),
    Quick(QuickState),
    Heap(HeapState),
    Counting(CountingState),
    Radix(RadixState),
}

impl ExecutionState {
    pub fn machine(&self) -> &dyn SortMachine {
        match self {
            ExecutionState::Bubble(s) => s,
            ExecutionState::Selection(s) => s,
            ExecutionState::Insertion(s) => s,
            ExecutionState::Merge(s) => s,
            ExecutionState::Quick(s) => s,
            ExecutionState::Heap(s) => s,
            ExecutionState::Counting(s) => s,
            ExecutionState::Radix(s) => s,
        }
    }

    pub(crate) fn machine_mut(&mut self) -> &mut dyn SortMachine {
        match self {
            ExecutionState::Bubble(s) => s,
            ExecutionState::Selection(s) => s,
            ExecutionState::Insertion(s) => s,
            ExecutionState::Merge(s) => s,
            ExecutionState::Quick(s) => s,
            ExecutionState::Heap(s) => s,
            ExecutionState::Counting(s) => s,
            ExecutionState::Radix(s) => s,
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.machine().algorithm()
    }

    pub fn dataset(&self) -> &[Element] {
        self.machine().dataset()
    }

    pub fn is_complete(&self) -> bool {
        self.machine().is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_id_round_trips_through_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
        assert_eq!("  Quick ".parse::<AlgorithmId>().unwrap(), AlgorithmId::Quick);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let err = "bogo".parse::<AlgorithmId>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownAlgorithm { ref name } if name == "bogo"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&AlgorithmId::Radix).unwrap();
        assert_eq!(json, "\"radix\"");
    }
}
