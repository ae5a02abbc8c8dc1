//! Step-driven sorting engine
//!
//! Every algorithm is an explicit state machine. This module must stay pure
//! and deterministic:
//! - One `step` call performs one unit of work and returns a fresh state
//! - No timers, threads or rendering
//! - Replaying the same steps from the same seed yields identical states

pub mod bubble;
pub mod controller;
pub mod counting;
pub mod element;
pub mod event;
pub mod heap;
pub mod insertion;
pub mod invariant;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod selection;
pub mod state;

pub use controller::{
    initialize, is_complete, replay, reset, run_to_completion, step, validate_seed,
};
pub use element::{Color, Element};
pub use event::{Side, StepEvent};
pub use state::{AlgorithmId, ExecutionState, SortMachine};

pub use bubble::BubbleState;
pub use counting::{CountingPhase, CountingState};
pub use heap::HeapState;
pub use insertion::InsertionState;
pub use merge::MergeState;
pub use quick::{Partition, QuickState};
pub use radix::{RadixPhase, RadixState};
pub use selection::SelectionState;
