//! Sortstep - resumable, step-driven sorting algorithms for interactive lessons
//!
//! Core modules:
//! - `engine`: Deterministic per-algorithm state machines and the step controller
//! - `session`: One learner's run (step counting, undo, completion reporting)
//! - `progress`: Completion reports and their JSON-backed record
//! - `seed`: Reproducible seed datasets
//! - `settings`: Driver configuration

pub mod engine;
pub mod error;
pub mod progress;
pub mod seed;
pub mod session;
pub mod settings;

pub use engine::{AlgorithmId, Color, Element, ExecutionState, StepEvent};
pub use error::{EngineError, InvariantViolation, Result};
pub use progress::{LogReporter, ProgressLog, ProgressReport, ProgressReporter};
pub use session::Session;
pub use settings::{PlaybackSpeed, Settings};
