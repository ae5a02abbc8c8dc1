//! A single learner's run through one algorithm
//!
//! The session owns the active [`ExecutionState`], counts steps, keeps a
//! bounded undo history and tells the reporter once the run completes.
//! Steps are strictly sequential; nothing here runs in the background.

use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::engine::{self, AlgorithmId, Element, ExecutionState, StepEvent};
use crate::error::Result;
use crate::progress::{ProgressReport, ProgressReporter};

/// Default number of snapshots kept for undo
pub const DEFAULT_MAX_HISTORY: usize = 256;

#[derive(Debug, Clone)]
pub struct Session {
    algorithm: AlgorithmId,
    seed: Vec<Element>,
    state: ExecutionState,
    /// Prior states, newest last
    history: VecDeque<ExecutionState>,
    max_history: usize,
    step_count: u64,
    started_at: Instant,
    /// Set once the completion report has gone out for this run
    reported: bool,
}

impl Session {
    pub fn new(algorithm: AlgorithmId, seed: &[Element]) -> Result<Self> {
        let state = engine::initialize(algorithm, seed)?;
        log::info!("Session started: {} over {} elements", algorithm, seed.len());
        Ok(Self {
            algorithm,
            seed: seed.to_vec(),
            state,
            history: VecDeque::new(),
            max_history: DEFAULT_MAX_HISTORY,
            step_count: 0,
            started_at: Instant::now(),
            reported: false,
        })
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self.trim_history();
        self
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn dataset(&self) -> &[Element] {
        self.state.dataset()
    }

    pub fn is_complete(&self) -> bool {
        engine::is_complete(&self.state)
    }

    /// Steps applied since the last reset (undo takes them back)
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Advance one step. On the step that completes the run, `reporter`
    /// receives the report; if it fails the error is logged and the state
    /// stays advanced.
    pub fn step(&mut self, reporter: &mut dyn ProgressReporter) -> StepEvent {
        let (next, event) = engine::step(&self.state);
        if event.is_noop() {
            return event;
        }

        let previous = std::mem::replace(&mut self.state, next);
        self.history.push_back(previous);
        self.trim_history();
        self.step_count += 1;

        if self.is_complete() && !self.reported {
            self.reported = true;
            let report = self.completion_report();
            if let Err(e) = reporter.report(&report) {
                log::warn!("Failed to report {} completion: {}", self.algorithm, e);
            }
        }
        event
    }

    /// Restore the state before the last step. Returns false if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.state = previous;
                self.step_count = self.step_count.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Start the same algorithm over from the seed
    pub fn reset(&mut self) -> Result<()> {
        self.state = engine::reset(self.algorithm, &self.seed)?;
        self.history.clear();
        self.step_count = 0;
        self.started_at = Instant::now();
        self.reported = false;
        log::debug!("Session reset: {}", self.algorithm);
        Ok(())
    }

    /// Drop the current run and start `algorithm` on the same seed
    pub fn switch_algorithm(&mut self, algorithm: AlgorithmId) -> Result<()> {
        // validate before discarding anything
        let state = engine::initialize(algorithm, &self.seed)?;
        self.algorithm = algorithm;
        self.state = state;
        self.history.clear();
        self.step_count = 0;
        self.started_at = Instant::now();
        self.reported = false;
        log::info!("Switched to {}", algorithm);
        Ok(())
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    fn completion_report(&self) -> ProgressReport {
        let completed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        ProgressReport {
            algorithm: self.algorithm,
            completed_at,
            step_count: self.step_count,
            elapsed_ms: self.elapsed().as_millis() as u64,
        }
    }
}
