//! Completion reporting
//!
//! The engine only emits a [`ProgressReport`] when a run finishes; keeping
//! it anywhere is the reporter's job. Reporter failures never touch the
//! engine state.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::AlgorithmId;
use crate::error::Result;

/// Emitted once per completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub algorithm: AlgorithmId,
    /// Unix timestamp (ms) of completion
    pub completed_at: u64,
    pub step_count: u64,
    /// Wall time from session start to completion
    pub elapsed_ms: u64,
}

/// Receives completion reports
pub trait ProgressReporter {
    fn report(&mut self, report: &ProgressReport) -> Result<()>;
}

/// Writes reports to the log and keeps nothing
#[derive(Debug, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&mut self, report: &ProgressReport) -> Result<()> {
        log::info!(
            "{} completed in {} steps ({} ms)",
            report.algorithm,
            report.step_count,
            report.elapsed_ms
        );
        Ok(())
    }
}

/// Per-algorithm record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmRecord {
    /// Fewest steps any completed run took
    pub best_steps: u64,
    pub completions: u32,
    pub last: ProgressReport,
}

/// Completion history keyed by algorithm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressLog {
    pub records: BTreeMap<AlgorithmId, AlgorithmRecord>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Fold a report in. Returns true if it set a new best step count.
    pub fn record(&mut self, report: &ProgressReport) -> bool {
        match self.records.get_mut(&report.algorithm) {
            Some(record) => {
                record.completions += 1;
                record.last = report.clone();
                if report.step_count < record.best_steps {
                    record.best_steps = report.step_count;
                    return true;
                }
                false
            }
            None => {
                self.records.insert(
                    report.algorithm,
                    AlgorithmRecord {
                        best_steps: report.step_count,
                        completions: 1,
                        last: report.clone(),
                    },
                );
                true
            }
        }
    }

    pub fn is_completed(&self, algorithm: AlgorithmId) -> bool {
        self.records.contains_key(&algorithm)
    }

    /// Algorithms with at least one completed run, in declaration order
    pub fn completed(&self) -> Vec<AlgorithmId> {
        self.records.keys().copied().collect()
    }

    pub fn best_steps(&self, algorithm: AlgorithmId) -> Option<u64> {
        self.records.get(&algorithm).map(|r| r.best_steps)
    }

    /// Load from a JSON file; a missing file is an empty log
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No progress log at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let progress: ProgressLog = serde_json::from_str(&json)?;
        log::info!("Loaded progress for {} algorithms", progress.records.len());
        Ok(progress)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Progress saved ({} algorithms)", self.records.len());
        Ok(())
    }
}

impl ProgressReporter for ProgressLog {
    fn report(&mut self, report: &ProgressReport) -> Result<()> {
        if self.record(report) {
            log::info!("New best for {}: {} steps", report.algorithm, report.step_count);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(algorithm: AlgorithmId, step_count: u64) -> ProgressReport {
        ProgressReport {
            algorithm,
            completed_at: 1_700_000_000_000,
            step_count,
            elapsed_ms: 1200,
        }
    }

    #[test]
    fn test_record_tracks_best_and_count() {
        let mut progress = ProgressLog::new();
        assert!(progress.record(&report(AlgorithmId::Heap, 40)));
        assert!(!progress.record(&report(AlgorithmId::Heap, 55)));
        assert!(progress.record(&report(AlgorithmId::Heap, 31)));

        let record = &progress.records[&AlgorithmId::Heap];
        assert_eq!(record.best_steps, 31);
        assert_eq!(record.completions, 3);
        assert_eq!(record.last.step_count, 31);
        assert!(progress.is_completed(AlgorithmId::Heap));
        assert!(!progress.is_completed(AlgorithmId::Radix));
    }

    #[test]
    fn test_completed_lists_in_declaration_order() {
        let mut progress = ProgressLog::new();
        progress.record(&report(AlgorithmId::Radix, 10));
        progress.record(&report(AlgorithmId::Bubble, 10));
        assert_eq!(
            progress.completed(),
            vec![AlgorithmId::Bubble, AlgorithmId::Radix]
        );
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "sortstep-progress-{}.json",
            std::process::id()
        ));
        let mut progress = ProgressLog::new();
        progress.record(&report(AlgorithmId::Quick, 22));
        progress.save(&path).unwrap();

        let loaded = ProgressLog::load(&path).unwrap();
        assert_eq!(loaded, progress);
        assert_eq!(loaded.best_steps(AlgorithmId::Quick), Some(22));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let path = std::env::temp_dir().join("sortstep-progress-does-not-exist.json");
        let loaded = ProgressLog::load(&path).unwrap();
        assert!(loaded.records.is_empty());
    }
}
