//! Driver settings and preferences
//!
//! Persisted as a JSON file. Playback speed only affects how long the
//! driver waits between steps, never what a step does.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::AlgorithmId;
use crate::error::Result;
use crate::seed::DatasetConfig;
use crate::session::DEFAULT_MAX_HISTORY;

/// Autoplay speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Instant,
}

impl PlaybackSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackSpeed::Slow => "Slow",
            PlaybackSpeed::Normal => "Normal",
            PlaybackSpeed::Fast => "Fast",
            PlaybackSpeed::Instant => "Instant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(PlaybackSpeed::Slow),
            "normal" | "med" => Some(PlaybackSpeed::Normal),
            "fast" => Some(PlaybackSpeed::Fast),
            "instant" | "none" => Some(PlaybackSpeed::Instant),
            _ => None,
        }
    }

    /// Pause between autoplayed steps
    pub fn step_delay(&self) -> Duration {
        match self {
            PlaybackSpeed::Slow => Duration::from_millis(800),
            PlaybackSpeed::Normal => Duration::from_millis(300),
            PlaybackSpeed::Fast => Duration::from_millis(60),
            PlaybackSpeed::Instant => Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Algorithm to run when none is given on the command line
    pub algorithm: AlgorithmId,

    // === Dataset ===
    pub dataset_len: usize,
    pub max_value: u32,
    pub rng_seed: u64,

    // === Playback ===
    pub speed: PlaybackSpeed,
    /// Snapshots kept for undo
    pub max_history: usize,

    // === Progress ===
    /// Where completed runs are recorded (nothing is kept when unset)
    pub progress_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::Bubble,

            dataset_len: 8,
            max_value: 99,
            rng_seed: 12345,

            speed: PlaybackSpeed::Normal,
            max_history: DEFAULT_MAX_HISTORY,

            progress_path: None,
        }
    }
}

impl Settings {
    pub fn dataset(&self) -> DatasetConfig {
        DatasetConfig {
            rng_seed: self.rng_seed,
            len: self.dataset_len,
            max_value: self.max_value,
        }
    }

    /// Load from a JSON file, falling back to defaults if it is missing or
    /// unreadable
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
