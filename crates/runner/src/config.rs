//! Runner configuration
//!
//! All knobs recognized by a replay session, loadable from a JSON file
//! with per-field defaults so partial configs work.

use std::path::{Path, PathBuf};

use argus_core::TimestampMs;
use argus_detector::DetectorConfig;
use argus_predictor::SessionGap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pattern tracker settings (window, qualification, cadence)
    pub detector: DetectorConfig,
    /// Forecast horizon in minutes
    pub horizon_minutes: u32,
    /// Replay speed multiplier, valid range 1.0-100.0
    pub speed_multiplier: f64,
    /// Session-specific non-trading interval to compensate for,
    /// e.g. a fixed midday break (epoch ms)
    pub gap: Option<SessionGap>,
    /// Events at/after this time are dropped at the feed (epoch ms)
    pub session_cutoff: Option<TimestampMs>,
    /// Event log to replay; stdin when absent
    pub input: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            horizon_minutes: 15, // predict 15 minutes ahead
            speed_multiplier: 1.0,
            gap: None,
            session_cutoff: None,
            input: None,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
