//! Aggregation settings
//!
//! Every field has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! due_soon_days = 7
//! study_window_days = 30
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Forward window, in days, for a task to count as due soon
    pub due_soon_days: u32,
    /// Sessions starting this many days before `now` feed study hours and streak
    pub study_window_days: u32,
    /// Maximum days the streak walks back
    pub streak_lookback_days: u32,
    pub upcoming_task_limit: usize,
    pub upcoming_reminder_limit: usize,
    /// How far ahead a reminder may be and still count as upcoming
    pub reminder_horizon_hours: u32,
    pub subject_limit: usize,
    pub recent_activity_limit: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            due_soon_days: 7,
            study_window_days: 30,
            streak_lookback_days: 30,
            upcoming_task_limit: 5,
            upcoming_reminder_limit: 3,
            reminder_horizon_hours: 168,
            subject_limit: 4,
            recent_activity_limit: 5,
        }
    }
}

impl AggregationConfig {
    /// Load settings from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    pub fn with_due_soon_days(mut self, days: u32) -> Self {
        self.due_soon_days = days;
        self
    }
}
