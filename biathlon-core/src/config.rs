//! Race configuration types
//!
//! `RaceConfigFile` mirrors the on-disk configuration; `validate` turns it into
//! the `RaceConfig` the processor works with. Reading the file itself is left
//! to the application layer.

use crate::timefmt::{format_duration, parse_clock_time, parse_start_delta};
use crate::types::{ClockTime, RaceError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Race configuration as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceConfigFile {
    /// Number of main laps
    pub laps: i64,
    /// Length of a main lap in meters
    pub lap_len: i64,
    /// Length of a penalty lap in meters
    pub penalty_len: i64,
    /// Number of firing lines on the range
    pub firing_lines: i64,
    /// Nominal race start (`HH:MM:SS`)
    pub start: String,
    /// Allowed lateness past the scheduled start (`H:MM:SS`)
    pub start_delta: String,
}

/// Validated race configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceConfig {
    pub laps: u32,
    pub lap_len: u32,
    pub penalty_len: u32,
    pub firing_lines: u32,
    pub start: ClockTime,
    pub start_delta: Duration,
}

fn positive(field: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(RaceError::InvalidConfig(format!(
            "{} must be greater than zero",
            field
        )));
    }
    u32::try_from(value)
        .map_err(|_| RaceError::InvalidConfig(format!("{} is too large: {}", field, value)))
}

impl RaceConfigFile {
    /// Check every field and parse the start time and start window
    pub fn validate(&self) -> Result<RaceConfig> {
        let laps = positive("laps", self.laps)?;
        let lap_len = positive("lapLen", self.lap_len)?;
        let firing_lines = positive("firingLines", self.firing_lines)?;
        let penalty_len = positive("penaltyLen", self.penalty_len)?;

        let start = parse_clock_time(&self.start).ok_or_else(|| {
            RaceError::InvalidConfig(format!("invalid start '{}': expected HH:MM:SS", self.start))
        })?;
        let start_delta = parse_start_delta(&self.start_delta)?;

        log::debug!(
            "Race config: {} laps of {}m, penalty lap {}m, {} firing lines, start {}, window {}",
            laps,
            lap_len,
            penalty_len,
            firing_lines,
            start,
            format_duration(start_delta)
        );

        Ok(RaceConfig {
            laps,
            lap_len,
            penalty_len,
            firing_lines,
            start,
            start_delta,
        })
    }
}

impl RaceConfig {
    /// Create a configuration with one firing line starting at midnight
    pub fn new(laps: u32, lap_len: u32, penalty_len: u32, start_delta: Duration) -> Self {
        Self {
            laps,
            lap_len,
            penalty_len,
            firing_lines: 1,
            start: ClockTime::MIN,
            start_delta,
        }
    }

    /// Builder method: set the number of firing lines
    pub fn with_firing_lines(mut self, firing_lines: u32) -> Self {
        self.firing_lines = firing_lines;
        self
    }

    /// Builder method: set the nominal race start
    pub fn with_start(mut self, start: ClockTime) -> Self {
        self.start = start;
        self
    }
}
