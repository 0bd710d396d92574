//! Presenter configuration
//!
//! Defaults plus the two diagnostic environment toggles:
//! - `GALAXY3D_VERBOSE=prt` prints every submitted batch
//! - `GALAXY3D_BATCH_DUMP=<path>` exports every submitted batch as JSON
//!
//! Neither toggle changes control flow.

use std::path::PathBuf;
use crate::error::{Error, Result};

/// Upper bound of the in-flight frame pool
pub const MAX_FRAMES_IN_FLIGHT: usize = 4;

/// Default number of frames the GPU may lag behind the CPU
pub const DEFAULT_FRAMES_IN_FLIGHT: usize = 2;

/// Default capacity of the per-surface frame timestamp ring
pub const DEFAULT_FRAME_TIMESTAMPS: usize = 32;

/// Environment variable enabling the human-readable batch dump
pub const ENV_VERBOSE: &str = "GALAXY3D_VERBOSE";

/// Environment variable holding the JSON batch export path
pub const ENV_BATCH_DUMP: &str = "GALAXY3D_BATCH_DUMP";

/// Presenter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterConfig {
    /// Number of in-flight frame slots per surface
    pub frames_in_flight: usize,
    /// Capacity of the frame timestamp ring (FPS accounting)
    pub frame_timestamps: usize,
    /// Print every submitted batch
    pub verbose_batches: bool,
    /// Export every submitted batch to this file
    pub batch_dump_path: Option<PathBuf>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: DEFAULT_FRAMES_IN_FLIGHT,
            frame_timestamps: DEFAULT_FRAME_TIMESTAMPS,
            verbose_batches: false,
            batch_dump_path: None,
        }
    }
}

impl PresenterConfig {
    /// Defaults overridden by `GALAXY3D_VERBOSE` and `GALAXY3D_BATCH_DUMP`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_VERBOSE).ok().as_deref(),
            std::env::var(ENV_BATCH_DUMP).ok().as_deref(),
        )
    }

    /// Same as `from_env()`, with the variable values passed explicitly
    pub fn from_vars(verbose: Option<&str>, batch_dump: Option<&str>) -> Self {
        Self {
            verbose_batches: verbose.map_or(false, |v| v.starts_with("prt")),
            batch_dump_path: batch_dump
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Set the number of in-flight frame slots
    pub fn with_frames_in_flight(mut self, frames_in_flight: usize) -> Self {
        self.frames_in_flight = frames_in_flight;
        self
    }

    /// Set the frame timestamp ring capacity
    pub fn with_frame_timestamps(mut self, frame_timestamps: usize) -> Self {
        self.frame_timestamps = frame_timestamps;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if `frames_in_flight` is outside
    /// `1..=MAX_FRAMES_IN_FLIGHT` or `frame_timestamps` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.frames_in_flight == 0 || self.frames_in_flight > MAX_FRAMES_IN_FLIGHT {
            return Err(Error::InitializationFailed(format!(
                "frames_in_flight must be in 1..={}, got {}",
                MAX_FRAMES_IN_FLIGHT, self.frames_in_flight
            )));
        }
        if self.frame_timestamps == 0 {
            return Err(Error::InitializationFailed(
                "frame_timestamps must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
