use crate::playback::DEFAULT_CELEBRATION;
use std::time::Duration;

/// Settings for a [Session](crate::session::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Minimum time between two playback steps while the drone is moving.
    pub step_interval: Duration,
    /// How long the arrival celebration lasts.
    pub celebration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            step_interval: Duration::from_millis(100),
            celebration: DEFAULT_CELEBRATION,
        }
    }
}

impl SessionConfig {
    /// Default settings on a grid of the given size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_step_interval(mut self, step_interval: Duration) -> Self {
        self.step_interval = step_interval;
        self
    }

    pub fn with_celebration(mut self, celebration: Duration) -> Self {
        self.celebration = celebration;
        self
    }
}
