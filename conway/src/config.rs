// config.rs - Default sizes, rates and the settings bundle used to build a board and runner

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: usize = 96;                                    // Cells per row
pub const DEFAULT_HEIGHT: usize = 55;                                   // Rows
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200); // 5 steps per second
pub const MIN_STEPS_PER_SECOND: u32 = 1;
pub const MAX_STEPS_PER_SECOND: u32 = 100;
pub const DEFAULT_EVENT_CAPACITY: usize = 64;                           // Buffered runner notifications

/// Everything needed to construct a board and the runner that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Time between two scheduled steps.
    pub tick_interval: Duration,
    /// Notifications a slow subscriber may fall behind before it lags.
    pub event_capacity: usize,
}

impl Settings {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tick_interval must be > 0".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Tick interval for a speed in steps per second, clamped to the supported range.
pub fn interval_for_rate(steps_per_second: u32) -> Duration {
    let rate = steps_per_second.clamp(MIN_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND);
    Duration::from_millis(1000 / u64::from(rate))
}

/// Inverse of [`interval_for_rate`], rounded to the nearest supported speed.
pub fn rate_for_interval(interval: Duration) -> u32 {
    let millis = interval.as_millis().max(1);
    let rate = ((1000 + millis / 2) / millis).min(u128::from(MAX_STEPS_PER_SECOND)) as u32;
    rate.clamp(MIN_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND)
}
