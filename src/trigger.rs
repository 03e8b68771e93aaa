use serde::{Deserialize, Serialize};

/// Configuration of a trigger output pin.
///
/// `delay` and `duration` are in microseconds. The camera closes the pin when
/// `duration` is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerOutputConfig {
    pub pin_high: bool,
    pub delay: i64,
    pub duration: i64,
}

impl TriggerOutputConfig {
    pub fn new(pin_high: bool, delay: i64, duration: i64) -> Self {
        Self {
            pin_high,
            delay,
            duration,
        }
    }

    /// A configuration that disables the output.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.duration > 0
    }
}
