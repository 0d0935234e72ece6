//! User interface subsystem - one button, one LED.
//!
//! ## Components
//!
//! - **Buttons**: sampled shutter button driving the HID reports
//! - **Indicator**: status LED, lit while the button is held

pub mod buttons;
pub mod indicator;
pub mod input_logic;

use crate::config;

/// Timing and key for the button loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    pub poll_period_ms: u32,
    pub hold_timeout_ms: u64,
    pub keycode: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: config::POLL_PERIOD_MS,
            hold_timeout_ms: config::HOLD_TIMEOUT_MS,
            keycode: config::ACTION_KEYCODE,
        }
    }
}
