//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::hid::keyboard::VOLUME_DOWN_KEY;

// Button timing

/// Button sampling period (ms). Also the effective debounce window.
pub const POLL_PERIOD_MS: u32 = 100;

/// Holding the button for longer than this powers the device off (ms).
pub const HOLD_TIMEOUT_MS: u64 = 2000;

/// Keycode sent in slot 0 of the input report while the button is held.
/// Volume Down triggers the camera shutter on iOS and Android.
pub const ACTION_KEYCODE: u8 = VOLUME_DOWN_KEY;

// Shutdown indication

/// Number of LED on/off cycles before entering System OFF.
pub const SHUTDOWN_BLINK_CYCLES: u8 = 3;

/// Length of one full blink cycle (ms); the LED is on for half of it.
pub const SHUTDOWN_BLINK_PERIOD_MS: u32 = 200;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the `embassy_nrf::peripherals::*` types are
// picked in `main.rs`. Adjust for your own board.
//
//   Button 1 → P0.11 (active-low, internal pull-up)
//   LED 1    → P0.13 (active-low)

/// Port-0 pin number of the shutter button. Used for the wake-up sense
/// configuration, which is written directly to `PIN_CNF`.
pub const BUTTON_PIN: usize = 11;

/// Button pulls the line to ground when pressed.
pub const BUTTON_ACTIVE_LOW: bool = true;

/// LED is lit when the pin is driven low.
pub const LED_ACTIVE_LOW: bool = true;

// BLE

/// GAP device name, also carried in the scan response.
pub const DEVICE_NAME: &str = "BLE Shutter";

/// 16-bit service UUIDs listed in the advertisement.
pub const HID_SERVICE_UUID: u16 = 0x1812;
pub const BATTERY_SERVICE_UUID: u16 = 0x180F;

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

/// ATT MTU requested for the single peripheral link.
pub const BLE_ATT_MTU: u16 = 23;
