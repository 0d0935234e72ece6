//! BLE HID keyboard input report (boot protocol compatible).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield), always 0x00 here
//! Byte 1: Reserved (0x00)
//! Byte 2: Key code slot 0 - the action key, or 0x00 when released
//! Byte 3: Key code slot 1 (0x00)
//! Byte 4-7: Padding (0x00)
//! ```
//!
//! The report map only declares two key slots, but hosts expect the
//! classic 8-byte boot report, so the trailing bytes stay on the wire.

/// Input report size in bytes.
pub const INPUT_REPORT_SIZE: usize = 8;

/// Keyboard Volume Down. Fires the camera shutter on iOS and Android.
pub const VOLUME_DOWN_KEY: u8 = 0x81;

/// Keyboard Volume Up.
pub const VOLUME_UP_KEY: u8 = 0x80;

/// Keypad Enter.
pub const KEYBOARD_RETURN_KEY: u8 = 0x58;

/// One HID input report as sent in a Report characteristic notification.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved, always 0x00.
    pub reserved: u8,
    /// The two key slots declared by the report map.
    pub keycodes: [u8; 2],
}

impl InputReport {
    /// Serialise into the 8-byte wire form.
    pub const fn to_bytes(&self) -> [u8; INPUT_REPORT_SIZE] {
        [
            self.modifier,
            self.reserved,
            self.keycodes[0],
            self.keycodes[1],
            0,
            0,
            0,
            0,
        ]
    }

    /// Returns `true` if no key is pressed (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Report with `keycode` in slot 0 and everything else cleared.
pub const fn encode_key_down(keycode: u8) -> InputReport {
    InputReport {
        modifier: 0,
        reserved: 0,
        keycodes: [keycode, 0],
    }
}

/// All-zero "no key pressed" report.
pub const fn encode_key_up() -> InputReport {
    InputReport {
        modifier: 0,
        reserved: 0,
        keycodes: [0, 0],
    }
}
