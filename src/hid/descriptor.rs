//! Static HID-over-GATT descriptors served by the HID service.

/// HID Information characteristic value (0x2A4A).
///
/// Five bytes on the wire: bcdHID (LE), a 16-bit country code (LE) and
/// the flags byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidInfo {
    pub bcd_hid: u16,
    pub country_code: u16,
    pub flags: u8,
}

/// `flags` bit 1: device is normally connectable.
pub const HID_INFO_FLAG_NORMALLY_CONNECTABLE: u8 = 1 << 1;

impl HidInfo {
    pub const fn to_bytes(&self) -> [u8; 5] {
        let bcd = self.bcd_hid.to_le_bytes();
        let country = self.country_code.to_le_bytes();
        [bcd[0], bcd[1], country[0], country[1], self.flags]
    }
}

/// HID 1.11, country code 2, normally connectable.
pub const HID_INFO: HidInfo = HidInfo {
    bcd_hid: 0x0111,
    country_code: 0x0002,
    flags: HID_INFO_FLAG_NORMALLY_CONNECTABLE,
};

/// Report Reference descriptor value (0x2908).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportReference {
    pub id: u8,
    pub kind: ReportType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ReportType {
    Input = 0x01,
    Output = 0x02,
    Feature = 0x03,
}

impl ReportReference {
    pub const fn to_bytes(&self) -> [u8; 2] {
        [self.id, self.kind as u8]
    }
}

/// The single input report: ID 1, type Input.
pub const REPORT_REFERENCE: ReportReference = ReportReference {
    id: 0x01,
    kind: ReportType::Input,
};

/// Report map (0x2A4B) for a two-slot keyboard.
///
/// Declares:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 2 key code bytes, usages 0x00..=0x81 (input)
pub const REPORT_MAP: [u8; 45] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant)
    //
    //   - Key codes (2 bytes) -
    0x95, 0x02, //   Report Count (2)
    0x75, 0x08, //   Report Size (8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x81, //   Logical Maximum (0x81)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0x81, //   Usage Maximum (Volume Down)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
