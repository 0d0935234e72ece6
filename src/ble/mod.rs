//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertising** - flags plus the HID and Battery service UUIDs,
//!    the device name in the scan response.
//! 2. **HID Service** - the HID-over-GATT attribute table and the sink
//!    that notifies input reports on it.
//! 3. **Connection loop** - one link at a time, re-advertising after
//!    every disconnect.
//!
//! `adv_data` and `attributes` are plain data and run on the host too.

pub mod adv_data;
pub mod attributes;

#[cfg(feature = "embedded")]
pub mod hid_service;
#[cfg(feature = "embedded")]
pub mod peripheral;
