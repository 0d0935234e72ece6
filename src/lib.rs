//! Single-button BLE HID shutter remote.
//!
//! The pure logic (report encoding, descriptors, the button state machine,
//! the shutdown sequence) builds on the host for testing:
//!
//! Usage: `cargo test`
//!
//! The SoftDevice and nRF specific parts sit behind the `embedded` feature
//! and are driven by the binary in `main.rs`.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod ble;
pub mod config;
pub mod error;
pub mod hid;
pub mod power_logic;
pub mod state;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod power;

pub use error::Error;
