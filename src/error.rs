//! Unified error type for ble-shutter.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    /// No peer is connected, so there is nobody to notify.
    NotConnected,

    // GATT
    /// An attribute read or write was rejected.
    Att(AttError),

    // GPIO
    /// A pin could not be read or driven.
    Gpio,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// Advertising could not start.
    AdvertiseFailed,
    /// The GATT service could not be registered.
    RegisterFailed,
}

/// ATT protocol errors returned from the attribute handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttError {
    /// Offset beyond the end of the attribute value.
    InvalidOffset,
}

impl AttError {
    /// ATT error code as sent on the wire.
    pub const fn code(self) -> u8 {
        match self {
            AttError::InvalidOffset => 0x07,
        }
    }
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<AttError> for Error {
    fn from(e: AttError) -> Self {
        Error::Att(e)
    }
}

#[cfg(feature = "embedded")]
impl From<nrf_softdevice::ble::gatt_server::NotifyValueError> for Error {
    fn from(e: nrf_softdevice::ble::gatt_server::NotifyValueError) -> Self {
        use nrf_softdevice::ble::gatt_server::NotifyValueError;
        match e {
            NotifyValueError::Disconnected => Error::NotConnected,
            NotifyValueError::Raw(code) => Error::Ble(BleError::Raw(code as u32)),
        }
    }
}

#[cfg(feature = "embedded")]
impl From<nrf_softdevice::ble::gatt_server::RegisterError> for Error {
    fn from(_: nrf_softdevice::ble::gatt_server::RegisterError) -> Self {
        Error::Ble(BleError::RegisterFailed)
    }
}

#[cfg(feature = "embedded")]
impl From<nrf_softdevice::ble::peripheral::AdvertiseError> for Error {
    fn from(e: nrf_softdevice::ble::peripheral::AdvertiseError) -> Self {
        use nrf_softdevice::ble::peripheral::AdvertiseError;
        match e {
            AdvertiseError::Raw(code) => Error::Ble(BleError::Raw(code as u32)),
            _ => Error::Ble(BleError::AdvertiseFailed),
        }
    }
}
