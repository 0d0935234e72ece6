//! Read/write handlers for the HID service attributes.
//!
//! Reads follow ATT long-read semantics: the peer asks for the value
//! starting at `offset` and gets as much as fits in its buffer. Offsets
//! past the end of the value are rejected, an offset equal to the length
//! yields an empty read.

use crate::error::AttError;
use crate::hid::descriptor::{HID_INFO, REPORT_MAP, REPORT_REFERENCE};
use crate::state::ControlPoint;

/// Copy `value[offset..]` into `buf`, truncated to `buf.len()`.
pub fn read_attribute(value: &[u8], offset: usize, buf: &mut [u8]) -> Result<usize, AttError> {
    if offset > value.len() {
        return Err(AttError::InvalidOffset);
    }
    let remaining = &value[offset..];
    let len = remaining.len().min(buf.len());
    buf[..len].copy_from_slice(&remaining[..len]);
    Ok(len)
}

/// Static values registered in the attribute table.
pub struct StaticValues {
    pub info: [u8; 5],
    pub report_map: [u8; 45],
    pub report_reference: [u8; 2],
}

pub const STATIC_VALUES: StaticValues = StaticValues {
    info: HID_INFO.to_bytes(),
    report_map: REPORT_MAP,
    report_reference: REPORT_REFERENCE.to_bytes(),
};

pub fn read_info(offset: usize, buf: &mut [u8]) -> Result<usize, AttError> {
    read_attribute(&STATIC_VALUES.info, offset, buf)
}

pub fn read_report_map(offset: usize, buf: &mut [u8]) -> Result<usize, AttError> {
    read_attribute(&STATIC_VALUES.report_map, offset, buf)
}

pub fn read_report_reference(offset: usize, buf: &mut [u8]) -> Result<usize, AttError> {
    read_attribute(&STATIC_VALUES.report_reference, offset, buf)
}

/// Input reports are push-only; a read of the Report value is always empty.
pub fn read_input_report(offset: usize, buf: &mut [u8]) -> Result<usize, AttError> {
    read_attribute(&[], offset, buf)
}

/// Control Point write. Anything that would not fit the one-byte value is
/// rejected without touching the stored byte.
pub fn write_control_point(cp: &ControlPoint, offset: usize, data: &[u8]) -> Result<usize, AttError> {
    if offset.saturating_add(data.len()) > ControlPoint::SIZE {
        return Err(AttError::InvalidOffset);
    }
    if let Some(&value) = data.first() {
        cp.store(value);
    }
    debug!("HID control point <- {:?}", data);
    Ok(data.len())
}
