//! Advertising and scan-response payload builders.
//!
//! Payloads are a sequence of AD structures: `[len, type, data...]`,
//! where `len` counts the type byte plus the data.

use heapless::Vec;

/// Legacy advertising payload limit.
pub const MAX_ADV_LEN: usize = 31;

pub const AD_TYPE_FLAGS: u8 = 0x01;
pub const AD_TYPE_UUID16_COMPLETE: u8 = 0x03;
pub const AD_TYPE_SHORT_LOCAL_NAME: u8 = 0x08;
pub const AD_TYPE_COMPLETE_LOCAL_NAME: u8 = 0x09;

/// LE General Discoverable Mode.
pub const FLAG_LE_GENERAL_DISC: u8 = 0x02;
/// BR/EDR Not Supported.
pub const FLAG_BREDR_NOT_SUPPORTED: u8 = 0x04;

pub type AdvPayload = Vec<u8, MAX_ADV_LEN>;

/// Error raised when a payload would not fit in one advertising PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadFull;

fn push_structure(out: &mut AdvPayload, ad_type: u8, data: &[u8]) -> Result<(), PayloadFull> {
    let len = u8::try_from(data.len() + 1).map_err(|_| PayloadFull)?;
    out.push(len).map_err(|_| PayloadFull)?;
    out.push(ad_type).map_err(|_| PayloadFull)?;
    out.extend_from_slice(data).map_err(|_| PayloadFull)
}

/// Flags plus the complete list of 16-bit service UUIDs.
pub fn advertisement(uuids: &[u16]) -> Result<AdvPayload, PayloadFull> {
    let mut out = AdvPayload::new();
    push_structure(
        &mut out,
        AD_TYPE_FLAGS,
        &[FLAG_LE_GENERAL_DISC | FLAG_BREDR_NOT_SUPPORTED],
    )?;

    let mut list: Vec<u8, MAX_ADV_LEN> = Vec::new();
    for uuid in uuids {
        list.extend_from_slice(&uuid.to_le_bytes())
            .map_err(|_| PayloadFull)?;
    }
    push_structure(&mut out, AD_TYPE_UUID16_COMPLETE, &list)?;
    Ok(out)
}

/// Local name for the scan response. Names too long for one PDU are
/// cut and sent as a shortened name.
pub fn scan_response(name: &str) -> AdvPayload {
    let mut out = AdvPayload::new();
    let max = MAX_ADV_LEN - 2;
    let bytes = name.as_bytes();
    let (ad_type, data) = if bytes.len() > max {
        (AD_TYPE_SHORT_LOCAL_NAME, &bytes[..max])
    } else {
        (AD_TYPE_COMPLETE_LOCAL_NAME, bytes)
    };
    // Fits by construction.
    let _ = push_structure(&mut out, ad_type, data);
    out
}
