//! HID-over-GATT service (0x1812) in the SoftDevice attribute table.
//!
//! ```text
//! HID Information   0x2A4A  read
//! Report Map        0x2A4B  read
//! Report            0x2A4D  read, notify (encrypted, CCCD encrypted)
//!   Report Reference 0x2908 read
//! HID Control Point 0x2A4C  write without response
//! ```

use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use crate::ble::attributes::{self, STATIC_VALUES};
use crate::config::HID_SERVICE_UUID;
use crate::error::Error;
use crate::hid::keyboard::{InputReport, INPUT_REPORT_SIZE};
use crate::hid::ReportSink;
use crate::state::SharedState;

const HID_INFO_UUID: u16 = 0x2A4A;
const REPORT_MAP_UUID: u16 = 0x2A4B;
const HID_CONTROL_POINT_UUID: u16 = 0x2A4C;
const REPORT_UUID: u16 = 0x2A4D;
const REPORT_REFERENCE_UUID: u16 = 0x2908;

pub type BleState = SharedState<Connection>;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidHandles {
    hid_info: u16,
    report_map: u16,
    pub(crate) input_report: u16,
    input_report_cccd: u16,
    input_report_reference: u16,
    control_point: u16,
}

impl HidHandles {
    fn register(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut service_builder = ServiceBuilder::new(sd, Uuid::new_16(HID_SERVICE_UUID))?;

        let hid_info = service_builder
            .add_characteristic(
                Uuid::new_16(HID_INFO_UUID),
                Attribute::new(STATIC_VALUES.info),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let report_map = service_builder
            .add_characteristic(
                Uuid::new_16(REPORT_MAP_UUID),
                Attribute::new(STATIC_VALUES.report_map),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        // Starts empty; reports are pushed by notification only.
        let mut input_report = service_builder.add_characteristic(
            Uuid::new_16(REPORT_UUID),
            Attribute::new([0u8; 0])
                .variable_len(INPUT_REPORT_SIZE as u16)
                .security(SecurityMode::JustWorks),
            Metadata::with_security(Properties::new().read().notify(), SecurityMode::JustWorks),
        )?;
        let input_report_reference = input_report.add_descriptor(
            Uuid::new_16(REPORT_REFERENCE_UUID),
            Attribute::new(STATIC_VALUES.report_reference),
        )?;
        let input_report = input_report.build();

        let control_point = service_builder
            .add_characteristic(
                Uuid::new_16(HID_CONTROL_POINT_UUID),
                Attribute::new([0u8]),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let _service_handle = service_builder.build();

        Ok(Self {
            hid_info: hid_info.value_handle,
            report_map: report_map.value_handle,
            input_report: input_report.value_handle,
            input_report_cccd: input_report.cccd_handle,
            input_report_reference: input_report_reference.handle(),
            control_point: control_point.value_handle,
        })
    }
}

/// GATT server: the HID service plus the shared state its writes update.
pub struct HidServer {
    handles: HidHandles,
    state: &'static BleState,
}

impl HidServer {
    pub fn new(sd: &mut Softdevice, state: &'static BleState) -> Result<Self, Error> {
        let handles = HidHandles::register(sd)?;
        debug!("HID service registered: {:?}", handles);
        Ok(Self { handles, state })
    }

    pub fn handles(&self) -> &HidHandles {
        &self.handles
    }
}

impl gatt_server::Server for HidServer {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if handle == self.handles.input_report_cccd {
            self.state.subscription.on_ccc_bytes(data);
        } else if handle == self.handles.control_point {
            if let Err(e) = attributes::write_control_point(&self.state.control_point, offset, data) {
                warn!("HID control point write rejected: {:?}", e);
            }
        }
        None
    }
}

/// Sends input reports on the current connection.
///
/// Without a registered service every send fails with `NotConnected`.
pub struct GattReportSink {
    report_handle: Option<u16>,
    state: &'static BleState,
}

impl GattReportSink {
    pub fn new(server: Option<&HidServer>, state: &'static BleState) -> Self {
        Self {
            report_handle: server.map(|s| s.handles().input_report),
            state,
        }
    }
}

impl ReportSink for GattReportSink {
    fn send(&mut self, report: &InputReport) -> Result<(), Error> {
        let handle = self.report_handle.ok_or(Error::NotConnected)?;
        let conn = self.state.connection.current().ok_or(Error::NotConnected)?;
        gatt_server::notify_value(&conn, handle, &report.to_bytes())?;
        Ok(())
    }
}
