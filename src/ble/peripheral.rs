//! SoftDevice bring-up and the peripheral connection loop.
//!
//! One link at a time: advertise, serve GATT until the peer leaves,
//! advertise again. Each new link is asked to encrypt right away. Pairing
//! is Just Works and nothing is bonded, so a peer pairs again on every
//! connection.

use embassy_time::Timer;
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::peripheral::{self, ConnectableAdvertisement};
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, SecurityMode};
use nrf_softdevice::{raw, Softdevice};

use crate::ble::adv_data::{self, AdvPayload};
use crate::ble::hid_service::{BleState, HidServer};
use crate::config::{
    BATTERY_SERVICE_UUID, BLE_ADV_INTERVAL, BLE_ATT_MTU, DEVICE_NAME, HID_SERVICE_UUID,
};

/// Pause before re-advertising after an advertising error.
const ADV_RETRY_MS: u64 = 200;

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: BLE_ATT_MTU }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            // Peers may not rename the device.
            write_perm: raw::ble_gap_conn_sec_mode_t {
                _bitfield_1: raw::ble_gap_conn_sec_mode_t::new_bitfield_1(0, 0),
            },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
        }),
        ..Default::default()
    }
}

/// Just Works pairing, keys kept for the lifetime of the link only.
struct JustWorks;

impl SecurityHandler for JustWorks {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        false
    }

    fn on_security_update(&self, conn: &Connection, mode: SecurityMode) {
        info!("Security changed: {} mode {:?}", conn.peer_address(), mode);
    }
}

static PAIRING: JustWorks = JustWorks;

fn advertising_payloads() -> (AdvPayload, AdvPayload) {
    let adv = match adv_data::advertisement(&[HID_SERVICE_UUID, BATTERY_SERVICE_UUID]) {
        Ok(adv) => adv,
        Err(e) => {
            error!("Advertising payload too large: {:?}", e);
            AdvPayload::new()
        }
    };
    (adv, adv_data::scan_response(DEVICE_NAME))
}

#[embassy_executor::task]
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static HidServer,
    state: &'static BleState,
) -> ! {
    let (adv, scan) = advertising_payloads();
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        let advertisement = ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv[..],
            scan_data: &scan[..],
        };

        info!("BLE advertising");
        let conn = match peripheral::advertise_pairable(sd, advertisement, &config, &PAIRING).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Advertising failed: {:?}", e);
                Timer::after_millis(ADV_RETRY_MS).await;
                continue;
            }
        };

        let peer = conn.peer_address();
        info!("Connected {}", peer);
        if let Err(e) = state.on_connect(conn.clone(), Connection::request_security) {
            warn!("Security request failed: {:?}", e);
        }

        let reason = gatt_server::run(&conn, server, |_| {}).await;

        state.on_disconnect();
        info!("Disconnected from {}: {:?}", peer, reason);
    }
}
