//! BLE shutter firmware for the nRF52840-DK with SoftDevice S140.
//!
//! Button 1 sends Volume Down to the connected phone while held. Holding
//! it past the timeout blinks LED 1 and powers the board off; pressing
//! the button again wakes it.

#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_time::{Delay, Instant};
use nrf_softdevice::Softdevice;
use panic_probe as _;
use static_cell::StaticCell;

use ble_shutter::ble::hid_service::{BleState, GattReportSink, HidServer};
use ble_shutter::ble::peripheral::{ble_task, softdevice_config, softdevice_task};
use ble_shutter::config::{BUTTON_ACTIVE_LOW, BUTTON_PIN, LED_ACTIVE_LOW};
use ble_shutter::power::NrfPowerControl;
use ble_shutter::power_logic::{self, BlinkPattern};
use ble_shutter::ui::buttons::{Button, Clock, ShutterButton};
use ble_shutter::ui::indicator::Led;
use ble_shutter::ui::MonitorConfig;

static STATE: StaticCell<BleState> = StaticCell::new();
static SERVER: StaticCell<HidServer> = StaticCell::new();

struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Keep the HAL interrupts off the priorities the SoftDevice reserves.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    info!("Peripherals initialized");

    let sd = Softdevice::enable(&softdevice_config());
    let state: &'static BleState = STATE.init(BleState::new());

    // Without the HID service the button still runs so the long-press
    // power-off keeps working.
    let server: Option<&'static HidServer> = match HidServer::new(sd, state) {
        Ok(server) => Some(&*SERVER.init(server)),
        Err(e) => {
            error!("HID service registration failed: {:?}", e);
            None
        }
    };
    let sd: &'static Softdevice = sd;

    if let Err(e) = spawner.spawn(softdevice_task(sd)) {
        error!("SoftDevice task not started: {:?}", e);
    }
    if let Some(server) = server {
        if let Err(e) = spawner.spawn(ble_task(sd, server, state)) {
            error!("BLE task not started: {:?}", e);
        }
    }
    info!("SoftDevice initialized");

    // P0.11 must match BUTTON_PIN, which the wake-up configuration uses.
    let button = Button::new(Input::new(p.P0_11, Pull::Up), BUTTON_ACTIVE_LOW);
    let led_off = if LED_ACTIVE_LOW { Level::High } else { Level::Low };
    let led = Led::new(Output::new(p.P0_13, led_off, OutputDrive::Standard), LED_ACTIVE_LOW);

    let mut shutter = ShutterButton::new(
        button,
        led,
        GattReportSink::new(server, state),
        &state.subscription,
        MonitorConfig::default(),
    );

    let request = shutter.run(&EmbassyClock, &mut Delay).await;
    info!("Shutdown requested at {} ms", request.at_ms);

    // The button Input is dropped inside `shutdown`, once released, before
    // the wake-up config is written to its pin.
    let (button, mut led) = shutter.into_parts();
    let mut power = NrfPowerControl::new(BUTTON_PIN);
    power_logic::shutdown(button, &mut led, &mut Delay, &mut power, BlinkPattern::default()).await;
}
