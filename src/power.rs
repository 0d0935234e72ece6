//! nRF52840 System OFF.
//!
//! System OFF draws ~0.4 µA and is left only through a reset. A pin
//! configured with `SENSE` raises DETECT and resets the chip, so the button
//! doubles as the power switch.
//!
//! The SoftDevice owns the POWER peripheral while enabled, so the request
//! goes through `sd_power_system_off` rather than the register.

use embassy_nrf::pac;
use embassy_nrf::pac::gpio::vals;

use crate::error::Error;
use crate::power_logic::PowerControl;

pub struct NrfPowerControl {
    wake_pin: usize,
}

impl NrfPowerControl {
    /// `wake_pin` is a port-0 pin number. Any `Input` on that pin must be
    /// dropped before `arm_wake`, since its drop disconnects the input
    /// buffer again; `power_logic::shutdown` does this.
    pub fn new(wake_pin: usize) -> Self {
        Self { wake_pin }
    }
}

impl PowerControl for NrfPowerControl {
    fn arm_wake(&mut self) -> Result<(), Error> {
        if self.wake_pin > 31 {
            return Err(Error::Gpio);
        }
        pac::P0.pin_cnf(self.wake_pin).write(|w| {
            w.set_dir(vals::Dir::INPUT);
            w.set_input(vals::Input::CONNECT);
            w.set_pull(vals::Pull::PULLUP);
            w.set_sense(vals::Sense::LOW);
        });
        info!("Wake on P0.{} low", self.wake_pin);
        Ok(())
    }

    fn system_off(&mut self) {
        let ret = unsafe { nrf_softdevice::raw::sd_power_system_off() };
        // Only reached if the SoftDevice refused, or under a debugger
        // where System OFF is emulated.
        warn!("System OFF returned {}", ret);
        loop {
            cortex_m::asm::wfe();
        }
    }
}
