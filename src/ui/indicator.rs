//! Status LED.
//!
//! On while the button is held, blinks during shutdown. Pin errors are
//! logged and otherwise ignored: the LED is never worth aborting for.

use embedded_hal::digital::OutputPin;

pub struct Led<P> {
    pin: P,
    active_low: bool,
    lit: bool,
}

impl<P: OutputPin> Led<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            lit: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        let drive_high = on != self.active_low;
        let res = if drive_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("LED pin write failed");
        }
        self.lit = on;
    }

    pub fn on(&mut self) {
        self.set(true);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    /// Last requested state.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn release(self) -> P {
        self.pin
    }
}
