//! Power-down sequence, independent of the chip.
//!
//! Runs once after the button loop asks for shutdown: blink the LED, wait
//! for the button to be let go, arm it as a wake source, enter System OFF.
//! Every step is best-effort; a failure is logged and the sequence goes on.
//!
//! The wake source senses the pressed level, so arming it while the button
//! is still down would wake the chip the moment it goes off.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::config;
use crate::error::Error;
use crate::ui::buttons::Button;
use crate::ui::indicator::Led;

/// Platform hooks for the last two steps.
pub trait PowerControl {
    /// Make the button line wake the chip from System OFF.
    fn arm_wake(&mut self) -> Result<(), Error>;

    /// Enter the deepest sleep state. Does not return on hardware.
    fn system_off(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    pub cycles: u8,
    /// Full on+off period; each half lasts `period_ms / 2`.
    pub period_ms: u32,
}

impl Default for BlinkPattern {
    fn default() -> Self {
        Self {
            cycles: config::SHUTDOWN_BLINK_CYCLES,
            period_ms: config::SHUTDOWN_BLINK_PERIOD_MS,
        }
    }
}

/// Poll `button` every `period_ms` until it reads inactive.
pub async fn wait_released<B, D>(button: &mut Button<B>, delay: &mut D, period_ms: u32)
where
    B: InputPin,
    D: DelayNs,
{
    if button.is_active() {
        info!("Waiting for button release");
        while button.is_active() {
            delay.delay_ms(period_ms).await;
        }
    }
}

/// Blink, wait for release, arm wake-up, power off. The button is dropped
/// before the wake source is armed. Returns only when `system_off` does,
/// which is never on the target.
pub async fn shutdown<B, L, D, P>(
    mut button: Button<B>,
    led: &mut Led<L>,
    delay: &mut D,
    power: &mut P,
    pattern: BlinkPattern,
) where
    B: InputPin,
    L: OutputPin,
    D: DelayNs,
    P: PowerControl,
{
    info!("Powering down");

    let half = pattern.period_ms / 2;
    for _ in 0..pattern.cycles {
        led.on();
        delay.delay_ms(half).await;
        led.off();
        delay.delay_ms(half).await;
    }

    wait_released(&mut button, delay, config::POLL_PERIOD_MS).await;
    drop(button);

    if let Err(e) = power.arm_wake() {
        warn!("Wake-up source not armed: {:?}", e);
    }

    power.system_off();
}
