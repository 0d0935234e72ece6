//! Shutter button polling loop.
//!
//! One physical button (active-low with internal pull-up on the DK).
//! The pin is sampled on a fixed period; a bounce shorter than one
//! period is never seen, which is all the debouncing this needs.
//!
//! Every tick the sample is fed to the [`ButtonMonitor`], the LED follows
//! the pressed state, and the resulting report (if any) goes out when the
//! peer is subscribed. The loop ends only when the hold timeout fires.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::hid::ReportSink;
use crate::state::NotificationSubscription;
use crate::ui::indicator::Led;
use crate::ui::input_logic::{ButtonMonitor, ButtonState, Transition};
use crate::ui::MonitorConfig;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Digital input with a configurable active level.
pub struct Button<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// A failed read counts as "not pressed".
    pub fn is_active(&mut self) -> bool {
        let res = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        match res {
            Ok(active) => active,
            Err(_) => {
                warn!("Button pin read failed");
                false
            }
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

/// Returned by [`ShutterButton::run`] once the button was held too long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShutdownRequest {
    pub at_ms: u64,
}

pub struct ShutterButton<'a, P, L, S> {
    button: Button<P>,
    led: Led<L>,
    sink: S,
    subscription: &'a NotificationSubscription,
    monitor: ButtonMonitor,
    config: MonitorConfig,
}

impl<'a, P, L, S> ShutterButton<'a, P, L, S>
where
    P: InputPin,
    L: OutputPin,
    S: ReportSink,
{
    pub fn new(
        button: Button<P>,
        led: Led<L>,
        sink: S,
        subscription: &'a NotificationSubscription,
        config: MonitorConfig,
    ) -> Self {
        Self {
            button,
            led,
            sink,
            subscription,
            monitor: ButtonMonitor::new(config.hold_timeout_ms),
            config,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.monitor.state()
    }

    pub fn led(&self) -> &Led<L> {
        &self.led
    }

    /// One tick: sample, step, drive the LED, notify.
    pub fn poll(&mut self, now_ms: u64) -> Transition {
        let active = self.button.is_active();
        let transition = self.monitor.step(now_ms, active);

        match transition {
            Transition::Press => debug!("Button pressed at {} ms", now_ms),
            Transition::Release => debug!("Button released at {} ms", now_ms),
            Transition::Timeout => {
                info!("Button held past {} ms, shutting down", self.config.hold_timeout_ms)
            }
            _ => {}
        }

        match self.monitor.state() {
            ButtonState::Pressed { .. } => self.led.on(),
            ButtonState::Idle => self.led.off(),
            ButtonState::ShuttingDown => {}
        }

        if let Some(report) = transition.report(self.config.keycode) {
            if self.subscription.get() {
                if let Err(e) = self.sink.send(&report) {
                    warn!("Input report not sent: {:?}", e);
                }
            }
        }

        transition
    }

    /// Poll until the hold timeout fires.
    pub async fn run<C, D>(&mut self, clock: &C, delay: &mut D) -> ShutdownRequest
    where
        C: Clock,
        D: DelayNs,
    {
        loop {
            let now_ms = clock.now_ms();
            if self.poll(now_ms) == Transition::Timeout {
                return ShutdownRequest { at_ms: now_ms };
            }
            delay.delay_ms(self.config.poll_period_ms).await;
        }
    }

    /// Hand back the pins, e.g. to rearm the button for wake-up.
    pub fn into_parts(self) -> (Button<P>, Led<L>) {
        (self.button, self.led)
    }
}
