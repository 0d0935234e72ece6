//! Hand-written hardware doubles shared by the integration tests.
//!
//! Time is a shared millisecond counter: the delay advances it, the clock
//! and the scripted button read it. Everything observable goes into one
//! event log so tests can check ordering across devices.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use ble_shutter::error::Error;
use ble_shutter::hid::keyboard::InputReport;
use ble_shutter::hid::ReportSink;
use ble_shutter::power_logic::PowerControl;
use ble_shutter::ui::buttons::Clock;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// LED pin driven; `true` = high.
    Pin(bool),
    Delay(u32),
    ArmWake,
    SystemOff,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Time
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
pub struct TestClock(pub Rc<Cell<u64>>);

impl TestClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Advances the shared clock instead of sleeping. Panics after `budget`
/// delays so a loop that never ends fails the test instead of hanging it.
pub struct TestDelay {
    clock: TestClock,
    log: Option<EventLog>,
    budget: usize,
}

impl TestDelay {
    pub fn new(clock: TestClock) -> Self {
        Self {
            clock,
            log: None,
            budget: 1000,
        }
    }

    pub fn logging(clock: TestClock, log: EventLog) -> Self {
        Self {
            clock,
            log: Some(log),
            budget: 1000,
        }
    }

    fn advance_ms(&mut self, ms: u32) {
        assert!(self.budget > 0, "delay budget exhausted: loop did not terminate");
        self.budget -= 1;
        self.clock.0.set(self.clock.0.get() + u64::from(ms));
        if let Some(log) = &self.log {
            log.borrow_mut().push(Event::Delay(ms));
        }
    }
}

impl DelayNs for TestDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance_ms(ns / 1_000_000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance_ms(us / 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance_ms(ms);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// GPIO
// ═══════════════════════════════════════════════════════════════════════════

/// Active-low button pressed during the half-open `[start, end)` windows.
pub struct ScriptedButton {
    clock: TestClock,
    pressed: Vec<(u64, u64)>,
}

impl ScriptedButton {
    pub fn new(clock: TestClock, pressed: &[(u64, u64)]) -> Self {
        Self {
            clock,
            pressed: pressed.to_vec(),
        }
    }

    fn is_pressed(&self) -> bool {
        let now = self.clock.now_ms();
        self.pressed.iter().any(|&(start, end)| now >= start && now < end)
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_pressed())
    }
}

/// Input whose every read fails.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Output that records its level and every write.
pub struct RecordingPin {
    pub high: bool,
    log: Option<EventLog>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self {
            high: true,
            log: None,
        }
    }

    pub fn logging(log: EventLog) -> Self {
        Self {
            high: true,
            log: Some(log),
        }
    }

    fn drive(&mut self, high: bool) {
        self.high = high;
        if let Some(log) = &self.log {
            log.borrow_mut().push(Event::Pin(high));
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Report sink & power
// ═══════════════════════════════════════════════════════════════════════════

/// Records every report handed to it, optionally failing each send.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Vec<[u8; 8]>,
    pub fail_with: Option<Error>,
}

impl RecordingSink {
    pub fn failing(err: Error) -> Self {
        Self {
            sent: Vec::new(),
            fail_with: Some(err),
        }
    }

    pub fn key_downs(&self) -> usize {
        self.sent.iter().filter(|r| r[2] != 0).count()
    }

    pub fn key_ups(&self) -> usize {
        self.sent.iter().filter(|r| **r == [0u8; 8]).count()
    }
}

impl ReportSink for RecordingSink {
    fn send(&mut self, report: &InputReport) -> Result<(), Error> {
        self.sent.push(report.to_bytes());
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub struct RecordingPower {
    log: EventLog,
    arm_result: Result<(), Error>,
}

impl RecordingPower {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            arm_result: Ok(()),
        }
    }

    pub fn failing_arm(log: EventLog, err: Error) -> Self {
        Self {
            log,
            arm_result: Err(err),
        }
    }
}

impl PowerControl for RecordingPower {
    fn arm_wake(&mut self) -> Result<(), Error> {
        self.log.borrow_mut().push(Event::ArmWake);
        self.arm_result
    }

    fn system_off(&mut self) {
        self.log.borrow_mut().push(Event::SystemOff);
    }
}
