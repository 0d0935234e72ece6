//! Pure button state machine, evaluated once per poll tick.

use crate::hid::keyboard::{encode_key_down, encode_key_up, InputReport};

/// Where the button is in its press/release timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Idle,
    /// Held since `since_ms` (monotonic milliseconds).
    Pressed { since_ms: u64 },
    /// Hold timeout hit; terminal.
    ShuttingDown,
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Idle -> Pressed.
    Press,
    /// Still held, within the timeout.
    Hold,
    /// Pressed -> Idle.
    Release,
    /// Still idle.
    Rest,
    /// Held past the timeout. Produced exactly once.
    Timeout,
    /// Already shut down; nothing happens any more.
    Halted,
}

impl Transition {
    /// Report to send for this tick, if any. Idle ticks re-send the empty
    /// report so a host that missed a release resynchronises.
    pub fn report(self, keycode: u8) -> Option<InputReport> {
        match self {
            Transition::Press => Some(encode_key_down(keycode)),
            Transition::Release | Transition::Rest => Some(encode_key_up()),
            Transition::Hold | Transition::Timeout | Transition::Halted => None,
        }
    }
}

pub struct ButtonMonitor {
    state: ButtonState,
    hold_timeout_ms: u64,
}

impl ButtonMonitor {
    pub const fn new(hold_timeout_ms: u64) -> Self {
        Self {
            state: ButtonState::Idle,
            hold_timeout_ms,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feed one sample taken at `now_ms`.
    pub fn step(&mut self, now_ms: u64, active: bool) -> Transition {
        let (next, transition) = match (self.state, active) {
            (ButtonState::ShuttingDown, _) => (ButtonState::ShuttingDown, Transition::Halted),
            (ButtonState::Idle, true) => (ButtonState::Pressed { since_ms: now_ms }, Transition::Press),
            (ButtonState::Idle, false) => (ButtonState::Idle, Transition::Rest),
            (ButtonState::Pressed { .. }, false) => (ButtonState::Idle, Transition::Release),
            (ButtonState::Pressed { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) > self.hold_timeout_ms {
                    (ButtonState::ShuttingDown, Transition::Timeout)
                } else {
                    (ButtonState::Pressed { since_ms }, Transition::Hold)
                }
            }
        };
        self.state = next;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::keyboard::VOLUME_DOWN_KEY;

    const TIMEOUT: u64 = 2000;
    const TICK: u64 = 100;

    #[test]
    fn press_then_release() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        assert_eq!(m.step(0, false), Transition::Rest);
        assert_eq!(m.step(100, true), Transition::Press);
        assert_eq!(m.state(), ButtonState::Pressed { since_ms: 100 });
        assert_eq!(m.step(200, true), Transition::Hold);
        assert_eq!(m.step(300, false), Transition::Release);
        assert_eq!(m.state(), ButtonState::Idle);
    }

    #[test]
    fn hold_exactly_timeout_does_not_shut_down() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        m.step(0, true);
        assert_eq!(m.step(TIMEOUT, true), Transition::Hold);
    }

    #[test]
    fn hold_past_timeout_shuts_down_once() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        m.step(0, true);
        assert_eq!(m.step(TIMEOUT + 1, true), Transition::Timeout);
        assert_eq!(m.state(), ButtonState::ShuttingDown);
        assert_eq!(m.step(TIMEOUT + 2, true), Transition::Halted);
        assert_eq!(m.step(TIMEOUT + 3, false), Transition::Halted);
    }

    #[test]
    fn timeout_counts_from_press_edge() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        let mut now = 0;
        m.step(now, true);
        for _ in 0..20 {
            now += TICK;
            assert_eq!(m.step(now, true), Transition::Hold);
        }
        now += TICK;
        assert_eq!(m.step(now, true), Transition::Timeout);
    }

    #[test]
    fn release_restarts_the_timer() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        m.step(0, true);
        m.step(1900, true);
        m.step(2000, false);
        assert_eq!(m.step(2100, true), Transition::Press);
        assert_eq!(m.step(4100, true), Transition::Hold);
        assert_eq!(m.step(4101, true), Transition::Timeout);
    }

    #[test]
    fn clock_going_backwards_does_not_trip_timeout() {
        let mut m = ButtonMonitor::new(TIMEOUT);
        m.step(5000, true);
        assert_eq!(m.step(10, true), Transition::Hold);
    }

    #[test]
    fn reports_per_transition() {
        assert_eq!(
            Transition::Press.report(VOLUME_DOWN_KEY),
            Some(encode_key_down(VOLUME_DOWN_KEY))
        );
        assert_eq!(Transition::Release.report(VOLUME_DOWN_KEY), Some(encode_key_up()));
        assert_eq!(Transition::Rest.report(VOLUME_DOWN_KEY), Some(encode_key_up()));
        assert_eq!(Transition::Hold.report(VOLUME_DOWN_KEY), None);
        assert_eq!(Transition::Timeout.report(VOLUME_DOWN_KEY), None);
        assert_eq!(Transition::Halted.report(VOLUME_DOWN_KEY), None);
    }
}
