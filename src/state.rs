//! State shared between the BLE callbacks and the button polling loop.
//!
//! Each field has a single writer: the GATT write handler owns the
//! subscription flag and the control-point byte, the connection task
//! owns the active connection slot. The polling loop only reads.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Client Characteristic Configuration value enabling notifications.
pub const CCC_NOTIFY: u16 = 0x0001;

/// Little-endian CCC value from a descriptor write. Missing bytes read as
/// zero, extra bytes are ignored.
pub fn ccc_value(data: &[u8]) -> u16 {
    match data {
        [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        [lo] => u16::from(*lo),
        [] => 0,
    }
}

/// Whether the connected peer enabled notifications on the input report.
pub struct NotificationSubscription {
    enabled: AtomicBool,
}

impl NotificationSubscription {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Raw CCC descriptor write as received from the stack.
    pub fn on_ccc_bytes(&self, data: &[u8]) {
        self.on_ccc_write(ccc_value(data));
    }

    /// CCC descriptor write. Any value other than "notify" disables.
    pub fn on_ccc_write(&self, value: u16) {
        let enabled = value == CCC_NOTIFY;
        debug!("Input report notifications {}", enabled);
        self.set(enabled);
    }
}

impl Default for NotificationSubscription {
    fn default() -> Self {
        Self::new()
    }
}

/// Last byte written to the HID Control Point (suspend / exit suspend).
/// Stored only; the device has no suspend behavior.
pub struct ControlPoint {
    value: AtomicU8,
}

impl ControlPoint {
    /// Size of the characteristic value.
    pub const SIZE: usize = 1;

    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(0),
        }
    }

    pub fn store(&self, value: u8) {
        self.value.store(value, Ordering::Relaxed);
    }

    pub fn load(&self) -> u8 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// The link reports are sent on, if any.
pub struct ActiveConnection<C> {
    slot: Mutex<CriticalSectionRawMutex, RefCell<Option<C>>>,
}

impl<C: Clone> ActiveConnection<C> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    pub fn attach(&self, conn: C) {
        self.slot.lock(|slot| *slot.borrow_mut() = Some(conn));
    }

    pub fn detach(&self) -> Option<C> {
        self.slot.lock(|slot| slot.borrow_mut().take())
    }

    pub fn current(&self) -> Option<C> {
        self.slot.lock(|slot| slot.borrow().clone())
    }

    pub fn is_connected(&self) -> bool {
        self.slot.lock(|slot| slot.borrow().is_some())
    }
}

impl<C: Clone> Default for ActiveConnection<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the BLE side and the polling loop share, created once at boot.
pub struct SharedState<C> {
    pub subscription: NotificationSubscription,
    pub control_point: ControlPoint,
    pub connection: ActiveConnection<C>,
}

impl<C: Clone> SharedState<C> {
    pub const fn new() -> Self {
        Self {
            subscription: NotificationSubscription::new(),
            control_point: ControlPoint::new(),
            connection: ActiveConnection::new(),
        }
    }

    /// New link: track it, then ask the peer to encrypt it.
    ///
    /// The link stays tracked when the request fails; the error is handed
    /// back for logging.
    pub fn on_connect<E>(
        &self,
        conn: C,
        request_security: impl FnOnce(&C) -> Result<(), E>,
    ) -> Result<(), E> {
        self.connection.attach(conn.clone());
        request_security(&conn)
    }

    /// Link dropped: forget it and start the next one unsubscribed.
    pub fn on_disconnect(&self) {
        self.connection.detach();
        self.subscription.set(false);
    }
}

impl<C: Clone> Default for SharedState<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_starts_disabled() {
        let sub = NotificationSubscription::new();
        assert!(!sub.get());
    }

    #[test]
    fn subscription_get_returns_last_set() {
        let sub = NotificationSubscription::new();
        sub.set(true);
        assert!(sub.get());
        sub.set(false);
        assert!(!sub.get());
        sub.set(false);
        assert!(!sub.get());
    }

    #[test]
    fn ccc_write_enables_only_on_notify() {
        let sub = NotificationSubscription::new();
        sub.on_ccc_write(CCC_NOTIFY);
        assert!(sub.get());

        // Indicate is not a notification subscription.
        sub.on_ccc_write(0x0002);
        assert!(!sub.get());

        sub.on_ccc_write(CCC_NOTIFY);
        sub.on_ccc_write(0x0000);
        assert!(!sub.get());
    }

    #[test]
    fn ccc_value_decodes_short_writes() {
        assert_eq!(ccc_value(&[]), 0);
        assert_eq!(ccc_value(&[0x01]), CCC_NOTIFY);
        assert_eq!(ccc_value(&[0x01, 0x00]), CCC_NOTIFY);
        assert_eq!(ccc_value(&[0x00, 0x01]), 0x0100);
        assert_eq!(ccc_value(&[0x02, 0x00, 0xFF]), 0x0002);
    }

    #[test]
    fn ccc_bytes_drive_subscription() {
        let sub = NotificationSubscription::new();
        sub.on_ccc_bytes(&[0x01, 0x00]);
        assert!(sub.get());
        sub.on_ccc_bytes(&[]);
        assert!(!sub.get());
        sub.on_ccc_bytes(&[0x01]);
        assert!(sub.get());
        // High byte set: not a plain notify value.
        sub.on_ccc_bytes(&[0x01, 0x01]);
        assert!(!sub.get());
    }

    #[test]
    fn control_point_keeps_last_value() {
        let cp = ControlPoint::new();
        assert_eq!(cp.load(), 0);
        cp.store(1);
        assert_eq!(cp.load(), 1);
    }

    #[test]
    fn connection_attach_detach() {
        let conn: ActiveConnection<u16> = ActiveConnection::new();
        assert!(!conn.is_connected());
        assert_eq!(conn.current(), None);

        conn.attach(7);
        assert!(conn.is_connected());
        assert_eq!(conn.current(), Some(7));

        assert_eq!(conn.detach(), Some(7));
        assert_eq!(conn.current(), None);
    }

    #[test]
    fn connect_tracks_link_before_requesting_security() {
        let state: SharedState<u16> = SharedState::new();
        let mut requested = None;

        let res = state.on_connect(3, |conn| {
            requested = Some((*conn, state.connection.current()));
            Ok::<(), ()>(())
        });

        assert_eq!(res, Ok(()));
        assert_eq!(requested, Some((3, Some(3))));
    }

    #[test]
    fn failed_security_request_keeps_link() {
        let state: SharedState<u16> = SharedState::new();

        let res = state.on_connect(4, |_| Err("busy"));

        assert_eq!(res, Err("busy"));
        assert_eq!(state.connection.current(), Some(4));
    }

    #[test]
    fn disconnect_resets_subscription() {
        let state: SharedState<u16> = SharedState::new();
        state.connection.attach(1);
        state.subscription.on_ccc_write(CCC_NOTIFY);

        state.on_disconnect();

        assert!(!state.subscription.get());
        assert!(!state.connection.is_connected());
    }
}
