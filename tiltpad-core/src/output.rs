//! Report publisher trait and error types.

use crate::types::{Axes, Axis, Button};
use core::future::Future;
use portable_atomic::{AtomicBool, Ordering};

/// Error type for publisher operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/BLE I/O error.
    Io,
    /// No host connected.
    NotConnected,
    /// Report dropped (e.g., host not polling fast enough).
    Dropped,
}

/// Async trait for the HID gamepad peripheral.
///
/// The controller only issues commands and never reads state back.
/// Implementations own the report state and transmit a report on their own
/// whenever it changes while a host is connected.
pub trait GamepadPublisher {
    /// Check if a host is connected.
    fn is_connected(&self) -> bool;

    /// Mark `button` as pressed.
    fn press(&mut self, button: Button) -> impl Future<Output = Result<(), OutputError>>;

    /// Mark `button` as released.
    fn release(&mut self, button: Button) -> impl Future<Output = Result<(), OutputError>>;

    /// Set the X/Y/Z axes at once.
    fn set_axes(&mut self, axes: Axes) -> impl Future<Output = Result<(), OutputError>>;

    /// Set a single axis.
    fn set_axis(&mut self, axis: Axis, value: i32)
        -> impl Future<Output = Result<(), OutputError>>;
}

/// Host connection state, written by the transport's event handler and read
/// by its publisher.
///
/// A host counts as connected once it has configured the device and as long
/// as the bus is not suspended. A bus reset drops the configuration and ends
/// any suspend, so a host that resumes by resetting the bus is seen again as
/// soon as it reconfigures the device.
#[derive(Debug)]
pub struct HostConnection {
    configured: AtomicBool,
    suspended: AtomicBool,
}

impl HostConnection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            configured: AtomicBool::new(false),
            suspended: AtomicBool::new(false),
        }
    }

    /// A host has configured the device and it is not suspended.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.configured.load(Ordering::Relaxed) && !self.suspended.load(Ordering::Relaxed)
    }

    /// Bus reset.
    pub fn reset(&self) {
        self.configured.store(false, Ordering::Relaxed);
        self.suspended.store(false, Ordering::Relaxed);
    }

    pub fn set_configured(&self, configured: bool) {
        self.configured.store(configured, Ordering::Relaxed);
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.suspended.store(suspended, Ordering::Relaxed);
    }
}

impl Default for HostConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_only_when_configured() {
        let connection = HostConnection::new();
        assert!(!connection.is_connected());

        connection.set_configured(true);
        assert!(connection.is_connected());

        connection.set_configured(false);
        assert!(!connection.is_connected());
    }

    #[test]
    fn test_suspend_and_resume() {
        let connection = HostConnection::new();
        connection.set_configured(true);

        connection.set_suspended(true);
        assert!(!connection.is_connected());

        connection.set_suspended(false);
        assert!(connection.is_connected());
    }

    #[test]
    fn test_reset_while_suspended_reconnects_after_configure() {
        let connection = HostConnection::new();
        connection.set_configured(true);
        connection.set_suspended(true);

        // Host wakes the bus with a reset, then enumerates again
        connection.reset();
        assert!(!connection.is_connected());
        connection.set_configured(true);

        assert!(connection.is_connected());
    }
}
