//! USB HID gamepad publisher.
//!
//! Stands in for the BLE HID peripheral: it owns the report state, tracks
//! whether a host has configured the device, and sends a report every time
//! the state changes while connected.

use defmt::{info, trace, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Handler};
use tiltpad_core::{
    report_descriptor, Axes, Axis, AxisRange, Button, GamepadCommand, GamepadPublisher,
    GamepadReport, GamepadState, HostConnection, OutputError, REPORT_DESCRIPTOR_LEN,
};

use crate::PAD_CONFIG;

/// Size of one HID input report.
pub const REPORT_SIZE: usize = GamepadReport::SIZE;

/// HID report descriptor for the selected build's axis range.
pub static REPORT_DESCRIPTOR: [u8; REPORT_DESCRIPTOR_LEN] =
    report_descriptor(PAD_CONFIG.axis_range);

type UsbDriver<'d> = Driver<'d, USB>;

/// USB device event handler feeding a [`HostConnection`].
pub struct ConnectionHandler {
    connection: &'static HostConnection,
}

impl ConnectionHandler {
    #[must_use]
    pub const fn new(connection: &'static HostConnection) -> Self {
        Self { connection }
    }
}

impl Handler for ConnectionHandler {
    fn reset(&mut self) {
        // embassy-usb ends suspend on reset without calling `suspended(false)`
        self.connection.reset();
    }

    fn configured(&mut self, configured: bool) {
        self.connection.set_configured(configured);
        if configured {
            info!("USB host connected");
        } else {
            info!("USB host disconnected");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        self.connection.set_suspended(suspended);
    }
}

/// USB HID gamepad publisher.
///
/// Wraps an embassy-usb HID writer and the publisher-side [`GamepadState`].
pub struct UsbHidPublisher<'d> {
    writer: HidWriter<'d, UsbDriver<'d>, REPORT_SIZE>,
    connection: &'d HostConnection,
    state: GamepadState,
    axis_range: AxisRange,
    /// State changed since the last report that reached the host.
    dirty: bool,
}

impl<'d> UsbHidPublisher<'d> {
    /// Create a publisher from the given HID writer.
    pub fn new(
        writer: HidWriter<'d, UsbDriver<'d>, REPORT_SIZE>,
        connection: &'d HostConnection,
        axis_range: AxisRange,
    ) -> Self {
        Self {
            writer,
            connection,
            state: GamepadState::neutral(),
            axis_range,
            dirty: false,
        }
    }

    /// Apply a command and, if anything is pending, send a report.
    async fn apply(&mut self, command: GamepadCommand) -> Result<(), OutputError> {
        self.dirty |= self.state.apply(command);
        if !self.dirty || !self.connection.is_connected() {
            return Ok(());
        }

        let report = GamepadReport::encode(&self.state, self.axis_range);
        trace!("Sending report: {:?}", report);
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(|e| match e {
                EndpointError::Disabled => OutputError::NotConnected,
                _ => {
                    warn!("HID report larger than endpoint buffer");
                    OutputError::Dropped
                }
            })?;
        self.dirty = false;
        Ok(())
    }
}

impl GamepadPublisher for UsbHidPublisher<'_> {
    fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    async fn press(&mut self, button: Button) -> Result<(), OutputError> {
        self.apply(GamepadCommand::Press(button)).await
    }

    async fn release(&mut self, button: Button) -> Result<(), OutputError> {
        self.apply(GamepadCommand::Release(button)).await
    }

    async fn set_axes(&mut self, axes: Axes) -> Result<(), OutputError> {
        self.apply(GamepadCommand::SetAxes(axes)).await
    }

    async fn set_axis(&mut self, axis: Axis, value: i32) -> Result<(), OutputError> {
        self.apply(GamepadCommand::SetAxis(axis, value)).await
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, UsbDriver<'d>, REPORT_SIZE> {
    let config = HidConfig {
        report_descriptor: &REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 16,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
