//! tiltpad gamepad firmware for RP2040.
//!
//! This crate wires [`tiltpad_core`] to the RP2040's peripherals and exposes
//! the pad to the host as a USB HID gamepad.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Button 1 | 10   | Pull-up, active low (X, rotate left) |
//! | Button 2 | 11   | Pull-up, active low (B, rotate right) |
//! | Button 3 | 12   | Pull-up, active low (A, move down) |
//! | Button 4 | 13   | Pull-up, active low (Y, move up) |
//! | Poti     | 26   | ADC0, 12-bit |
//! | I2C0 SDA | 4    | MPU6050 (`motion` feature) |
//! | I2C0 SCL | 5    | MPU6050 (`motion` feature) |
//!
//! # Architecture
//!
//! Two Embassy tasks:
//!
//! - **USB Task**: Runs the USB device stack and tracks host connection
//! - **Main**: Brings up the motion sensor, then runs the
//!   [`GamepadController`](tiltpad_core::GamepadController) loop forever
//!
//! If the motion sensor does not answer at start-up the firmware parks in
//! [`halt`](tiltpad_core::halt) and never reports anything.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`motion`** (default): MPU6050 drives X/Y/Z, potentiometer drives the slider, axes 0-2000.
//!   Without it the potentiometer drives X at 0-1023 with a 10 ms tick delay.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export core types for convenience
pub use tiltpad_core::{
    halt, AnalogSource, Axes, Axis, Button, GamepadController, GamepadPublisher, GamepadReport,
    GamepadState, HostConnection, InputError, MotionSensor, Mpu6050, NoMotion, OutputError,
    PadConfig, PinConfig, SensorError,
};

pub mod analog;
pub mod usb_output;

pub use analog::AdcInput;
pub use usb_output::{configure_usb_hid, ConnectionHandler, UsbHidPublisher};

/// Configuration selected by the `motion` feature.
#[cfg(feature = "motion")]
pub const PAD_CONFIG: PadConfig = tiltpad_core::MOTION_CONFIG;

/// Configuration selected by the `motion` feature.
#[cfg(not(feature = "motion"))]
pub const PAD_CONFIG: PadConfig = tiltpad_core::BASIC_CONFIG;
