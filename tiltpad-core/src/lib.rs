//! Platform-agnostic input polling for the tiltpad gamepad.
//!
//! This crate holds everything about the pad that does not depend on a
//! particular chip: button edge detection, analog range mapping, the MPU6050
//! driver, the polling loop and the HID report layout. It runs in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`types`]: Core data structures ([`Button`], [`Edge`], [`Axes`], [`GamepadState`])
//! - [`edge`]: Per-line edge detection ([`InputLine`], [`ButtonBank`])
//! - [`mapping`]: Affine rescaling ([`map_range`], [`AnalogChannel`], [`MotionMapping`])
//! - [`config`]: Presets and pin assignment ([`PadConfig`], [`PinConfig`])
//! - [`input`]: Input source traits ([`AnalogSource`], [`MotionSensor`])
//! - [`output`]: Publisher trait ([`GamepadPublisher`])
//! - [`mpu6050`]: Accelerometer/gyroscope driver ([`Mpu6050`])
//! - [`controller`]: The polling loop ([`GamepadController`], [`halt`])
//! - [`report`]: HID report encoding ([`GamepadReport`], [`report_descriptor`])
//!
//! # Example
//!
//! ```rust
//! use tiltpad_core::{map_range, AxisRange, Edge, InputLine};
//!
//! let mut line = InputLine::new();
//! assert_eq!(line.update(true), Some(Edge::Pressed));
//! assert_eq!(line.update(true), None);
//! assert_eq!(line.update(false), Some(Edge::Released));
//!
//! let adc = AxisRange::new(0, 4095);
//! let axis = AxisRange::new(0, 2000);
//! assert_eq!(map_range(4095, adc, axis), 2000);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and log output (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod controller;
pub mod edge;
pub mod input;
pub mod mapping;
pub mod mpu6050;
pub mod output;
pub mod report;
pub mod types;

#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use config::{DeviceInfo, PadConfig, PinConfig, BASIC_CONFIG, DEFAULT_DEVICE, MOTION_CONFIG};
pub use controller::{halt, ControllerError, GamepadController, InitError, TickOutcome};
pub use edge::{ButtonBank, InputLine, LineState};
pub use input::{AnalogSource, InputError, MotionSensor, NoMotion, SensorError};
pub use mapping::{map_range, AnalogChannel, AxisRange, MotionMapping};
pub use mpu6050::Mpu6050;
pub use output::{GamepadPublisher, HostConnection, OutputError};
pub use report::{report_descriptor, GamepadReport, REPORT_DESCRIPTOR_LEN};
pub use types::{
    Axes, Axis, Button, Edge, GamepadCommand, GamepadState, MotionSample, BUTTON_COUNT,
};
