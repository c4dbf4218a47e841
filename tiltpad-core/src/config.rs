//! Pad configuration.
//!
//! Customize at compile time by creating your own `const` from one of the
//! presets below. Pin assignment is supplied separately at startup through
//! [`PinConfig`], because pins are owned peripherals on the target.

use crate::mapping::{
    AnalogChannel, AxisRange, MotionMapping, ADC_RANGE, AXIS_RANGE, BASIC_AXIS_RANGE,
    DEFAULT_MOTION_MAPPING,
};
use crate::types::{Axis, BUTTON_COUNT};

/// Identity advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub name: &'static str,
    pub manufacturer: &'static str,
    /// Battery level in percent. Only reported by transports that carry it.
    pub battery_level: u8,
}

/// Default device identity.
pub const DEFAULT_DEVICE: DeviceInfo = DeviceInfo {
    name: "Gigachad Toaster",
    manufacturer: "Wir",
    battery_level: 69,
};

/// Pad behaviour configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadConfig {
    /// Potentiometer mapping.
    pub analog: AnalogChannel,
    /// Axis the potentiometer drives.
    pub analog_axis: Axis,
    /// Accelerometer mapping (ignored without a motion sensor).
    pub motion: MotionMapping,
    /// Logical range of every reported axis.
    pub axis_range: AxisRange,
    /// Pause after each tick. `None` only yields to the executor.
    pub tick_delay_ms: Option<u32>,
    pub device: DeviceInfo,
}

/// Motion build: accelerometer on X/Y/Z, potentiometer on the slider, all 0-2000.
pub const MOTION_CONFIG: PadConfig = PadConfig {
    analog: AnalogChannel::new(ADC_RANGE, AXIS_RANGE),
    analog_axis: Axis::Slider,
    motion: DEFAULT_MOTION_MAPPING,
    axis_range: AXIS_RANGE,
    tick_delay_ms: None,
    device: DEFAULT_DEVICE,
};

/// Basic build: potentiometer on X at 0-1023, 10 ms between ticks.
pub const BASIC_CONFIG: PadConfig = PadConfig {
    analog: AnalogChannel::new(ADC_RANGE, BASIC_AXIS_RANGE),
    analog_axis: Axis::X,
    motion: DEFAULT_MOTION_MAPPING,
    axis_range: BASIC_AXIS_RANGE,
    tick_delay_ms: Some(10),
    device: DEFAULT_DEVICE,
};

/// Pin assignment supplied at startup.
///
/// `B` and `A` are whatever the target uses to name pins: owned peripherals
/// on hardware, plain numbers in tests.
#[derive(Debug)]
pub struct PinConfig<B, A> {
    /// Button pins, in [`Button`](crate::Button) order.
    pub button_pins: [B; BUTTON_COUNT],
    /// Potentiometer pin.
    pub analog_pin: A,
}
