//! Input source traits and error types.

use crate::types::MotionSample;
use core::future::Future;

/// Error type for pin and ADC sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// GPIO/ADC I/O error.
    Io,
    /// Conversion did not complete.
    ConversionFailed,
}

/// Error type for motion sensor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed (NACK, arbitration loss, ...).
    Bus,
    /// The chip did not answer with the expected identity.
    NotFound,
    /// A register read back a value outside its documented encoding.
    InvalidRegister,
}

/// Async trait for a single analog channel.
///
/// Implementations return the raw converter value; rescaling happens in
/// [`AnalogChannel::map`](crate::AnalogChannel::map).
pub trait AnalogSource {
    /// Take one sample.
    fn read(&mut self) -> impl Future<Output = Result<u16, InputError>>;
}

/// Async trait for accelerometer/gyroscope sensors.
pub trait MotionSensor {
    /// Bring the sensor up and apply its configuration.
    ///
    /// Failure is fatal for the pad; see [`halt`](crate::halt).
    fn init(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the current motion state.
    fn read(&mut self) -> impl Future<Output = Result<MotionSample, SensorError>>;
}

/// Placeholder sensor for builds without a motion sensor.
///
/// Never constructed; it only names the type parameter of
/// [`GamepadController`](crate::GamepadController) when the motion slot is `None`.
pub enum NoMotion {}

impl MotionSensor for NoMotion {
    async fn init(&mut self) -> Result<(), SensorError> {
        match *self {}
    }

    async fn read(&mut self) -> Result<MotionSample, SensorError> {
        match *self {}
    }
}
