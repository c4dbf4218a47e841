//! GamepadController: polls the pad's inputs and drives a publisher.

use crate::config::{PadConfig, PinConfig};
use crate::edge::ButtonBank;
use crate::input::{AnalogSource, InputError, MotionSensor, SensorError};
use crate::output::{GamepadPublisher, OutputError};
use crate::types::{Button, Edge};
use embassy_futures::yield_now;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

/// Sleep between wake-ups of the fatal [`halt`] loop.
pub const HALT_POLL_MS: u32 = 10;

/// Result of a single [`GamepadController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// No host connected; nothing was sampled.
    Idle,
    /// Inputs were sampled and forwarded.
    Reported {
        /// Number of button edges published this tick.
        edges: usize,
    },
}

/// Error type for controller start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The motion sensor failed to come up.
    Sensor(SensorError),
}

/// Error type for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Error from a button pin or the ADC.
    Input(InputError),
    /// Error from the motion sensor.
    Sensor(SensorError),
    /// Error from the publisher.
    Output(OutputError),
}

impl From<InputError> for ControllerError {
    fn from(err: InputError) -> Self {
        ControllerError::Input(err)
    }
}

impl From<SensorError> for ControllerError {
    fn from(err: SensorError) -> Self {
        ControllerError::Sensor(err)
    }
}

impl From<OutputError> for ControllerError {
    fn from(err: OutputError) -> Self {
        ControllerError::Output(err)
    }
}

/// Owns the pad's inputs and the publisher, and forwards one snapshot per tick.
///
/// Each tick runs motion sensor -> potentiometer -> buttons, in that order,
/// and only while the publisher reports a connected host. Changes that happen
/// while disconnected are not seen: the edge detectors simply do not run.
pub struct GamepadController<P, A, M, O> {
    buttons: ButtonBank<P>,
    analog: A,
    motion: Option<M>,
    publisher: O,
    config: PadConfig,
}

impl<P, A, M, O> GamepadController<P, A, M, O>
where
    P: InputPin,
    A: AnalogSource,
    M: MotionSensor,
    O: GamepadPublisher,
{
    /// Bring up the motion sensor (if any) and take ownership of the inputs.
    ///
    /// On failure every part is dropped, so nothing can be sampled afterwards.
    /// Callers are expected to [`halt`].
    pub async fn init(
        pins: PinConfig<P, A>,
        mut motion: Option<M>,
        publisher: O,
        config: PadConfig,
    ) -> Result<Self, InitError> {
        if let Some(sensor) = motion.as_mut() {
            sensor.init().await.map_err(InitError::Sensor)?;
            #[cfg(feature = "defmt")]
            defmt::info!("Motion sensor found");
        }

        Ok(Self {
            buttons: ButtonBank::new(pins.button_pins),
            analog: pins.analog_pin,
            motion,
            publisher,
            config,
        })
    }

    /// Poll every input once and forward the result.
    ///
    /// A failed press/release leaves that line's state untouched, so the same
    /// edge is published again on the next tick.
    pub async fn tick(&mut self) -> Result<TickOutcome, ControllerError> {
        if !self.publisher.is_connected() {
            return Ok(TickOutcome::Idle);
        }

        if let Some(sensor) = self.motion.as_mut() {
            let sample = sensor.read().await?;
            let axes = self.config.motion.map(&sample);
            self.publisher.set_axes(axes).await?;
        }

        let raw = self.analog.read().await?;
        let mapped = self.config.analog.map(raw);
        self.publisher
            .set_axis(self.config.analog_axis, mapped)
            .await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("raw value: {} mapped value: {}", raw, mapped);

        let pressed = self.buttons.sample()?;
        let mut edges = 0;
        for (button, sample) in Button::ALL.into_iter().zip(pressed) {
            let Some(edge) = self.buttons.line(button).detect(sample) else {
                continue;
            };
            match edge {
                Edge::Pressed => self.publisher.press(button).await?,
                Edge::Released => self.publisher.release(button).await?,
            }
            self.buttons.commit(button, edge);
            edges += 1;
        }

        Ok(TickOutcome::Reported { edges })
    }

    /// Tick forever.
    ///
    /// Errors are logged and the loop carries on. Between ticks the loop
    /// waits `config.tick_delay_ms`, or just yields to the executor when no
    /// delay is configured.
    pub async fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            if let Err(_e) = self.tick().await {
                #[cfg(feature = "defmt")]
                defmt::error!("Tick error: {:?}", _e);
            }

            match self.config.tick_delay_ms {
                Some(ms) => delay.delay_ms(ms).await,
                None => yield_now().await,
            }
        }
    }

    /// Get a reference to the publisher.
    pub fn publisher(&self) -> &O {
        &self.publisher
    }

    /// Get a mutable reference to the publisher.
    pub fn publisher_mut(&mut self) -> &mut O {
        &mut self.publisher
    }

    /// Get a reference to the button bank.
    pub fn buttons(&self) -> &ButtonBank<P> {
        &self.buttons
    }
}

/// Park the device after a fatal start-up failure.
///
/// Sleeps in short intervals forever; there is no retry.
pub async fn halt<D: DelayNs>(delay: &mut D) -> ! {
    loop {
        delay.delay_ms(HALT_POLL_MS).await;
    }
}
