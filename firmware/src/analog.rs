//! ADC-backed potentiometer input.

use defmt::warn;
use embassy_rp::adc::{Adc, Async, Channel, Error as AdcError};
use tiltpad_core::{AnalogSource, InputError};

/// One ADC channel on the RP2040's 12-bit converter (0-4095).
pub struct AdcInput<'d> {
    adc: Adc<'d, Async>,
    channel: Channel<'d>,
}

impl<'d> AdcInput<'d> {
    /// Create an analog source from the ADC and a channel on it.
    #[must_use]
    pub fn new(adc: Adc<'d, Async>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogSource for AdcInput<'_> {
    async fn read(&mut self) -> Result<u16, InputError> {
        self.adc
            .read(&mut self.channel)
            .await
            .map_err(|_: AdcError| {
                warn!("ADC conversion failed");
                InputError::ConversionFailed
            })
    }
}
