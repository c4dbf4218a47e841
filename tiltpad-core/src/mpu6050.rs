//! MPU6050 accelerometer/gyroscope driver.
//!
//! Minimal async driver over [`embedded_hal_async::i2c::I2c`]: identity check,
//! reset, range/filter configuration and a burst read of all motion registers.
//! Values are returned in SI units (m/s², rad/s, °C).

use crate::input::{MotionSensor, SensorError};
use crate::types::MotionSample;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Default I2C address (AD0 low).
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Expected `WHO_AM_I` value.
pub const DEVICE_ID: u8 = 0x68;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.806_65;

const DEG_TO_RAD: f32 = 0.017_453_293;

mod reg {
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

const PWR_DEVICE_RESET: u8 = 0x80;
const PWR_CLOCK_PLL_XGYRO: u8 = 0x01;
const SIGNAL_PATH_RESET_ALL: u8 = 0x07;
const RESET_SETTLE_MS: u32 = 100;

/// Accelerometer full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => AccelRange::G2,
            1 => AccelRange::G4,
            2 => AccelRange::G8,
            _ => AccelRange::G16,
        }
    }

    /// Sensitivity in LSB per g.
    #[must_use]
    pub const fn lsb_per_g(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AccelRange::G2 => "+-2G",
            AccelRange::G4 => "+-4G",
            AccelRange::G8 => "+-8G",
            AccelRange::G16 => "+-16G",
        }
    }
}

/// Gyroscope full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    Deg250,
    Deg500,
    Deg1000,
    Deg2000,
}

impl GyroRange {
    const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => GyroRange::Deg250,
            1 => GyroRange::Deg500,
            2 => GyroRange::Deg1000,
            _ => GyroRange::Deg2000,
        }
    }

    /// Sensitivity in LSB per °/s.
    #[must_use]
    pub const fn lsb_per_dps(self) -> f32 {
        match self {
            GyroRange::Deg250 => 131.0,
            GyroRange::Deg500 => 65.5,
            GyroRange::Deg1000 => 32.8,
            GyroRange::Deg2000 => 16.4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            GyroRange::Deg250 => "+- 250 deg/s",
            GyroRange::Deg500 => "+- 500 deg/s",
            GyroRange::Deg1000 => "+- 1000 deg/s",
            GyroRange::Deg2000 => "+- 2000 deg/s",
        }
    }
}

/// Digital low-pass filter bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterBandwidth {
    Hz260,
    Hz184,
    Hz94,
    Hz44,
    Hz21,
    Hz10,
    Hz5,
}

impl FilterBandwidth {
    const fn bits(self) -> u8 {
        self as u8
    }

    /// `None` for the reserved encoding 7.
    const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b111 {
            0 => Some(FilterBandwidth::Hz260),
            1 => Some(FilterBandwidth::Hz184),
            2 => Some(FilterBandwidth::Hz94),
            3 => Some(FilterBandwidth::Hz44),
            4 => Some(FilterBandwidth::Hz21),
            5 => Some(FilterBandwidth::Hz10),
            6 => Some(FilterBandwidth::Hz5),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FilterBandwidth::Hz260 => "260 Hz",
            FilterBandwidth::Hz184 => "184 Hz",
            FilterBandwidth::Hz94 => "94 Hz",
            FilterBandwidth::Hz44 => "44 Hz",
            FilterBandwidth::Hz21 => "21 Hz",
            FilterBandwidth::Hz10 => "10 Hz",
            FilterBandwidth::Hz5 => "5 Hz",
        }
    }
}

/// Settings applied by [`MotionSensor::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6050Config {
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    pub bandwidth: FilterBandwidth,
}

/// ±8 g, ±500 °/s, 5 Hz low-pass.
pub const DEFAULT_CONFIG: Mpu6050Config = Mpu6050Config {
    accel_range: AccelRange::G8,
    gyro_range: GyroRange::Deg500,
    bandwidth: FilterBandwidth::Hz5,
};

/// MPU6050 on an async I2C bus.
pub struct Mpu6050<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    config: Mpu6050Config,
    accel_range: AccelRange,
    gyro_range: GyroRange,
}

impl<I: I2c, D: DelayNs> Mpu6050<I, D> {
    /// Create a driver at the default address with [`DEFAULT_CONFIG`].
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_config(i2c, delay, DEFAULT_ADDRESS, DEFAULT_CONFIG)
    }

    /// Create a driver with a custom address and configuration.
    pub fn with_config(i2c: I, delay: D, address: u8, config: Mpu6050Config) -> Self {
        Self {
            i2c,
            delay,
            address,
            config,
            // Power-on defaults
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Deg250,
        }
    }

    /// Verify identity, reset the chip and select the gyro PLL clock.
    pub async fn begin(&mut self) -> Result<(), SensorError> {
        if self.read_register(reg::WHO_AM_I).await? != DEVICE_ID {
            return Err(SensorError::NotFound);
        }

        self.write_register(reg::PWR_MGMT_1, PWR_DEVICE_RESET).await?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;
        self.write_register(reg::SIGNAL_PATH_RESET, SIGNAL_PATH_RESET_ALL)
            .await?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;
        self.write_register(reg::PWR_MGMT_1, PWR_CLOCK_PLL_XGYRO)
            .await?;
        self.delay.delay_ms(RESET_SETTLE_MS).await;

        self.accel_range = AccelRange::G2;
        self.gyro_range = GyroRange::Deg250;
        Ok(())
    }

    pub async fn set_accelerometer_range(&mut self, range: AccelRange) -> Result<(), SensorError> {
        self.update_bits(reg::ACCEL_CONFIG, 0b1_1000, range.bits() << 3)
            .await?;
        self.accel_range = range;
        Ok(())
    }

    pub async fn accelerometer_range(&mut self) -> Result<AccelRange, SensorError> {
        let value = self.read_register(reg::ACCEL_CONFIG).await?;
        Ok(AccelRange::from_bits(value >> 3))
    }

    pub async fn set_gyro_range(&mut self, range: GyroRange) -> Result<(), SensorError> {
        self.update_bits(reg::GYRO_CONFIG, 0b1_1000, range.bits() << 3)
            .await?;
        self.gyro_range = range;
        Ok(())
    }

    pub async fn gyro_range(&mut self) -> Result<GyroRange, SensorError> {
        let value = self.read_register(reg::GYRO_CONFIG).await?;
        Ok(GyroRange::from_bits(value >> 3))
    }

    pub async fn set_filter_bandwidth(
        &mut self,
        bandwidth: FilterBandwidth,
    ) -> Result<(), SensorError> {
        self.update_bits(reg::CONFIG, 0b111, bandwidth.bits()).await
    }

    pub async fn filter_bandwidth(&mut self) -> Result<FilterBandwidth, SensorError> {
        let value = self.read_register(reg::CONFIG).await?;
        FilterBandwidth::from_bits(value).ok_or(SensorError::InvalidRegister)
    }

    /// Burst-read acceleration, temperature and rotation.
    pub async fn read_sample(&mut self) -> Result<MotionSample, SensorError> {
        let mut buf = [0u8; 14];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)
            .await
            .map_err(|_| SensorError::Bus)?;

        let word = |i: usize| f32::from(i16::from_be_bytes([buf[i], buf[i + 1]]));
        let accel_scale = STANDARD_GRAVITY / self.accel_range.lsb_per_g();
        let gyro_scale = DEG_TO_RAD / self.gyro_range.lsb_per_dps();

        Ok(MotionSample {
            acceleration: [
                word(0) * accel_scale,
                word(2) * accel_scale,
                word(4) * accel_scale,
            ],
            temperature: word(6) / 340.0 + 36.53,
            rotation: [
                word(8) * gyro_scale,
                word(10) * gyro_scale,
                word(12) * gyro_scale,
            ],
        })
    }

    /// Decompose the driver into its bus and delay.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|_| SensorError::Bus)
    }

    async fn update_bits(&mut self, register: u8, mask: u8, value: u8) -> Result<(), SensorError> {
        let current = self.read_register(register).await?;
        self.write_register(register, (current & !mask) | (value & mask))
            .await
    }
}

impl<I: I2c, D: DelayNs> MotionSensor for Mpu6050<I, D> {
    async fn init(&mut self) -> Result<(), SensorError> {
        self.begin().await?;

        self.set_accelerometer_range(self.config.accel_range).await?;
        let _accel = self.accelerometer_range().await?;
        #[cfg(feature = "defmt")]
        defmt::info!("Accelerometer range set to: {}", _accel.label());

        self.set_gyro_range(self.config.gyro_range).await?;
        let _gyro = self.gyro_range().await?;
        #[cfg(feature = "defmt")]
        defmt::info!("Gyro range set to: {}", _gyro.label());

        self.set_filter_bandwidth(self.config.bandwidth).await?;
        let _bandwidth = self.filter_bandwidth().await?;
        #[cfg(feature = "defmt")]
        defmt::info!("Filter bandwidth set to: {}", _bandwidth.label());

        self.delay.delay_ms(RESET_SETTLE_MS).await;
        Ok(())
    }

    async fn read(&mut self) -> Result<MotionSample, SensorError> {
        self.read_sample().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    /// Register-file I2C mock of a single device.
    pub(crate) struct MockBus {
        pub regs: [u8; 128],
        pub writes: Vec<(u8, u8)>,
        pub fail: bool,
        pointer: usize,
    }

    impl MockBus {
        pub(crate) fn new() -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = DEVICE_ID;
            Self {
                regs,
                writes: Vec::new(),
                fail: false,
                pointer: 0,
            }
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail || address != DEFAULT_ADDRESS {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.pointer = bytes[0] as usize;
                        for &b in &bytes[1..] {
                            self.writes.push((self.pointer as u8, b));
                            self.regs[self.pointer] = b;
                            self.pointer += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    /// Delay that returns immediately and accumulates the requested time.
    #[derive(Default)]
    pub(crate) struct MockDelay {
        pub total_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_init_rejects_wrong_identity() {
        let mut bus = MockBus::new();
        bus.regs[reg::WHO_AM_I as usize] = 0x70;
        let mut mpu = Mpu6050::new(bus, MockDelay::default());

        assert_eq!(block_on(mpu.init()), Err(SensorError::NotFound));
        let (bus, _) = mpu.release();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_init_reports_bus_failure() {
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut mpu = Mpu6050::new(bus, MockDelay::default());
        assert_eq!(block_on(mpu.init()), Err(SensorError::Bus));
    }

    #[test]
    fn test_init_applies_default_config() {
        let mut mpu = Mpu6050::new(MockBus::new(), MockDelay::default());
        assert_eq!(block_on(mpu.init()), Ok(()));

        assert_eq!(block_on(mpu.accelerometer_range()), Ok(AccelRange::G8));
        assert_eq!(block_on(mpu.gyro_range()), Ok(GyroRange::Deg500));
        assert_eq!(block_on(mpu.filter_bandwidth()), Ok(FilterBandwidth::Hz5));

        let (bus, delay) = mpu.release();
        assert_eq!(bus.writes[0], (reg::PWR_MGMT_1, PWR_DEVICE_RESET));
        assert_eq!(bus.writes[1], (reg::SIGNAL_PATH_RESET, SIGNAL_PATH_RESET_ALL));
        assert_eq!(bus.writes[2], (reg::PWR_MGMT_1, PWR_CLOCK_PLL_XGYRO));
        assert_eq!(bus.regs[reg::ACCEL_CONFIG as usize], 0x10);
        assert_eq!(bus.regs[reg::GYRO_CONFIG as usize], 0x08);
        assert_eq!(bus.regs[reg::CONFIG as usize], 0x06);
        assert_eq!(delay.total_ns, 4 * u64::from(RESET_SETTLE_MS) * 1_000_000);
    }

    #[test]
    fn test_update_bits_preserves_other_bits() {
        let mut bus = MockBus::new();
        bus.regs[reg::CONFIG as usize] = 0b0011_1000;
        let mut mpu = Mpu6050::new(bus, MockDelay::default());
        block_on(mpu.set_filter_bandwidth(FilterBandwidth::Hz44)).unwrap();
        let (bus, _) = mpu.release();
        assert_eq!(bus.regs[reg::CONFIG as usize], 0b0011_1011);
    }

    #[test]
    fn test_reserved_bandwidth_is_rejected() {
        let mut bus = MockBus::new();
        bus.regs[reg::CONFIG as usize] = 0x07;
        let mut mpu = Mpu6050::new(bus, MockDelay::default());
        assert_eq!(
            block_on(mpu.filter_bandwidth()),
            Err(SensorError::InvalidRegister)
        );
    }

    #[test]
    fn test_read_converts_to_si_units() {
        let mut mpu = Mpu6050::new(MockBus::new(), MockDelay::default());
        block_on(mpu.init()).unwrap();
        let (mut bus, delay) = mpu.release();

        let base = reg::ACCEL_XOUT_H as usize;
        // ax = +1 g, ay = -0.5 g, az = +2 g at ±8 g (4096 LSB/g)
        bus.regs[base..base + 6].copy_from_slice(&[0x10, 0x00, 0xF8, 0x00, 0x20, 0x00]);
        // temperature raw 0
        bus.regs[base + 6..base + 8].copy_from_slice(&[0x00, 0x00]);
        // gx = 65.5 LSB = 1 °/s at ±500 °/s
        bus.regs[base + 8..base + 14].copy_from_slice(&[0x00, 0x41, 0x00, 0x00, 0x00, 0x00]);

        let mut mpu = Mpu6050::new(bus, delay);
        mpu.accel_range = AccelRange::G8;
        mpu.gyro_range = GyroRange::Deg500;
        let sample = block_on(mpu.read()).unwrap();

        let close = |a: f32, b: f32| (a - b) < 1e-3 && (b - a) < 1e-3;
        assert!(close(sample.acceleration[0], STANDARD_GRAVITY));
        assert!(close(sample.acceleration[1], -0.5 * STANDARD_GRAVITY));
        assert!(close(sample.acceleration[2], 2.0 * STANDARD_GRAVITY));
        assert!(close(sample.temperature, 36.53));
        // 65 / 65.5 °/s
        assert!(close(sample.rotation[0], 65.0 / 65.5 * DEG_TO_RAD));
        assert!(close(sample.rotation[1], 0.0));
    }
}
