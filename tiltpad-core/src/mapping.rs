//! Linear rescaling of raw samples into the gamepad's axis domain.
//!
//! The ADC delivers 12-bit samples (0-4095) and the motion sensor delivers
//! accelerations in m/s². Both are mapped into the configured axis range with
//! the same affine formula, using truncating integer division and no clamping.

use crate::types::{Axes, MotionSample};

/// Inclusive integer interval used as a mapping source or target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    #[inline]
    #[must_use]
    pub const fn span(self) -> i64 {
        self.max as i64 - self.min as i64
    }

    /// Whether `value` lies inside the interval (either orientation).
    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }

    /// Clamp `value` into the interval.
    ///
    /// Only report encoding clamps; [`map_range`] deliberately does not.
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        let (lo, hi) = self.bounds();
        value.clamp(lo, hi)
    }

    /// `(lower, upper)` regardless of orientation.
    #[must_use]
    pub const fn bounds(self) -> (i32, i32) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

/// 12-bit ADC sample domain.
pub const ADC_RANGE: AxisRange = AxisRange::new(0, 4095);

/// Default gamepad axis domain.
pub const AXIS_RANGE: AxisRange = AxisRange::new(0, 2000);

/// Reduced axis domain used by the basic (no motion sensor) build.
pub const BASIC_AXIS_RANGE: AxisRange = AxisRange::new(0, 1023);

/// Accelerometer domain in whole m/s².
pub const ACCEL_RANGE: AxisRange = AxisRange::new(-8, 8);

/// Gravity compensation subtracted from the vertical axis, in m/s².
pub const GRAVITY_OFFSET: f32 = 9.6;

/// Map `value` from `source` into `target`.
///
/// `target.min + (value - source.min) * (target.max - target.min) / (source.max - source.min)`
///
/// Division truncates toward zero. Values outside `source` extrapolate
/// outside `target`. A zero-width source maps everything to `target.min`.
#[must_use]
pub fn map_range(value: i32, source: AxisRange, target: AxisRange) -> i32 {
    let span = source.span();
    if span == 0 {
        return target.min;
    }
    let offset = (value as i64 - source.min as i64) * target.span() / span;
    (target.min as i64 + offset) as i32
}

/// An analog input and the axis domain it is reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogChannel {
    pub source: AxisRange,
    pub target: AxisRange,
}

impl AnalogChannel {
    #[must_use]
    pub const fn new(source: AxisRange, target: AxisRange) -> Self {
        Self { source, target }
    }

    /// Map a raw sample into the target domain.
    #[inline]
    #[must_use]
    pub fn map(&self, raw: u16) -> i32 {
        map_range(i32::from(raw), self.source, self.target)
    }
}

/// Accelerometer-to-axes mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionMapping {
    pub source: AxisRange,
    pub target: AxisRange,
    /// Subtracted from the Z acceleration before mapping.
    pub gravity_offset: f32,
}

impl MotionMapping {
    /// Map a motion sample's acceleration to X/Y/Z axes.
    ///
    /// Each acceleration is truncated toward zero to whole m/s² first, so the
    /// axes move in steps of `target.span() / source.span()`.
    #[must_use]
    pub fn map(&self, sample: &MotionSample) -> Axes {
        let [x, y, z] = sample.acceleration;
        Axes {
            x: map_range(x as i32, self.source, self.target),
            y: map_range(y as i32, self.source, self.target),
            z: map_range((z - self.gravity_offset) as i32, self.source, self.target),
        }
    }
}

/// Default motion mapping: ±8 m/s² onto 0-2000, Z compensated for gravity.
pub const DEFAULT_MOTION_MAPPING: MotionMapping = MotionMapping {
    source: ACCEL_RANGE,
    target: AXIS_RANGE,
    gravity_offset: GRAVITY_OFFSET,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_endpoints() {
        assert_eq!(map_range(0, ADC_RANGE, AXIS_RANGE), 0);
        assert_eq!(map_range(4095, ADC_RANGE, AXIS_RANGE), 2000);
        assert_eq!(map_range(0, ADC_RANGE, BASIC_AXIS_RANGE), 0);
        assert_eq!(map_range(4095, ADC_RANGE, BASIC_AXIS_RANGE), 1023);
    }

    #[test]
    fn test_map_truncates() {
        // 2048 * 2000 / 4095 = 1000.24...
        assert_eq!(map_range(2048, ADC_RANGE, AXIS_RANGE), 1000);
        // 1 * 2000 / 4095 = 0.48...
        assert_eq!(map_range(1, ADC_RANGE, AXIS_RANGE), 0);
    }

    #[test]
    fn test_map_truncates_toward_zero_for_negative_offsets() {
        // (-1 - 0) * 2000 / 4095 = -0.48 -> 0, not -1
        assert_eq!(map_range(-1, ADC_RANGE, AXIS_RANGE), 0);
    }

    #[test]
    fn test_map_does_not_clamp() {
        assert_eq!(map_range(8190, ADC_RANGE, AXIS_RANGE), 4000);
        assert_eq!(map_range(-16, ACCEL_RANGE, AXIS_RANGE), -1000);
    }

    #[test]
    fn test_map_signed_source() {
        assert_eq!(map_range(-8, ACCEL_RANGE, AXIS_RANGE), 0);
        assert_eq!(map_range(0, ACCEL_RANGE, AXIS_RANGE), 1000);
        assert_eq!(map_range(8, ACCEL_RANGE, AXIS_RANGE), 2000);
        assert_eq!(map_range(1, ACCEL_RANGE, AXIS_RANGE), 1125);
    }

    #[test]
    fn test_map_inverted_target() {
        let inverted = AxisRange::new(2000, 0);
        assert_eq!(map_range(0, ADC_RANGE, inverted), 2000);
        assert_eq!(map_range(4095, ADC_RANGE, inverted), 0);
    }

    #[test]
    fn test_map_degenerate_source() {
        assert_eq!(map_range(42, AxisRange::new(5, 5), AXIS_RANGE), 0);
    }

    #[test]
    fn test_map_extreme_values_do_not_overflow() {
        let wide = AxisRange::new(i32::MIN, i32::MAX);
        assert_eq!(map_range(i32::MAX, wide, AXIS_RANGE), 2000);
        assert_eq!(map_range(4095, ADC_RANGE, wide), i32::MAX);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(AXIS_RANGE.clamp(-5), 0);
        assert_eq!(AXIS_RANGE.clamp(2500), 2000);
        assert_eq!(AXIS_RANGE.clamp(700), 700);
        assert_eq!(AxisRange::new(10, 0).clamp(20), 10);
        assert!(AXIS_RANGE.contains(2000));
        assert!(!AXIS_RANGE.contains(2001));
    }

    #[test]
    fn test_analog_channel() {
        let channel = AnalogChannel::new(ADC_RANGE, AXIS_RANGE);
        assert_eq!(channel.map(0), 0);
        assert_eq!(channel.map(4095), 2000);
    }

    #[test]
    fn test_motion_mapping_at_rest() {
        // Flat on a table: only gravity on Z
        let sample = MotionSample {
            acceleration: [0.0, 0.0, 9.81],
            ..MotionSample::default()
        };
        let axes = DEFAULT_MOTION_MAPPING.map(&sample);
        assert_eq!(axes, Axes::new(1000, 1000, 1000));
    }

    #[test]
    fn test_motion_mapping_truncates_before_mapping() {
        let sample = MotionSample {
            acceleration: [1.9, -1.9, 9.6 - 3.5],
            ..MotionSample::default()
        };
        let axes = DEFAULT_MOTION_MAPPING.map(&sample);
        // 1.9 -> 1, -1.9 -> -1, -3.5 -> -3
        assert_eq!(axes, Axes::new(1125, 875, 625));
    }

    #[test]
    fn test_motion_mapping_extrapolates() {
        let sample = MotionSample {
            acceleration: [12.0, 0.0, 9.6],
            ..MotionSample::default()
        };
        assert_eq!(DEFAULT_MOTION_MAPPING.map(&sample).x, 2500);
    }
}
