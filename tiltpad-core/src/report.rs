//! HID gamepad report layout.

use crate::mapping::AxisRange;
use crate::types::GamepadState;

/// HID gamepad input report.
///
/// Total size: 9 bytes (buttons: 1, X/Y/Z/slider: 4x2 little-endian).
///
/// Axis values are clamped into the configured axis range; the HID logical
/// range cannot represent values outside it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    /// Button bitfield (4 buttons, upper 4 bits padding)
    pub buttons: u8,
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub slider: u16,
}

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 9;

    /// Build a report from publisher state.
    #[must_use]
    pub fn encode(state: &GamepadState, range: AxisRange) -> Self {
        let axis = |v: i32| range.clamp(v).clamp(0, i32::from(u16::MAX)) as u16;
        Self {
            buttons: state.buttons & 0x0F,
            x: axis(state.x),
            y: axis(state.y),
            z: axis(state.z),
            slider: axis(state.slider),
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let x = self.x.to_le_bytes();
        let y = self.y.to_le_bytes();
        let z = self.z.to_le_bytes();
        let s = self.slider.to_le_bytes();
        [self.buttons, x[0], x[1], y[0], y[1], z[0], z[1], s[0], s[1]]
    }
}

/// Length of [`report_descriptor`] in bytes.
pub const REPORT_DESCRIPTOR_LEN: usize = 51;

/// Build the HID report descriptor for the axis range reports are encoded with.
///
/// - 4 buttons + 4 bits padding
/// - X, Y, Z, Slider as 16-bit values, logical range taken from `range`
///
/// # Panics
///
/// If `range` does not fit in `0..=i16::MAX`. HID logical bounds are signed
/// while report fields are unsigned, so only that interval is encoded the
/// same way in both. Used in a `static`, this is a compile-time error.
#[must_use]
pub const fn report_descriptor(range: AxisRange) -> [u8; REPORT_DESCRIPTOR_LEN] {
    let (lo, hi) = range.bounds();
    assert!(
        lo >= 0 && hi <= i16::MAX as i32,
        "axis range must fit in 0..=32767"
    );
    let min = (lo as u16).to_le_bytes();
    let max = (hi as u16).to_le_bytes();
    [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x09, 0x05, // Usage (Gamepad)
        0xA1, 0x01, // Collection (Application)
        //
        // --- Buttons (4 buttons) ---
        0x05, 0x09, //   Usage Page (Button)
        0x19, 0x01, //   Usage Minimum (Button 1)
        0x29, 0x04, //   Usage Maximum (Button 4)
        0x15, 0x00, //   Logical Minimum (0)
        0x25, 0x01, //   Logical Maximum (1)
        0x95, 0x04, //   Report Count (4)
        0x75, 0x01, //   Report Size (1)
        0x81, 0x02, //   Input (Data, Variable, Absolute)
        0x95, 0x01, //   Report Count (1)
        0x75, 0x04, //   Report Size (4)
        0x81, 0x03, //   Input (Constant) - padding
        //
        // --- Axes ---
        0x05, 0x01, //   Usage Page (Generic Desktop)
        0x09, 0x30, //   Usage (X)
        0x09, 0x31, //   Usage (Y)
        0x09, 0x32, //   Usage (Z)
        0x09, 0x36, //   Usage (Slider)
        0x16, min[0], min[1], //   Logical Minimum
        0x26, max[0], max[1], //   Logical Maximum
        0x75, 0x10, //   Report Size (16)
        0x95, 0x04, //   Report Count (4)
        0x81, 0x02, //   Input (Data, Variable, Absolute)
        //
        0xC0, // End Collection
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{AXIS_RANGE, BASIC_AXIS_RANGE};
    use crate::types::Button;

    #[test]
    fn test_encode_neutral() {
        let report = GamepadReport::encode(&GamepadState::neutral(), AXIS_RANGE);
        assert_eq!(report.as_bytes(), [0; GamepadReport::SIZE]);
    }

    #[test]
    fn test_encode_layout() {
        let state = GamepadState {
            buttons: Button::Button1.mask() | Button::Button4.mask(),
            x: 2000,
            y: 1000,
            z: 1,
            slider: 0x0102,
        };
        let bytes = GamepadReport::encode(&state, AXIS_RANGE).as_bytes();
        assert_eq!(
            bytes,
            [0b1001, 0xD0, 0x07, 0xE8, 0x03, 0x01, 0x00, 0x02, 0x01]
        );
    }

    #[test]
    fn test_encode_clamps_out_of_range_axes() {
        let state = GamepadState {
            x: -125,
            y: 2500,
            z: 1500,
            ..GamepadState::neutral()
        };
        let report = GamepadReport::encode(&state, BASIC_AXIS_RANGE);
        assert_eq!((report.x, report.y, report.z), (0, 1023, 1023));
    }

    /// Value of the 2-byte item `tag` in the axis section.
    fn axis_item(descriptor: &[u8], tag: u8) -> [u8; 2] {
        let pos = descriptor
            .windows(3)
            .position(|w| w[0] == tag)
            .unwrap();
        [descriptor[pos + 1], descriptor[pos + 2]]
    }

    #[test]
    fn test_descriptor_logical_range() {
        let descriptor = report_descriptor(AXIS_RANGE);
        assert_eq!(axis_item(&descriptor, 0x16), [0x00, 0x00]);
        assert_eq!(axis_item(&descriptor, 0x26), [0xD0, 0x07]);
        assert_eq!(descriptor[descriptor.len() - 1], 0xC0);
    }

    #[test]
    fn test_descriptor_matches_encode_bounds() {
        let range = AxisRange::new(1023, 100);
        let descriptor = report_descriptor(range);
        assert_eq!(axis_item(&descriptor, 0x16), [0x64, 0x00]);
        assert_eq!(axis_item(&descriptor, 0x26), [0xFF, 0x03]);

        let low = GamepadState {
            x: 0,
            ..GamepadState::neutral()
        };
        assert_eq!(GamepadReport::encode(&low, range).x, 100);
    }

    #[test]
    #[should_panic(expected = "axis range must fit")]
    fn test_descriptor_rejects_negative_range() {
        let _ = report_descriptor(AxisRange::new(-100, 100));
    }
}
