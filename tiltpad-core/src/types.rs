//! Core gamepad types: Button, Edge, Axis, Axes, GamepadState.

/// Number of digital buttons wired to the pad.
pub const BUTTON_COUNT: usize = 4;

/// One of the four logical gamepad buttons.
///
/// The index order matches the order of [`PinConfig::button_pins`](crate::PinConfig).
/// On the reference build the buttons are labelled:
///
/// | Button | Label | Action |
/// |--------|-------|--------|
/// | `Button1` | X | Rotate left |
/// | `Button2` | B | Rotate right |
/// | `Button3` | A | Move down |
/// | `Button4` | Y | Move up |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Button1,
    Button2,
    Button3,
    Button4,
}

impl Button {
    /// All buttons in pin order.
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Button1,
        Button::Button2,
        Button::Button3,
        Button::Button4,
    ];

    /// Zero-based index of this button.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Button for a zero-based index, if in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < BUTTON_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Bit mask of this button in a HID button byte.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }
}

/// A change of a digital input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

impl Edge {
    /// Whether this edge leaves the line pressed.
    #[inline]
    #[must_use]
    pub const fn is_press(self) -> bool {
        matches!(self, Edge::Pressed)
    }
}

/// A single reportable axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
    Slider,
}

/// The three linear axes, already mapped into the gamepad's axis domain.
///
/// Values are not clamped; see [`AxisRange::clamp`](crate::AxisRange::clamp).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axes {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Report state held by a publisher.
///
/// The controller only issues commands; publisher implementations own one of
/// these and encode it into HID reports.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadState {
    /// Button bitfield, bit `n` is [`Button::from_index(n)`](Button::from_index).
    pub buttons: u8,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub slider: i32,
}

impl GamepadState {
    /// No buttons pressed, all axes at zero.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            z: 0,
            slider: 0,
        }
    }

    /// Check if the given button is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self, button: Button) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Apply a command, returning `true` if the state changed.
    pub fn apply(&mut self, command: GamepadCommand) -> bool {
        let before = *self;
        match command {
            GamepadCommand::Press(b) => self.buttons |= b.mask(),
            GamepadCommand::Release(b) => self.buttons &= !b.mask(),
            GamepadCommand::SetAxes(axes) => {
                self.x = axes.x;
                self.y = axes.y;
                self.z = axes.z;
            }
            GamepadCommand::SetAxis(axis, value) => match axis {
                Axis::X => self.x = value,
                Axis::Y => self.y = value,
                Axis::Z => self.z = value,
                Axis::Slider => self.slider = value,
            },
        }
        *self != before
    }
}

/// A single command issued to a publisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum GamepadCommand {
    Press(Button),
    Release(Button),
    SetAxes(Axes),
    SetAxis(Axis, i32),
}

/// Motion sensor reading in SI units.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Acceleration in m/s².
    pub acceleration: [f32; 3],
    /// Rotation in rad/s.
    pub rotation: [f32; 3],
    /// Die temperature in °C.
    pub temperature: f32,
}
