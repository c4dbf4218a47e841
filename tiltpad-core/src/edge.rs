//! Edge detection for the digital button lines.
//!
//! Each line is a two-state machine (`Released` <-> `Pressed`) that starts
//! released. A sample that disagrees with the current state produces exactly
//! one [`Edge`]; a sample that agrees produces nothing.
//!
//! There is no temporal filtering: one sample per tick is taken as ground
//! truth, so mechanical bounce that straddles a tick shows up as extra edges.

use crate::input::InputError;
use crate::types::{Button, Edge, BUTTON_COUNT};
use embedded_hal::digital::InputPin;

/// Last reported state of a digital line.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    #[default]
    Released,
    Pressed,
}

impl LineState {
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, LineState::Pressed)
    }
}

/// Edge detector for a single input line.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLine {
    state: LineState,
}

impl InputLine {
    /// A released line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LineState::Released,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> LineState {
        self.state
    }

    /// Compare a logical sample (`true` = pressed) against the current state.
    ///
    /// Does not change the state; see [`commit`](Self::commit).
    #[inline]
    #[must_use]
    pub const fn detect(&self, pressed: bool) -> Option<Edge> {
        match (self.state, pressed) {
            (LineState::Released, true) => Some(Edge::Pressed),
            (LineState::Pressed, false) => Some(Edge::Released),
            _ => None,
        }
    }

    /// Record that `edge` has been reported.
    #[inline]
    pub fn commit(&mut self, edge: Edge) {
        self.state = match edge {
            Edge::Pressed => LineState::Pressed,
            Edge::Released => LineState::Released,
        };
    }

    /// Detect and commit in one step.
    pub fn update(&mut self, pressed: bool) -> Option<Edge> {
        let edge = self.detect(pressed)?;
        self.commit(edge);
        Some(edge)
    }
}

/// The four button pins together with their edge detectors.
///
/// Pins are wired pull-up, active-low: an electrically low pin reads as
/// pressed.
pub struct ButtonBank<P> {
    pins: [P; BUTTON_COUNT],
    lines: [InputLine; BUTTON_COUNT],
}

impl<P: InputPin> ButtonBank<P> {
    /// Create a bank with every line released.
    pub fn new(pins: [P; BUTTON_COUNT]) -> Self {
        Self {
            pins,
            lines: [InputLine::new(); BUTTON_COUNT],
        }
    }

    /// Read every pin once, returning logical pressed states in button order.
    pub fn sample(&mut self) -> Result<[bool; BUTTON_COUNT], InputError> {
        let mut pressed = [false; BUTTON_COUNT];
        for (slot, pin) in pressed.iter_mut().zip(self.pins.iter_mut()) {
            *slot = pin.is_low().map_err(|_| InputError::Io)?;
        }
        Ok(pressed)
    }

    /// Edge detector for `button`.
    #[inline]
    #[must_use]
    pub fn line(&self, button: Button) -> &InputLine {
        &self.lines[button.index()]
    }

    /// Record that `edge` on `button` has been reported.
    #[inline]
    pub fn commit(&mut self, button: Button, edge: Edge) {
        self.lines[button.index()].commit(edge);
    }

    /// Get a mutable reference to the pins.
    pub fn pins_mut(&mut self) -> &mut [P; BUTTON_COUNT] {
        &mut self.pins
    }
}
