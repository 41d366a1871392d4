//! Input model: pointer buttons, wheel deltas, drop messages and the gesture state.
//!
//! The host translates DOM events into these types. Screen points are
//! relative to the grid surface's top-left corner, in CSS pixels.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Whether pressing this button on the grid starts a pan.
    #[must_use]
    pub fn pans(self) -> bool {
        matches!(self, Self::Primary | Self::Middle)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, zooms out).
    pub dy: f64,
}

/// A shape dropped onto the grid: the raw drag payload and where it landed.
///
/// The payload stays undecoded until the engine handles the drop, so a
/// malformed one can be ignored in a single place.
#[derive(Debug, Clone, PartialEq)]
pub struct DropMessage {
    /// Drag payload text, normally [`crate::shape::Polygon::to_json`] output.
    pub payload: Option<String>,
    /// Drop position on the grid surface.
    pub screen: Point,
}

impl DropMessage {
    #[must_use]
    pub fn new(payload: impl Into<String>, screen: Point) -> Self {
        Self { payload: Some(payload.into()), screen }
    }
}

/// Gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is dragging the grid.
    Panning {
        /// Screen position of the previous pointer event, used to compute the pan delta.
        last_screen: Point,
    },
}
