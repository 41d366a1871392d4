//! Viewport state: scale, logical offset, pixel size and pannable bounds.
//!
//! Logical space has Y pointing up with the origin at the bottom-left of the
//! pannable extent. Screen space is the grid surface in pixels with Y pointing
//! down. `offset` is the logical point shown at the bottom-left corner of the
//! grid surface.
//!
//! Every change to scale, offset or size is followed by [`ViewportState::clamp`],
//! so the visible logical window never leaves `[0, bounds]`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH, MAX_SCALE, MIN_SCALE};

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the grid surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are strictly positive (NaN counts as empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The pannable logical extent, `[0, max_width] x [0, max_height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalBounds {
    pub max_width: f64,
    pub max_height: f64,
}

impl LogicalBounds {
    #[must_use]
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Self { max_width, max_height }
    }
}

impl Default for LogicalBounds {
    fn default() -> Self {
        Self { max_width: DEFAULT_LOGICAL_WIDTH, max_height: DEFAULT_LOGICAL_HEIGHT }
    }
}

/// Singleton view state for the work zone.
///
/// Only the transform functions in [`crate::transform`] change scale and
/// offset; everything else reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    scale: f64,
    offset: Point,
    size: Size,
    bounds: LogicalBounds,
    min_scale: f64,
    max_scale: f64,
}

impl ViewportState {
    /// A viewport at scale 1 showing the bottom-left corner of `bounds`.
    ///
    /// An empty `size` is accepted; clamping then pins the offset to zero
    /// until a real size arrives through [`Self::set_viewport_size`].
    #[must_use]
    pub fn new(size: Size, bounds: LogicalBounds) -> Self {
        Self {
            scale: MIN_SCALE,
            offset: Point::default(),
            size,
            bounds,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }

    /// Replace the scale range. The current scale is saturated into it and
    /// the offset re-clamped. A NaN limit falls back to the default one.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let min_scale = if min_scale.is_nan() { MIN_SCALE } else { min_scale };
        let max_scale = if max_scale.is_nan() { MAX_SCALE } else { max_scale };
        self.min_scale = min_scale.min(max_scale);
        self.max_scale = max_scale.max(min_scale);
        self.scale = self.scale.clamp(self.min_scale, self.max_scale);
        self.clamp();
        self
    }

    /// Start from a given scale and offset, saturated and clamped like any
    /// other update. A NaN scale keeps the current one.
    #[must_use]
    pub fn with_view(mut self, scale: f64, offset: Point) -> Self {
        if !scale.is_nan() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
        self.offset = offset;
        self.clamp();
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn bounds(&self) -> LogicalBounds {
        self.bounds
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Whether the grid surface has no area. Nothing is drawn in that state.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.size.is_empty()
    }

    // --- Conversions ---

    /// Convert a logical point to grid-surface pixels (Y flipped).
    #[must_use]
    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point {
            x: (logical.x - self.offset.x) * self.scale,
            y: self.size.height - (logical.y - self.offset.y) * self.scale,
        }
    }

    /// Convert a grid-surface pixel position to logical coordinates.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point {
            x: self.offset.x + screen.x / self.scale,
            y: self.offset.y + (self.size.height - screen.y) / self.scale,
        }
    }

    /// Logical extent currently visible, `size / scale` per axis.
    #[must_use]
    pub fn visible_span(&self) -> Size {
        Size {
            width: self.size.width / self.scale,
            height: self.size.height / self.scale,
        }
    }

    /// Upper end of the offset clamp range per axis. Zero when degenerate.
    #[must_use]
    pub fn max_offset(&self) -> Point {
        if self.is_degenerate() {
            return Point::default();
        }
        let span = self.visible_span();
        Point {
            x: (self.bounds.max_width - span.width).max(0.0),
            y: (self.bounds.max_height - span.height).max(0.0),
        }
    }

    // --- Mutation ---

    /// Constrain the offset into `[0, max_offset]` on each axis independently.
    ///
    /// Idempotent. A degenerate viewport pins the offset to the origin.
    pub fn clamp(&mut self) {
        let max = self.max_offset();
        self.offset.x = self.offset.x.max(0.0).min(max.x);
        self.offset.y = self.offset.y.max(0.0).min(max.y);
    }

    /// Apply a resize notification from the host layout, then re-clamp.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.size = size;
        self.clamp();
    }

    /// Raw scale write for the transform engine. The caller clamps afterwards.
    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Raw offset write for the transform engine. The caller clamps afterwards.
    pub(crate) fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(Size::default(), LogicalBounds::default())
    }
}
