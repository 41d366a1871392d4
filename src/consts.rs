//! Shared numeric constants for the work zone.

// ── Logical space ───────────────────────────────────────────────

/// Spacing between grid lines, in logical units.
pub const DEFAULT_GRID_STEP: f64 = 50.0;

/// Default pannable logical extent along X.
pub const DEFAULT_LOGICAL_WIDTH: f64 = 2000.0;

/// Default pannable logical extent along Y.
pub const DEFAULT_LOGICAL_HEIGHT: f64 = 1000.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest allowed scale (no magnification).
pub const MIN_SCALE: f64 = 1.0;

/// Highest allowed scale.
pub const MAX_SCALE: f64 = 5.0;

/// Zoom delta per pixel of vertical wheel travel.
pub const WHEEL_SENSITIVITY: f64 = 0.001;

// ── Layout ──────────────────────────────────────────────────────

/// Thickness of the x-axis strip (below the grid) and y-axis strip (left of it), in pixels.
pub const AXIS_GUTTER_PX: f64 = 40.0;

/// Length of an axis tick mark in pixels.
pub const TICK_LENGTH_PX: f64 = 10.0;

/// Distance from the strip's outer edge to a tick label in pixels.
pub const LABEL_INSET_PX: f64 = 12.0;

/// Most grid lines drawn per axis; a denser window draws none.
pub const MAX_GRID_LINES: f64 = 10_000.0;

/// Half-pixel nudge that lands 1px lines on pixel centers.
pub const PIXEL_CENTER: f64 = 0.5;

// ── Shapes ──────────────────────────────────────────────────────

/// Side of the square tile a shape is drawn in at scale 1, in pixels.
pub const SHAPE_TILE_PX: f64 = 100.0;

/// Fewest shapes a generated palette holds.
pub const PALETTE_MIN_SHAPES: usize = 5;

/// Most shapes a generated palette holds.
pub const PALETTE_MAX_SHAPES: usize = 20;

/// Fewest vertices of a polygon payload.
pub const POLYGON_MIN_VERTICES: usize = 3;

/// Most vertices of a generated polygon.
pub const POLYGON_MAX_VERTICES: usize = 6;

// ── Storage ─────────────────────────────────────────────────────

/// Storage key holding the palette.
pub const PALETTE_KEY: &str = "polygons";

/// Storage key holding placed objects.
pub const PLACED_KEY: &str = "placed_polygons";
