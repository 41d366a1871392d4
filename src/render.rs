//! Rendering: grid, axis strips and placed objects.
//!
//! The render driver owns no state. Every function here is a projection of a
//! [`ViewportState`] (and, for objects, a [`Registry`]) onto a [`DrawTarget`].
//! Line and tick positions are computed by pure functions ([`vertical_lines`],
//! [`horizontal_lines`], [`x_ticks`], [`y_ticks`]) so they can be checked
//! without a surface.
//!
//! Three surfaces make up the work zone: the grid (objects are drawn on it
//! too), the x-axis strip below it and the y-axis strip to its left.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{LABEL_INSET_PX, MAX_GRID_LINES, PIXEL_CENTER, TICK_LENGTH_PX};
use crate::registry::Registry;
use crate::viewport::{Point, ViewportState};

/// Grid line color.
const GRID_STROKE: &str = "#ddd";
/// Axis tick and label color.
const AXIS_STROKE: &str = "black";
/// Placed shape fill.
const SHAPE_FILL: &str = "lightgreen";
/// Placed shape outline.
const SHAPE_STROKE: &str = "black";

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// A straight screen-space segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// A drawing surface injected into the render driver.
///
/// Coordinates are surface pixels with the origin at the top-left.
pub trait DrawTarget {
    type Error;

    /// Erase the whole surface.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if it cannot be cleared.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Stroke all `segments` as one 1px path in `color`.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if stroking fails.
    fn stroke_segments(&mut self, segments: &[Segment], color: &str) -> Result<(), Self::Error>;

    /// Draw `text` anchored at `at`.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if text cannot be drawn.
    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, baseline: TextBaseline)
    -> Result<(), Self::Error>;

    /// Fill and outline a closed polygon.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the path cannot be drawn.
    fn fill_polygon(&mut self, points: &[Point], fill: &str, stroke: &str) -> Result<(), Self::Error>;
}

/// One grid line: its logical coordinate and pixel-snapped screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub logical: f64,
    pub screen: f64,
}

/// One axis tick: pixel-snapped screen coordinate and its integer label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub screen: f64,
    pub label: String,
}

// =============================================================
// Enumeration
// =============================================================

/// Multiples of `step` from the one at or before `offset` through `offset + span`.
///
/// Empty when the window holds more than [`MAX_GRID_LINES`] lines or when
/// `step` is below the float resolution at `offset`.
fn multiples(offset: f64, span: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && offset.is_finite() && span.is_finite()) {
        return Vec::new();
    }
    let start = (offset / step).floor() * step;
    let end = offset + span;
    let last = ((end - start) / step).floor();
    if !(last.is_finite() && last >= 0.0 && last < MAX_GRID_LINES) || start + step <= start {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut i = 0.0;
    while i <= last {
        values.push(step.mul_add(i, start));
        i += 1.0;
    }
    values
}

fn snap(screen: f64) -> f64 {
    screen.round() + PIXEL_CENTER
}

/// Vertical grid lines (constant logical X) covering the visible window.
#[must_use]
pub fn vertical_lines(viewport: &ViewportState, step: f64) -> Vec<GridLine> {
    if viewport.is_degenerate() {
        return Vec::new();
    }
    let offset = viewport.offset();
    multiples(offset.x, viewport.visible_span().width, step)
        .into_iter()
        .map(|x| GridLine { logical: x, screen: snap(viewport.logical_to_screen(Point::new(x, offset.y)).x) })
        .collect()
}

/// Horizontal grid lines (constant logical Y) covering the visible window.
#[must_use]
pub fn horizontal_lines(viewport: &ViewportState, step: f64) -> Vec<GridLine> {
    if viewport.is_degenerate() {
        return Vec::new();
    }
    let offset = viewport.offset();
    multiples(offset.y, viewport.visible_span().height, step)
        .into_iter()
        .map(|y| GridLine { logical: y, screen: snap(viewport.logical_to_screen(Point::new(offset.x, y)).y) })
        .collect()
}

fn to_ticks(lines: Vec<GridLine>) -> Vec<Tick> {
    lines
        .into_iter()
        .map(|line| Tick { screen: line.screen, label: format!("{}", line.logical.round()) })
        .collect()
}

/// Ticks for the x-axis strip; same positions as [`vertical_lines`].
#[must_use]
pub fn x_ticks(viewport: &ViewportState, step: f64) -> Vec<Tick> {
    to_ticks(vertical_lines(viewport, step))
}

/// Ticks for the y-axis strip; same positions as [`horizontal_lines`].
#[must_use]
pub fn y_ticks(viewport: &ViewportState, step: f64) -> Vec<Tick> {
    to_ticks(horizontal_lines(viewport, step))
}

// =============================================================
// Drawing
// =============================================================

/// Redraw the grid surface.
///
/// # Errors
///
/// Propagates any error from `target`.
pub fn draw_grid<T: DrawTarget>(target: &mut T, viewport: &ViewportState, step: f64) -> Result<(), T::Error> {
    target.clear()?;
    let size = viewport.size();

    let mut segments: Vec<Segment> = vertical_lines(viewport, step)
        .into_iter()
        .map(|line| Segment { from: Point::new(line.screen, 0.0), to: Point::new(line.screen, size.height) })
        .collect();
    segments.extend(
        horizontal_lines(viewport, step)
            .into_iter()
            .map(|line| Segment { from: Point::new(0.0, line.screen), to: Point::new(size.width, line.screen) }),
    );

    if segments.is_empty() {
        return Ok(());
    }
    target.stroke_segments(&segments, GRID_STROKE)
}

/// Redraw the x-axis strip. Ticks hang from the strip's bottom edge, which
/// is `strip_height` pixels tall, with labels just above them.
///
/// # Errors
///
/// Propagates any error from `target`.
pub fn draw_x_axis<T: DrawTarget>(
    target: &mut T,
    viewport: &ViewportState,
    step: f64,
    strip_height: f64,
) -> Result<(), T::Error> {
    target.clear()?;
    let ticks = x_ticks(viewport, step);
    if ticks.is_empty() {
        return Ok(());
    }

    let segments: Vec<Segment> = ticks
        .iter()
        .map(|t| Segment {
            from: Point::new(t.screen, strip_height),
            to: Point::new(t.screen, strip_height - TICK_LENGTH_PX),
        })
        .collect();
    target.stroke_segments(&segments, AXIS_STROKE)?;

    for tick in &ticks {
        target.fill_text(
            &tick.label,
            Point::new(tick.screen, strip_height - LABEL_INSET_PX),
            TextAlign::Center,
            TextBaseline::Bottom,
        )?;
    }
    Ok(())
}

/// Redraw the y-axis strip. Ticks extend left from the strip's right edge
/// (adjacent to the grid), which is `strip_width` pixels from its left.
///
/// # Errors
///
/// Propagates any error from `target`.
pub fn draw_y_axis<T: DrawTarget>(
    target: &mut T,
    viewport: &ViewportState,
    step: f64,
    strip_width: f64,
) -> Result<(), T::Error> {
    target.clear()?;
    let ticks = y_ticks(viewport, step);
    if ticks.is_empty() {
        return Ok(());
    }

    let segments: Vec<Segment> = ticks
        .iter()
        .map(|t| Segment {
            from: Point::new(strip_width, t.screen),
            to: Point::new(strip_width - TICK_LENGTH_PX, t.screen),
        })
        .collect();
    target.stroke_segments(&segments, AXIS_STROKE)?;

    for tick in &ticks {
        target.fill_text(
            &tick.label,
            Point::new(strip_width - LABEL_INSET_PX, tick.screen),
            TextAlign::Right,
            TextBaseline::Middle,
        )?;
    }
    Ok(())
}

/// Redraw both axis strips. `gutter` is the strip thickness.
///
/// # Errors
///
/// Propagates any error from either target.
pub fn draw_axis_labels<T: DrawTarget>(
    x_axis: &mut T,
    y_axis: &mut T,
    viewport: &ViewportState,
    step: f64,
    gutter: f64,
) -> Result<(), T::Error> {
    draw_x_axis(x_axis, viewport, step, gutter)?;
    draw_y_axis(y_axis, viewport, step, gutter)
}

/// Draw every placed object onto the grid surface, bottom first.
///
/// A tile vertex `(px, py)` lands at `screen + (px, py) * scale`, anchored
/// at the object's top-left.
///
/// # Errors
///
/// Propagates any error from `target`.
pub fn draw_objects<T: DrawTarget>(target: &mut T, viewport: &ViewportState, registry: &Registry) -> Result<(), T::Error> {
    if viewport.is_degenerate() {
        return Ok(());
    }
    for (obj, projection) in registry.iter().zip(registry.reproject(viewport)) {
        let origin = projection.transform.position;
        let scale = projection.transform.scale;
        let points: Vec<Point> = obj
            .payload()
            .points
            .iter()
            .map(|[px, py]| Point::new(px.mul_add(scale, origin.x), py.mul_add(scale, origin.y)))
            .collect();
        target.fill_polygon(&points, SHAPE_FILL, SHAPE_STROKE)?;
    }
    Ok(())
}

/// The three surfaces of the work zone.
pub struct Surfaces<'a, T> {
    pub grid: &'a mut T,
    pub x_axis: &'a mut T,
    pub y_axis: &'a mut T,
}

/// Full redraw: grid, objects on top of it, then both axis strips.
///
/// # Errors
///
/// Propagates the first error from any surface.
pub fn draw_scene<T: DrawTarget>(
    surfaces: Surfaces<'_, T>,
    viewport: &ViewportState,
    registry: &Registry,
    step: f64,
    gutter: f64,
) -> Result<(), T::Error> {
    draw_grid(surfaces.grid, viewport, step)?;
    draw_objects(surfaces.grid, viewport, registry)?;
    draw_axis_labels(surfaces.x_axis, surfaces.y_axis, viewport, step, gutter)
}
