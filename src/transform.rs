//! Transform engine: pan and zoom-around-cursor over a [`ViewportState`].
//!
//! Both operations clamp before returning and report whether the view
//! actually changed, so callers can skip reprojection and redraw on no-ops.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::viewport::{Point, ViewportState};

/// Pan by a screen-space drag delta in pixels.
///
/// Grab-and-drag convention: dragging right moves the window left
/// (`offset.x` decreases), dragging down moves it down in logical space
/// (`offset.y` increases, since screen Y is flipped).
///
/// Returns `true` if the offset changed after clamping.
pub fn pan(viewport: &mut ViewportState, delta_screen_x: f64, delta_screen_y: f64) -> bool {
    let before = viewport.offset();
    let scale = viewport.scale();
    viewport.set_offset(Point {
        x: before.x - delta_screen_x / scale,
        y: before.y + delta_screen_y / scale,
    });
    viewport.clamp();

    let after = viewport.offset();
    let changed = after != before;
    tracing::trace!(dx = delta_screen_x, dy = delta_screen_y, x = after.x, y = after.y, changed, "pan");
    changed
}

/// Zoom by `zoom_factor_delta` while keeping the logical point under
/// `screen_point` fixed on screen.
///
/// The new scale is `scale * (1 + delta)` saturated into the viewport's
/// scale range. If saturation leaves the scale unchanged this is a no-op
/// and returns `false`. The anchor is captured under the old scale before
/// the scale is written.
pub fn zoom_at(viewport: &mut ViewportState, screen_point: Point, zoom_factor_delta: f64) -> bool {
    let old_scale = viewport.scale();
    let new_scale = (old_scale * (1.0 + zoom_factor_delta)).clamp(viewport.min_scale(), viewport.max_scale());
    if !new_scale.is_finite() || (new_scale - old_scale).abs() < f64::EPSILON {
        return false;
    }

    let anchor = viewport.screen_to_logical(screen_point);

    viewport.set_scale(new_scale);
    let height = viewport.size().height;
    viewport.set_offset(Point {
        x: anchor.x - screen_point.x / new_scale,
        y: anchor.y - (height - screen_point.y) / new_scale,
    });
    viewport.clamp();

    tracing::debug!(
        from = old_scale,
        to = new_scale,
        anchor_x = anchor.x,
        anchor_y = anchor.y,
        "zoom"
    );
    true
}
