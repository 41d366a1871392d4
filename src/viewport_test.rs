#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn viewport(width: f64, height: f64) -> ViewportState {
    ViewportState::new(Size::new(width, height), LogicalBounds::new(2000.0, 1000.0))
}

// =============================================================
// Point / Size
// =============================================================

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn size_positive_is_not_empty() {
    assert!(!Size::new(200.0, 100.0).is_empty());
}

#[test]
fn size_zero_width_is_empty() {
    assert!(Size::new(0.0, 100.0).is_empty());
}

#[test]
fn size_negative_height_is_empty() {
    assert!(Size::new(100.0, -1.0).is_empty());
}

#[test]
fn size_nan_is_empty() {
    assert!(Size::new(f64::NAN, 100.0).is_empty());
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_starts_at_scale_one_and_origin() {
    let vp = viewport(200.0, 100.0);
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
    assert_eq!(vp.size(), Size::new(200.0, 100.0));
}

#[test]
fn default_bounds_match_work_zone_extent() {
    let vp = ViewportState::default();
    assert_eq!(vp.bounds(), LogicalBounds::new(2000.0, 1000.0));
    assert!(vp.is_degenerate());
}

#[test]
fn default_scale_limits_are_one_to_five() {
    let vp = viewport(200.0, 100.0);
    assert_eq!(vp.min_scale(), 1.0);
    assert_eq!(vp.max_scale(), 5.0);
}

#[test]
fn with_view_saturates_scale() {
    let vp = viewport(200.0, 100.0).with_view(9.0, Point::new(0.0, 0.0));
    assert_eq!(vp.scale(), 5.0);
    let vp = viewport(200.0, 100.0).with_view(0.2, Point::new(0.0, 0.0));
    assert_eq!(vp.scale(), 1.0);
}

#[test]
fn with_view_clamps_offset() {
    let vp = viewport(200.0, 100.0).with_view(1.0, Point::new(5000.0, -20.0));
    assert_eq!(vp.offset(), Point::new(1800.0, 0.0));
}

#[test]
fn with_scale_limits_normalizes_inverted_range() {
    let vp = viewport(200.0, 100.0).with_scale_limits(4.0, 2.0);
    assert_eq!(vp.min_scale(), 2.0);
    assert_eq!(vp.max_scale(), 4.0);
    assert_eq!(vp.scale(), 2.0);
}

#[test]
fn with_scale_limits_nan_falls_back_to_defaults() {
    let vp = viewport(200.0, 100.0).with_scale_limits(f64::NAN, f64::NAN);
    assert_eq!(vp.min_scale(), 1.0);
    assert_eq!(vp.max_scale(), 5.0);
    assert_eq!(vp.scale(), 1.0);
}

#[test]
fn with_scale_limits_single_nan_keeps_other_limit() {
    let vp = viewport(200.0, 100.0).with_scale_limits(2.0, f64::NAN);
    assert_eq!(vp.min_scale(), 2.0);
    assert_eq!(vp.max_scale(), 5.0);
    assert_eq!(vp.scale(), 2.0);
}

#[test]
fn with_view_nan_scale_keeps_current_scale() {
    let vp = viewport(200.0, 100.0).with_view(f64::NAN, Point::new(10.0, 10.0));
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.offset(), Point::new(10.0, 10.0));
}

// =============================================================
// logical_to_screen / screen_to_logical
// =============================================================

#[test]
fn logical_origin_maps_to_bottom_left() {
    let vp = viewport(200.0, 100.0);
    let s = vp.logical_to_screen(Point::new(0.0, 0.0));
    assert!(point_approx_eq(s, Point::new(0.0, 100.0)));
}

#[test]
fn logical_y_up_is_screen_y_down() {
    let vp = viewport(200.0, 100.0);
    let low = vp.logical_to_screen(Point::new(0.0, 10.0));
    let high = vp.logical_to_screen(Point::new(0.0, 20.0));
    assert!(high.y < low.y);
}

#[test]
fn logical_to_screen_with_scale_and_offset() {
    let vp = viewport(200.0, 100.0).with_view(2.0, Point::new(100.0, 50.0));
    // x = (150 - 100) * 2 = 100, y = 100 - (60 - 50) * 2 = 80
    let s = vp.logical_to_screen(Point::new(150.0, 60.0));
    assert!(point_approx_eq(s, Point::new(100.0, 80.0)));
}

#[test]
fn screen_to_logical_with_scale_and_offset() {
    let vp = viewport(200.0, 100.0).with_view(2.0, Point::new(100.0, 50.0));
    let l = vp.screen_to_logical(Point::new(100.0, 80.0));
    assert!(point_approx_eq(l, Point::new(150.0, 60.0)));
}

#[test]
fn screen_center_at_identity() {
    let vp = viewport(200.0, 100.0);
    let l = vp.screen_to_logical(Point::new(100.0, 50.0));
    assert!(point_approx_eq(l, Point::new(100.0, 50.0)));
}

#[test]
fn round_trip_logical_first() {
    let vp = viewport(640.0, 480.0).with_view(3.7, Point::new(412.5, 233.25));
    for p in [Point::new(412.5, 233.25), Point::new(500.0, 300.0), Point::new(1999.0, 999.0)] {
        let back = vp.screen_to_logical(vp.logical_to_screen(p));
        assert!(point_approx_eq(p, back), "{p:?} came back as {back:?}");
    }
}

#[test]
fn round_trip_screen_first() {
    let vp = viewport(640.0, 480.0).with_view(1.25, Point::new(10.0, 20.0));
    let s = Point::new(321.0, 17.5);
    let back = vp.logical_to_screen(vp.screen_to_logical(s));
    assert!(point_approx_eq(s, back));
}

// =============================================================
// clamp
// =============================================================

#[test]
fn clamp_bounds_at_scale_one() {
    let vp = viewport(200.0, 100.0);
    assert_eq!(vp.max_offset(), Point::new(1800.0, 900.0));
}

#[test]
fn clamp_bounds_grow_with_scale() {
    let vp = viewport(200.0, 100.0).with_view(4.0, Point::default());
    // 2000 - 200/4 = 1950, 1000 - 100/4 = 975
    assert_eq!(vp.max_offset(), Point::new(1950.0, 975.0));
}

#[test]
fn clamp_range_collapses_when_view_exceeds_bounds() {
    let vp = ViewportState::new(Size::new(3000.0, 1500.0), LogicalBounds::new(2000.0, 1000.0))
        .with_view(1.0, Point::new(300.0, 300.0));
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn clamp_is_idempotent() {
    let mut vp = viewport(200.0, 100.0).with_view(2.5, Point::new(7000.0, -3.0));
    let once = vp.offset();
    vp.clamp();
    assert_eq!(vp.offset(), once);
}

#[test]
fn clamp_axes_are_independent() {
    let vp = viewport(200.0, 100.0).with_view(1.0, Point::new(-50.0, 400.0));
    assert_eq!(vp.offset(), Point::new(0.0, 400.0));
}

#[test]
fn clamp_replaces_nan_offset_with_zero() {
    let vp = viewport(200.0, 100.0).with_view(1.0, Point::new(f64::NAN, 10.0));
    assert_eq!(vp.offset(), Point::new(0.0, 10.0));
}

// =============================================================
// Degenerate viewport
// =============================================================

#[test]
fn degenerate_viewport_pins_offset_to_zero() {
    let vp = viewport(0.0, 0.0).with_view(2.0, Point::new(500.0, 500.0));
    assert!(vp.is_degenerate());
    assert_eq!(vp.max_offset(), Point::new(0.0, 0.0));
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn degenerate_viewport_conversions_do_not_fail() {
    let vp = viewport(0.0, 0.0);
    let l = vp.screen_to_logical(Point::new(10.0, 10.0));
    assert!(l.x.is_finite());
    assert!(l.y.is_finite());
}

// =============================================================
// set_viewport_size
// =============================================================

#[test]
fn resize_reclamps_offset() {
    let mut vp = viewport(200.0, 100.0).with_view(1.0, Point::new(1800.0, 900.0));
    vp.set_viewport_size(Size::new(400.0, 200.0));
    assert_eq!(vp.offset(), Point::new(1600.0, 800.0));
}

#[test]
fn resize_from_degenerate_keeps_origin() {
    let mut vp = viewport(0.0, 0.0);
    vp.set_viewport_size(Size::new(200.0, 100.0));
    assert!(!vp.is_degenerate());
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn resize_to_zero_pins_offset() {
    let mut vp = viewport(200.0, 100.0).with_view(1.0, Point::new(300.0, 300.0));
    vp.set_viewport_size(Size::new(0.0, 100.0));
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}
