#![allow(clippy::float_cmp)]

use super::*;
use crate::transform::{pan, zoom_at};
use crate::viewport::{LogicalBounds, Size};

const EPSILON: f64 = 1e-9;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square() -> Polygon {
    Polygon::new(vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]])
}

fn viewport() -> ViewportState {
    ViewportState::new(Size::new(200.0, 100.0), LogicalBounds::new(2000.0, 1000.0))
}

// =============================================================
// place / get
// =============================================================

#[test]
fn new_registry_is_empty() {
    let reg = Registry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.len(), 0);
}

#[test]
fn place_stores_object() {
    let mut reg = Registry::new();
    let id = reg.place(pt(100.0, 50.0), square());
    let obj = reg.get(&id).unwrap();
    assert_eq!(obj.id(), id);
    assert_eq!(obj.position(), pt(100.0, 50.0));
    assert_eq!(obj.payload(), &square());
}

#[test]
fn place_assigns_distinct_ids() {
    let mut reg = Registry::new();
    let a = reg.place(pt(0.0, 0.0), square());
    let b = reg.place(pt(0.0, 0.0), square());
    assert_ne!(a, b);
    assert_eq!(reg.len(), 2);
}

#[test]
fn iter_is_in_placement_order() {
    let mut reg = Registry::new();
    let a = reg.place(pt(3.0, 3.0), square());
    let b = reg.place(pt(1.0, 1.0), square());
    let ids: Vec<_> = reg.iter().map(PlacedObject::id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn get_unknown_id_is_none() {
    let reg = Registry::new();
    assert!(reg.get(&Uuid::new_v4()).is_none());
}

// =============================================================
// reproject
// =============================================================

#[test]
fn reproject_empty_is_empty() {
    assert!(Registry::new().reproject(&viewport()).is_empty());
}

#[test]
fn reproject_at_identity() {
    let mut reg = Registry::new();
    let id = reg.place(pt(100.0, 50.0), square());
    let projections = reg.reproject(&viewport());
    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].id, id);
    assert!(point_approx_eq(projections[0].transform.position, pt(100.0, 50.0)));
    assert_eq!(projections[0].transform.scale, 1.0);
}

#[test]
fn reproject_follows_pan() {
    let mut reg = Registry::new();
    reg.place(pt(150.0, 60.0), square());
    let mut vp = viewport().with_view(1.0, pt(100.0, 100.0));
    let before = reg.reproject(&vp)[0].transform.position;
    pan(&mut vp, 25.0, -10.0);
    let after = reg.reproject(&vp)[0].transform.position;
    assert!(point_approx_eq(after, pt(before.x + 25.0, before.y - 10.0)));
}

#[test]
fn reproject_carries_viewport_scale() {
    let mut reg = Registry::new();
    reg.place(pt(10.0, 10.0), square());
    let mut vp = viewport();
    zoom_at(&mut vp, pt(0.0, 0.0), 1.0);
    assert_eq!(reg.reproject(&vp)[0].transform.scale, 2.0);
}

#[test]
fn reproject_is_recomputed_every_call() {
    let mut reg = Registry::new();
    reg.place(pt(300.0, 200.0), square());
    let mut vp = viewport().with_view(1.0, pt(250.0, 150.0));
    let first = reg.reproject(&vp);
    zoom_at(&mut vp, pt(40.0, 40.0), 0.5);
    let second = reg.reproject(&vp);
    assert_ne!(first, second);
    assert_eq!(reg.reproject(&vp), second);
}

#[test]
fn reproject_does_not_move_logical_position() {
    let mut reg = Registry::new();
    let id = reg.place(pt(42.0, 24.0), square());
    let mut vp = viewport();
    zoom_at(&mut vp, pt(10.0, 10.0), 2.0);
    pan(&mut vp, -30.0, 30.0);
    let _ = reg.reproject(&vp);
    assert_eq!(reg.get(&id).unwrap().position(), pt(42.0, 24.0));
}

// =============================================================
// ScreenTransform
// =============================================================

#[test]
fn screen_transform_css() {
    let t = ScreenTransform { position: pt(12.5, -3.0), scale: 2.0 };
    assert_eq!(t.to_css(), "translate(12.5px, -3px) scale(2)");
}

// =============================================================
// clear / persistence view
// =============================================================

#[test]
fn clear_empties_registry() {
    let mut reg = Registry::new();
    reg.place(pt(1.0, 1.0), square());
    reg.clear();
    assert!(reg.is_empty());
}

#[test]
fn clear_is_idempotent() {
    let mut reg = Registry::new();
    reg.clear();
    reg.clear();
    assert!(reg.is_empty());
}

#[test]
fn placed_objects_lists_position_and_payload() {
    let mut reg = Registry::new();
    reg.place(pt(5.0, 6.0), square());
    assert_eq!(reg.placed_objects(), vec![PlacedRecord { position: pt(5.0, 6.0), payload: square() }]);
}

#[test]
fn load_replaces_contents() {
    let mut reg = Registry::new();
    let old = reg.place(pt(1.0, 1.0), square());
    reg.load(vec![
        PlacedRecord { position: pt(7.0, 8.0), payload: square() },
        PlacedRecord { position: pt(9.0, 10.0), payload: square() },
    ]);
    assert_eq!(reg.len(), 2);
    assert!(reg.get(&old).is_none());
    let positions: Vec<_> = reg.iter().map(PlacedObject::position).collect();
    assert_eq!(positions, vec![pt(7.0, 8.0), pt(9.0, 10.0)]);
}

#[test]
fn placed_record_serializes_position_and_payload() {
    let record = PlacedRecord { position: pt(1.5, 2.0), payload: square() };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["position"]["x"], 1.5);
    assert_eq!(json["position"]["y"], 2.0);
    assert_eq!(json["payload"]["points"][1][1], 10.0);
}
