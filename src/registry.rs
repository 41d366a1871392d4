//! Placed-object registry: shapes pinned at fixed logical coordinates.
//!
//! Objects are created on drop and never mutated afterwards; the only other
//! mutations are [`Registry::clear`] and [`Registry::load`]. Screen positions
//! are never stored. [`Registry::reproject`] derives them from the current
//! [`ViewportState`] every time it is called.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shape::Polygon;
use crate::viewport::{Point, ViewportState};

/// Unique identifier for a placed object.
pub type ObjectId = Uuid;

/// A shape dropped onto the work zone.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    id: ObjectId,
    position: Point,
    payload: Polygon,
}

impl PlacedObject {
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Logical position assigned at drop time.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn payload(&self) -> &Polygon {
        &self.payload
    }
}

/// The persisted form of a placed object: position and payload, no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRecord {
    pub position: Point,
    pub payload: Polygon,
}

/// Display transform for one placed object under the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    /// Screen position of the object's logical anchor.
    pub position: Point,
    /// Magnification to draw the object at (the viewport scale).
    pub scale: f64,
}

impl ScreenTransform {
    /// CSS `transform` value for hosts that show objects as positioned DOM nodes
    /// with `transform-origin: 0 0`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.position.x, self.position.y, self.scale)
    }
}

/// One entry of a reprojection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub id: ObjectId,
    pub transform: ScreenTransform,
}

/// Owns every placed object, in placement order.
#[derive(Debug, Default)]
pub struct Registry {
    objects: Vec<PlacedObject>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new object at `position` and return its id.
    pub fn place(&mut self, position: Point, payload: Polygon) -> ObjectId {
        let id = Uuid::new_v4();
        self.objects.push(PlacedObject { id, position, payload });
        id
    }

    /// Screen transform of every object under `viewport`, in placement order.
    #[must_use]
    pub fn reproject(&self, viewport: &ViewportState) -> Vec<Projection> {
        let scale = viewport.scale();
        self.objects
            .iter()
            .map(|obj| Projection {
                id: obj.id,
                transform: ScreenTransform { position: viewport.logical_to_screen(obj.position), scale },
            })
            .collect()
    }

    /// Remove every object. Idempotent.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Position and payload of every object, for persistence.
    #[must_use]
    pub fn placed_objects(&self) -> Vec<PlacedRecord> {
        self.objects
            .iter()
            .map(|obj| PlacedRecord { position: obj.position, payload: obj.payload.clone() })
            .collect()
    }

    /// Replace all objects with persisted records. Each record gets a fresh id.
    pub fn load(&mut self, records: Vec<PlacedRecord>) {
        self.objects.clear();
        for record in records {
            self.place(record.position, record.payload);
        }
    }

    /// Look up an object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|obj| obj.id == *id)
    }

    /// All objects in placement order (bottom first when drawn).
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
