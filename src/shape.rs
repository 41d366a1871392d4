//! Shape payloads and the palette they are dragged from.
//!
//! A [`Polygon`] is the opaque payload carried through drag and drop. It
//! travels as JSON (`{"points":[[x,y],...]}`) with vertices in a
//! 100x100 tile box, top-left origin. [`Polygon::parse`] is the decode side
//! of a drop; anything it rejects never reaches the registry.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{
    PALETTE_MAX_SHAPES, PALETTE_MIN_SHAPES, POLYGON_MAX_VERTICES, POLYGON_MIN_VERTICES, SHAPE_TILE_PX,
};

/// Why a payload was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not a polygon: {0}")]
    Json(#[from] serde_json::Error),
    #[error("polygon needs at least 3 vertices, found {found}")]
    TooFewVertices { found: usize },
    #[error("polygon has a non-finite coordinate")]
    NonFinite,
}

/// A closed polygon in tile coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<[f64; 2]>,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    /// Decode and validate a drag payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if the text is not polygon JSON, has fewer
    /// than three vertices, or contains a non-finite coordinate.
    pub fn parse(payload: &str) -> Result<Self, PayloadError> {
        let polygon: Self = serde_json::from_str(payload)?;
        polygon.validate()?;
        Ok(polygon)
    }

    /// Check the vertex count and coordinates.
    ///
    /// # Errors
    ///
    /// See [`Polygon::parse`].
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.points.len() < POLYGON_MIN_VERTICES {
            return Err(PayloadError::TooFewVertices { found: self.points.len() });
        }
        if self.points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(PayloadError::NonFinite);
        }
        Ok(())
    }

    /// Encode as a drag payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Standalone SVG markup for palette tiles and DOM-layer hosts.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let points = self
            .points
            .iter()
            .map(|[x, y]| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SHAPE_TILE_PX}" height="{SHAPE_TILE_PX}"><polygon points="{points}" fill="lightgreen" stroke="black"/></svg>"#
        )
    }

    /// A random polygon with 3 to 6 vertices at integer tile coordinates.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vertex_count = rng.random_range(POLYGON_MIN_VERTICES..=POLYGON_MAX_VERTICES);
        let points = (0..vertex_count)
            .map(|_| [f64::from(rng.random_range(0..100_u32)), f64::from(rng.random_range(0..100_u32))])
            .collect();
        Self { points }
    }
}

/// The shapes offered for dragging onto the work zone.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    shapes: Vec<Polygon>,
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the palette with 5 to 20 fresh random polygons.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = rng.random_range(PALETTE_MIN_SHAPES..=PALETTE_MAX_SHAPES);
        self.shapes = (0..count).map(|_| Polygon::random(rng)).collect();
        tracing::debug!(count, "palette generated");
    }

    /// Replace the palette with the given shapes.
    pub fn set(&mut self, shapes: Vec<Polygon>) {
        self.shapes = shapes;
    }

    #[must_use]
    pub fn shapes(&self) -> &[Polygon] {
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
