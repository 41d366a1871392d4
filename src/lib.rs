//! Pan/zoom work zone engine: a bounded logical grid that shapes are dropped onto.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! viewport (scale and logical offset), converts between screen pixels and
//! logical coordinates with Y pointing up, keeps dropped shapes pinned at the
//! logical point where they landed, and redraws the grid and both axis strips
//! after every change. The host JavaScript layer wires DOM events to the
//! engine and applies the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Viewport state, coordinate conversions and clamping |
//! | [`transform`] | Pan and anchored zoom |
//! | [`registry`] | Placed objects and their reprojection |
//! | [`render`] | Grid, axis and object drawing against a [`render::DrawTarget`] |
//! | [`canvas2d`] | `DrawTarget` over a browser 2D canvas |
//! | [`shape`] | Polygon payloads and the shape palette |
//! | [`store`] | Saving and restoring the palette and placed objects |
//! | [`input`] | Input event types and the gesture state |
//! | [`config`] | Host configuration |
//! | [`consts`] | Shared constants (grid step, zoom limits, gutter, storage keys) |

pub mod canvas2d;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod registry;
pub mod render;
pub mod shape;
pub mod store;
pub mod transform;
pub mod viewport;
