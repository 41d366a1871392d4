use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::canvas2d::Canvas2d;
use crate::config::{ConfigError, WorkZoneConfig};
use crate::input::{Button, DropMessage, InputState, WheelDelta};
use crate::registry::{ObjectId, PlacedRecord, Projection, Registry};
use crate::render::{self, DrawTarget, Surfaces};
use crate::shape::{Palette, Polygon};
use crate::store::{self, JsonStore, PlacementStore, StoreError};
use crate::transform;
use crate::viewport::{Point, Size, ViewportState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor while the grid is idle.
const CURSOR_GRAB: &str = "grab";
/// Cursor while the grid is being dragged.
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fresh screen transforms for every placed object, for DOM-layer hosts.
    Reprojected(Vec<Projection>),
    /// A drop was accepted.
    ObjectPlaced { id: ObjectId, position: Point },
    /// The palette contents changed and its tiles should be rebuilt.
    PaletteChanged,
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: everything that doesn't depend on the canvas elements.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Each handler runs to completion (mutate, reproject, request redraw)
/// before the next event is processed.
#[derive(Debug)]
pub struct EngineCore {
    pub config: WorkZoneConfig,
    pub viewport: ViewportState,
    pub registry: Registry,
    pub palette: Palette,
    pub input: InputState,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid_config(WorkZoneConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a host-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range.
    pub fn with_config(config: WorkZoneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WorkZoneConfig) -> Self {
        let viewport = ViewportState::new(Size::default(), config.bounds())
            .with_scale_limits(config.min_scale, config.max_scale);
        Self {
            config,
            viewport,
            registry: Registry::new(),
            palette: Palette::new(),
            input: InputState::default(),
        }
    }

    /// Actions that follow any viewport change.
    fn view_changed(&self) -> Vec<Action> {
        vec![Action::Reprojected(self.registry.reproject(&self.viewport)), Action::RenderNeeded]
    }

    // --- Layout ---

    /// Resize notification for the grid surface itself.
    pub fn set_viewport_size(&mut self, size: Size) -> Vec<Action> {
        self.viewport.set_viewport_size(size);
        tracing::debug!(width = size.width, height = size.height, "viewport resized");
        self.view_changed()
    }

    /// Resize notification for the whole host element. The axis strips take
    /// a gutter off the left and bottom; the rest is the grid.
    pub fn set_host_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let gutter = self.config.gutter();
        self.set_viewport_size(Size::new((width - gutter).max(0.0), (height - gutter).max(0.0)))
    }

    // --- Pointer / wheel ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !button.pans() {
            return Vec::new();
        }
        self.input = InputState::Panning { last_screen: screen_pt };
        vec![Action::SetCursor(CURSOR_GRABBING.to_owned())]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Panning { last_screen } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Panning { last_screen: screen_pt };
        if transform::pan(&mut self.viewport, screen_pt.x - last_screen.x, screen_pt.y - last_screen.y) {
            self.view_changed()
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if !button.pans() || matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::SetCursor(CURSOR_GRAB.to_owned())]
    }

    /// Zoom around the cursor. Scrolling up (negative `dy`) zooms in.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let zoom_delta = -delta.dy * self.config.wheel_sensitivity;
        if transform::zoom_at(&mut self.viewport, screen_pt, zoom_delta) {
            self.view_changed()
        } else {
            Vec::new()
        }
    }

    // --- Drop ---

    /// Place a dropped shape at the logical point under the drop position.
    ///
    /// A missing or malformed payload is ignored and yields no actions.
    pub fn on_drop(&mut self, msg: DropMessage) -> Vec<Action> {
        let Some(payload) = msg.payload.as_deref() else {
            tracing::debug!("drop ignored: no payload");
            return Vec::new();
        };
        let polygon = match Polygon::parse(payload) {
            Ok(polygon) => polygon,
            Err(e) => {
                tracing::debug!(error = %e, "drop ignored");
                return Vec::new();
            }
        };

        let position = self.viewport.screen_to_logical(msg.screen);
        let id = self.registry.place(position, polygon);
        tracing::debug!(%id, x = position.x, y = position.y, "shape placed");

        let mut actions = vec![Action::ObjectPlaced { id, position }];
        actions.extend(self.view_changed());
        actions
    }

    // --- Palette ---

    /// Fill the palette with freshly generated shapes.
    pub fn generate_palette<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Action> {
        self.palette.generate(rng);
        vec![Action::PaletteChanged]
    }

    /// Drag payload for the palette shape at `index`.
    #[must_use]
    pub fn drag_payload(&self, index: usize) -> Option<String> {
        let shape = self.palette.shapes().get(index)?;
        match shape.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!(error = %e, index, "could not encode drag payload");
                None
            }
        }
    }

    // --- Persistence ---

    /// Write the palette and every placed object to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error; nothing in the engine changes either way.
    pub fn save<S: PlacementStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store
            .save_palette(self.palette.shapes())
            .inspect_err(|e| tracing::warn!(error = %e, "saving palette failed"))?;
        store
            .save(&self.registry.placed_objects())
            .inspect_err(|e| tracing::warn!(error = %e, "saving placed objects failed"))?;
        tracing::debug!(palette = self.palette.len(), placed = self.registry.len(), "work zone saved");
        Ok(())
    }

    /// Replace palette and placed objects with what `store` holds.
    ///
    /// # Errors
    ///
    /// Returns the store's error. On error the engine is left unchanged.
    pub fn restore<S: PlacementStore + ?Sized>(&mut self, store: &S) -> Result<Vec<Action>, StoreError> {
        let palette = store
            .load_palette()
            .inspect_err(|e| tracing::warn!(error = %e, "loading palette failed"))?;
        let placed = store
            .load()
            .inspect_err(|e| tracing::warn!(error = %e, "loading placed objects failed"))?;
        tracing::debug!(palette = palette.len(), placed = placed.len(), "work zone restored");

        self.palette.set(palette);
        self.registry.load(placed);
        let mut actions = vec![Action::PaletteChanged];
        actions.extend(self.view_changed());
        Ok(actions)
    }

    /// Remove every placed object, keeping the palette.
    pub fn clear_placed(&mut self) -> Vec<Action> {
        self.registry.clear();
        self.view_changed()
    }

    /// Forget the saved state, then empty the palette and the work zone.
    ///
    /// # Errors
    ///
    /// Returns the store's error. On error the engine is left unchanged.
    pub fn clear_all<S: PlacementStore + ?Sized>(&mut self, store: &mut S) -> Result<Vec<Action>, StoreError> {
        store
            .clear()
            .inspect_err(|e| tracing::warn!(error = %e, "clearing storage failed"))?;
        self.palette.clear();
        self.registry.clear();
        tracing::debug!("work zone cleared");
        let mut actions = vec![Action::PaletteChanged];
        actions.extend(self.view_changed());
        Ok(actions)
    }

    // --- Render ---

    /// Redraw all three surfaces from current state.
    ///
    /// # Errors
    ///
    /// Propagates the first surface error.
    pub fn render_into<T: DrawTarget>(&self, surfaces: Surfaces<'_, T>) -> Result<(), T::Error> {
        render::draw_scene(surfaces, &self.viewport, &self.registry, self.config.grid_step, self.config.gutter())
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Position and payload of every placed object, for a persistence host.
    #[must_use]
    pub fn placed_objects(&self) -> Vec<PlacedRecord> {
        self.registry.placed_objects()
    }

    /// Current screen transforms of every placed object.
    #[must_use]
    pub fn projections(&self) -> Vec<Projection> {
        self.registry.reproject(&self.viewport)
    }
}

/// The full work zone engine. Wraps `EngineCore` and owns the browser canvases.
pub struct Engine {
    grid: Canvas2d,
    x_axis: Canvas2d,
    y_axis: Canvas2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the grid canvas and the two axis-strip canvases.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a canvas has no 2D context or the config is invalid.
    pub fn new(
        grid: HtmlCanvasElement,
        x_axis: HtmlCanvasElement,
        y_axis: HtmlCanvasElement,
        config: WorkZoneConfig,
    ) -> Result<Self, JsValue> {
        let core = EngineCore::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            grid: Canvas2d::new(grid)?,
            x_axis: Canvas2d::new(x_axis)?,
            y_axis: Canvas2d::new(y_axis)?,
            core,
        })
    }

    // --- Layout ---

    /// Resize the canvases to the host element's new size.
    pub fn set_host_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let actions = self.core.set_host_size(width, height);
        let grid = self.core.viewport.size();
        let gutter = self.core.config.gutter();
        self.grid.set_size(grid);
        self.x_axis.set_size(Size::new(grid.width, gutter));
        self.y_axis.set_size(Size::new(gutter, grid.height));
        actions
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta)
    }

    pub fn on_drop(&mut self, msg: DropMessage) -> Vec<Action> {
        self.core.on_drop(msg)
    }

    // --- Palette ---

    /// Generate a new palette seeded from the clock.
    pub fn generate_palette(&mut self) -> Vec<Action> {
        let mut rng = StdRng::seed_from_u64(js_sys::Date::now().to_bits());
        self.core.generate_palette(&mut rng)
    }

    #[must_use]
    pub fn drag_payload(&self, index: usize) -> Option<String> {
        self.core.drag_payload(index)
    }

    // --- Persistence (localStorage) ---

    fn local_store(&self) -> Result<JsonStore<web_sys::Storage>, StoreError> {
        Ok(JsonStore::with_keys(store::local_storage()?, &self.core.config.palette_key, &self.core.config.placed_key))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if `localStorage` is unavailable or rejects the write.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut store = self.local_store()?;
        self.core.save(&mut store)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if `localStorage` is unavailable or holds malformed data.
    pub fn restore(&mut self) -> Result<Vec<Action>, StoreError> {
        let store = self.local_store()?;
        self.core.restore(&store)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if `localStorage` is unavailable.
    pub fn clear_all(&mut self) -> Result<Vec<Action>, StoreError> {
        let mut store = self.local_store()?;
        self.core.clear_all(&mut store)
    }

    // --- Render ---

    /// Draw the current state to the canvases.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let surfaces = Surfaces { grid: &mut self.grid, x_axis: &mut self.x_axis, y_axis: &mut self.y_axis };
        self.core.render_into(surfaces)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        self.core.viewport()
    }

    #[must_use]
    pub fn placed_objects(&self) -> Vec<PlacedRecord> {
        self.core.placed_objects()
    }
}
