//! Persistence collaborator: saving and restoring the palette and placed objects.
//!
//! DESIGN
//! ======
//! The engine only sees [`PlacementStore`]. The shipped implementation,
//! [`JsonStore`], keeps JSON documents under two keys of any
//! [`KeyValueStorage`]: browser `localStorage` in production, an in-memory
//! map in tests. Stored screen coordinates do not exist; only logical
//! positions and payloads are written.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::consts::{PALETTE_KEY, PLACED_KEY};
use crate::registry::PlacedRecord;
use crate::shape::Polygon;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Backend(String),
    #[error("stored data is malformed: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode data: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Where the work zone saves to and restores from.
pub trait PlacementStore {
    /// Placed objects from the last save. Empty if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the data is malformed.
    fn load(&self) -> Result<Vec<PlacedRecord>, StoreError>;

    /// Replace the saved placed objects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend fails.
    fn save(&mut self, placed: &[PlacedRecord]) -> Result<(), StoreError>;

    /// Palette shapes from the last save. Empty if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the data is malformed.
    fn load_palette(&self) -> Result<Vec<Polygon>, StoreError>;

    /// Replace the saved palette.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend fails.
    fn save_palette(&mut self, palette: &[Polygon]) -> Result<(), StoreError>;

    /// Forget everything saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Minimal string key-value storage, the shape of the Web Storage API.
pub trait KeyValueStorage {
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the storage cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the storage cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process-local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

fn backend_error(err: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}

impl KeyValueStorage for web_sys::Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        web_sys::Storage::get_item(self, key).map_err(|e| backend_error(&e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        web_sys::Storage::set_item(self, key, value).map_err(|e| backend_error(&e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        web_sys::Storage::remove_item(self, key).map_err(|e| backend_error(&e))
    }
}

/// The window's `localStorage`.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] outside a browser or when storage is disabled.
pub fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::Backend("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| backend_error(&e))?
        .ok_or_else(|| StoreError::Backend("localStorage disabled".to_owned()))
}

/// [`PlacementStore`] that writes JSON documents into a [`KeyValueStorage`].
#[derive(Debug)]
pub struct JsonStore<S> {
    storage: S,
    palette_key: String,
    placed_key: String,
}

impl<S: KeyValueStorage> JsonStore<S> {
    /// Store under the default `"polygons"` / `"placed_polygons"` keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, PALETTE_KEY, PLACED_KEY)
    }

    pub fn with_keys(storage: S, palette_key: &str, placed_key: &str) -> Self {
        Self { storage, palette_key: palette_key.to_owned(), placed_key: placed_key.to_owned() }
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.storage.get_item(key)? {
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn write<T: serde::Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items).map_err(StoreError::Encode)?;
        self.storage.set_item(key, &json)
    }
}

impl<S: KeyValueStorage> PlacementStore for JsonStore<S> {
    fn load(&self) -> Result<Vec<PlacedRecord>, StoreError> {
        let records: Vec<PlacedRecord> = self.read(&self.placed_key)?;
        let total = records.len();
        let valid: Vec<PlacedRecord> = records
            .into_iter()
            .filter(|r| r.payload.validate().is_ok() && r.position.x.is_finite() && r.position.y.is_finite())
            .collect();
        if valid.len() < total {
            tracing::warn!(skipped = total - valid.len(), "dropped invalid placed objects from storage");
        }
        Ok(valid)
    }

    fn save(&mut self, placed: &[PlacedRecord]) -> Result<(), StoreError> {
        let key = self.placed_key.clone();
        self.write(&key, placed)
    }

    fn load_palette(&self) -> Result<Vec<Polygon>, StoreError> {
        let shapes: Vec<Polygon> = self.read(&self.palette_key)?;
        Ok(shapes.into_iter().filter(|s| s.validate().is_ok()).collect())
    }

    fn save_palette(&mut self, palette: &[Polygon]) -> Result<(), StoreError> {
        let key = self.palette_key.clone();
        self.write(&key, palette)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.palette_key)?;
        self.storage.remove_item(&self.placed_key)
    }
}
