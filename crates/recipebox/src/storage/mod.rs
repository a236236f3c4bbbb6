//! Storage layer for recipebox.
//!
//! [`RecipeStore`] keeps the whole recipe collection as one JSON array under a
//! single key of a [`KeyValueStore`]. Every mutation reads the collection,
//! changes it in memory and writes all of it back. There is no locking: two
//! overlapping writers race and the last write wins.

pub mod backend;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use tracing::{debug, info, warn};

use crate::error::{BackendError, Error, Result};
use crate::recipe::Recipe;

pub use backend::{KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;

/// Key the recipe collection is stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "recipes";

/// CRUD over the recipe collection.
#[derive(Debug)]
pub struct RecipeStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueStore> RecipeStore<B> {
    /// Create a store that keeps recipes under [`DEFAULT_KEY`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    /// Create a store that keeps recipes under `key`.
    #[must_use]
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key holding the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the store and return its backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Load every stored recipe in storage order.
    ///
    /// An absent or empty value is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the backend read fails or the stored
    /// value is not a recipe collection.
    pub fn list_all(&self) -> Result<Vec<Recipe>> {
        let raw = self.backend.read(&self.key).map_err(|e| self.read_failed(e))?;
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Ok(Vec::new());
        };

        let recipes: Vec<Recipe> =
            serde_json::from_str(&raw).map_err(|e| self.read_failed(e.into()))?;
        debug!("Loaded {} recipes from {}", recipes.len(), self.key);
        Ok(recipes)
    }

    /// Find the first recipe with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the collection cannot be loaded.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Recipe>> {
        Ok(self.list_all()?.into_iter().find(|r| r.id == id))
    }

    /// Number of stored recipes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the collection cannot be loaded.
    pub fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    /// Append a recipe to the collection.
    ///
    /// Ids are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the collection cannot be loaded and
    /// [`Error::StorageWrite`] if it cannot be written back.
    pub fn insert(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.list_all()?;
        recipes.push(recipe.clone());
        self.save_all(&recipes)?;
        info!("Saved recipe {} ('{}')", recipe.id, recipe.title);
        Ok(())
    }

    /// Replace the first recipe whose id matches `recipe.id`.
    ///
    /// The whole record is replaced; keeping `created_at` is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] (and writes nothing) if no recipe has that
    /// id, otherwise the same errors as [`RecipeStore::insert`].
    pub fn update(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.list_all()?;
        let Some(slot) = recipes.iter_mut().find(|r| r.id == recipe.id) else {
            warn!("Cannot update recipe {}: not found", recipe.id);
            return Err(Error::not_found(&recipe.id));
        };
        *slot = recipe.clone();
        self.save_all(&recipes)?;
        info!("Updated recipe {}", recipe.id);
        Ok(())
    }

    /// Remove every recipe with the given id.
    ///
    /// Returns how many were removed; an unknown id removes nothing and is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`RecipeStore::insert`].
    pub fn delete(&self, id: &str) -> Result<usize> {
        let mut recipes = self.list_all()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        let removed = before - recipes.len();
        self.save_all(&recipes)?;

        if removed > 0 {
            info!("Deleted {} recipe(s) with id {}", removed, id);
        } else {
            debug!("No recipe with id {} to delete", id);
        }
        Ok(removed)
    }

    fn save_all(&self, recipes: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string(recipes).map_err(|e| self.write_failed(e.into()))?;
        self.backend
            .write(&self.key, &raw)
            .map_err(|e| self.write_failed(e))
    }

    fn read_failed(&self, source: BackendError) -> Error {
        warn!("Error loading recipes from {}: {}", self.key, source);
        Error::storage_read(&self.key, source)
    }

    fn write_failed(&self, source: BackendError) -> Error {
        warn!("Error saving recipes to {}: {}", self.key, source);
        Error::storage_write(&self.key, source)
    }
}
