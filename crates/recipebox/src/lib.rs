//! `recipebox` - A local recipe book
//!
//! This library provides recipe storage over a pluggable key-value backend,
//! recipe import from JSON, and the form validation applied before recipes
//! are saved.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod recipe;
pub mod storage;

pub use config::Config;
pub use error::{BackendError, Error, Result};
pub use import::{parse_json, parse_text, ParsedRecipe};
pub use logging::init_logging;
pub use recipe::{Ingredient, IngredientDraft, Recipe, RecipeDraft, ValidationError};
pub use storage::{KeyValueStore, MemoryStore, RecipeStore, SqliteStore};
