//! Core recipe types for recipebox.
//!
//! This module defines the persisted [`Recipe`] and [`Ingredient`] records,
//! plus the unvalidated [`RecipeDraft`] form input and the completeness rules
//! a draft must satisfy before it is handed to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Identifier, unique within the owning recipe.
    pub id: String,
    /// What the ingredient is.
    pub name: String,
    /// How much of it.
    pub qty: f64,
    /// Unit the quantity is measured in.
    pub unit: String,
}

impl Ingredient {
    /// Create an ingredient with the given id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        qty: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            qty,
            unit: unit.into(),
        }
    }
}

/// A stored recipe.
///
/// The store persists these as a JSON array; field names are camel case
/// (`createdAt`) to stay compatible with collections written by earlier
/// versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Identifier derived from the creation time.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Ingredients in display order.
    pub ingredients: Vec<Ingredient>,
    /// Steps in execution order.
    pub steps: Vec<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Recipe {
    /// Creation time as a `DateTime`, if the stored value is in range.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Sort recipes by creation time, newest first.
    ///
    /// The sort is stable, so recipes created in the same millisecond keep
    /// their storage order.
    pub fn sort_newest_first(recipes: &mut [Recipe]) {
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

/// Generate a recipe id for the given instant.
#[must_use]
pub fn generate_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Generate the id of the `index`-th ingredient created at `now`.
#[must_use]
pub fn ingredient_id(now: DateTime<Utc>, index: usize) -> String {
    format!("{}-{index}", now.timestamp_millis())
}

/// Why a draft (or import input) was rejected before reaching the store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty or whitespace.
    #[error("Please enter a recipe title")]
    MissingTitle,
    /// No ingredient has a name, a positive quantity and a unit.
    #[error("Please add at least one complete ingredient")]
    NoCompleteIngredient,
    /// Every step is empty or whitespace.
    #[error("Please add at least one step")]
    NoSteps,
    /// Nothing was supplied to import.
    #[error("Please enter recipe data to import")]
    EmptyImport,
}

/// An ingredient row as entered, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientDraft {
    /// Existing id, when editing a stored ingredient.
    pub id: Option<String>,
    /// Entered name.
    pub name: String,
    /// Entered quantity.
    pub qty: f64,
    /// Entered unit.
    pub unit: String,
}

impl IngredientDraft {
    /// Create a new, unsaved ingredient row.
    #[must_use]
    pub fn new(name: impl Into<String>, qty: f64, unit: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            qty,
            unit: unit.into(),
        }
    }

    /// Whether this row is usable: named, positive quantity, and a unit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.qty > 0.0 && !self.unit.trim().is_empty()
    }
}

impl From<&Ingredient> for IngredientDraft {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: Some(ingredient.id.clone()),
            name: ingredient.name.clone(),
            qty: ingredient.qty,
            unit: ingredient.unit.clone(),
        }
    }
}

/// Recipe form input before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    /// Entered title.
    pub title: String,
    /// Entered ingredient rows, possibly incomplete.
    pub ingredients: Vec<IngredientDraft>,
    /// Entered step rows, possibly blank.
    pub steps: Vec<String>,
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.iter().map(IngredientDraft::from).collect(),
            steps: recipe.steps.clone(),
        }
    }
}

/// The parts of a draft that survived validation.
struct Checked {
    title: String,
    ingredients: Vec<Ingredient>,
    steps: Vec<String>,
}

impl RecipeDraft {
    /// Check the draft without consuming it.
    ///
    /// Rules are applied in order (title, ingredients, steps) and the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if !self.ingredients.iter().any(IngredientDraft::is_complete) {
            return Err(ValidationError::NoCompleteIngredient);
        }
        if !self.steps.iter().any(|step| !step.trim().is_empty()) {
            return Err(ValidationError::NoSteps);
        }
        Ok(())
    }

    /// Validate and build a brand-new recipe created at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn into_new_recipe(self, now: DateTime<Utc>) -> Result<Recipe, ValidationError> {
        let checked = self.check(now)?;
        Ok(Recipe {
            id: generate_id(now),
            title: checked.title,
            ingredients: checked.ingredients,
            steps: checked.steps,
            created_at: now.timestamp_millis(),
        })
    }

    /// Validate and build the replacement for `existing`.
    ///
    /// The id and creation time are taken from `existing`; `now` only seeds
    /// ids for ingredient rows added during the edit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn into_updated_recipe(
        self,
        existing: &Recipe,
        now: DateTime<Utc>,
    ) -> Result<Recipe, ValidationError> {
        let checked = self.check(now)?;
        Ok(Recipe {
            id: existing.id.clone(),
            title: checked.title,
            ingredients: checked.ingredients,
            steps: checked.steps,
            created_at: existing.created_at,
        })
    }

    fn check(self, now: DateTime<Utc>) -> Result<Checked, ValidationError> {
        self.validate()?;

        let ingredients = self
            .ingredients
            .into_iter()
            .enumerate()
            .filter(|(_, draft)| draft.is_complete())
            .map(|(index, draft)| Ingredient {
                id: draft.id.unwrap_or_else(|| ingredient_id(now, index)),
                name: draft.name,
                qty: draft.qty,
                unit: draft.unit,
            })
            .collect();

        let steps = self
            .steps
            .into_iter()
            .filter(|step| !step.trim().is_empty())
            .collect();

        Ok(Checked {
            title: self.title.trim().to_string(),
            ingredients,
            steps,
        })
    }
}
