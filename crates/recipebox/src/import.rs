//! Recipe import.
//!
//! Converts external payloads into recipes. JSON payloads are checked for the
//! recipe shape and ingredient fields are filled with defaults; free text is
//! not parsed yet and always yields the same placeholder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};
use crate::recipe::{generate_id, ingredient_id, Ingredient, Recipe};

/// Title given to every text import.
pub const TEXT_IMPORT_TITLE: &str = "Imported Recipe";

/// Result of a text import: a recipe without identity or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    /// Recipe title.
    pub title: String,
    /// Recognized ingredients.
    pub ingredients: Vec<Ingredient>,
    /// Recognized steps.
    pub steps: Vec<String>,
}

/// Parse free recipe text.
///
/// Text recognition is not implemented: the input is ignored and the result
/// is always titled [`TEXT_IMPORT_TITLE`] with no ingredients and no steps.
#[must_use]
pub fn parse_text(_text: &str) -> ParsedRecipe {
    ParsedRecipe {
        title: TEXT_IMPORT_TITLE.to_string(),
        ingredients: Vec::new(),
        steps: Vec::new(),
    }
}

/// Parse a JSON recipe, stamping it with the current time.
///
/// # Errors
///
/// Returns [`Error::Import`] if the text is not JSON or lacks a title,
/// an `ingredients` array or a `steps` array.
pub fn parse_json(text: &str) -> Result<Recipe> {
    parse_json_at(text, Utc::now())
}

/// Parse a JSON recipe, using `now` for its id, creation time and
/// ingredient ids.
///
/// Any id or timestamp present in the payload is ignored.
///
/// # Errors
///
/// Returns [`Error::Import`] if the text is not JSON or lacks a title,
/// an `ingredients` array or a `steps` array. The specific cause is only
/// logged.
pub fn parse_json_at(text: &str, now: DateTime<Utc>) -> Result<Recipe> {
    match read_payload(text, now) {
        Ok(recipe) => {
            debug!(
                "Imported recipe '{}' with {} ingredients",
                recipe.title,
                recipe.ingredients.len()
            );
            Ok(recipe)
        }
        Err(reason) => {
            debug!("Rejected JSON recipe: {}", reason);
            Err(Error::Import)
        }
    }
}

/// Why a JSON payload was rejected.
#[derive(Error, Debug)]
enum Rejection {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("payload is not an object")]
    NotAnObject,
    #[error("missing or empty title")]
    MissingTitle,
    #[error("'{0}' is not an array")]
    NotAnArray(&'static str),
    #[error("ingredient {0} is null")]
    NullIngredient(usize),
}

fn read_payload(text: &str, now: DateTime<Utc>) -> std::result::Result<Recipe, Rejection> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(Rejection::NotAnObject)?;

    let title = match object.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        _ => return Err(Rejection::MissingTitle),
    };
    let raw_ingredients = array_field(object, "ingredients")?;
    let raw_steps = array_field(object, "steps")?;

    let ingredients = raw_ingredients
        .iter()
        .enumerate()
        .map(|(index, entry)| read_ingredient(entry, index, now))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let steps = raw_steps.iter().map(step_text).collect();

    Ok(Recipe {
        id: generate_id(now),
        title,
        ingredients,
        steps,
        created_at: now.timestamp_millis(),
    })
}

fn array_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> std::result::Result<&'a Vec<Value>, Rejection> {
    object
        .get(field)
        .and_then(Value::as_array)
        .ok_or(Rejection::NotAnArray(field))
}

fn read_ingredient(
    entry: &Value,
    index: usize,
    now: DateTime<Utc>,
) -> std::result::Result<Ingredient, Rejection> {
    // Non-object entries have no fields and fall back to defaults.
    let field = |name: &str| match entry {
        Value::Null => Err(Rejection::NullIngredient(index)),
        Value::Object(map) => Ok(map.get(name)),
        _ => Ok(None),
    };

    let name = text_or_empty(field("name")?);
    let qty = field("qty")?.map_or(0.0, quantity);
    let unit = text_or_empty(field("unit")?);

    Ok(Ingredient {
        id: ingredient_id(now, index),
        name,
        qty,
        unit,
    })
}

/// Steps are never rejected; non-text entries are kept as their JSON text.
fn step_text(step: &Value) -> String {
    match step {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Numeric value of a `qty` field; zero when it has none.
fn quantity(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        Some(qty) if qty.is_finite() && qty != 0.0 => qty,
        _ => 0.0,
    }
}

/// Parse the longest leading decimal number in `text`, ignoring leading
/// whitespace and any trailing characters ("2.5 cups" is 2.5).
fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
