//! Plain-text rendering of recipes.

use std::fmt::Write;

use crate::import::ParsedRecipe;
use crate::recipe::{Ingredient, Recipe};

/// One line per recipe: id, title and counts.
#[must_use]
pub fn recipe_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes yet\nUse `recipebox add` to create your first recipe\n".to_string();
    }

    let width = recipes.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:<width$}  {}  ({} ingredients, {} steps)",
            recipe.id,
            recipe.title,
            recipe.ingredients.len(),
            recipe.steps.len(),
        );
    }
    out
}

/// Full recipe card: title, creation date, numbered ingredients and steps.
#[must_use]
pub fn recipe_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(out, "{}", "=".repeat(recipe.title.chars().count()));
    if let Some(created) = recipe.created() {
        let _ = writeln!(out, "Created: {}", created.format("%Y-%m-%d %H:%M"));
    }
    let _ = writeln!(out, "Id:      {}", recipe.id);
    push_body(&mut out, &recipe.ingredients, &recipe.steps);
    out
}

/// Rendering of a text import result.
#[must_use]
pub fn parsed_recipe(parsed: &ParsedRecipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", parsed.title);
    push_body(&mut out, &parsed.ingredients, &parsed.steps);
    out
}

/// `Flour - 2 cups`
#[must_use]
pub fn ingredient_line(ingredient: &Ingredient) -> String {
    format!("{} - {} {}", ingredient.name, ingredient.qty, ingredient.unit)
}

fn push_body(out: &mut String, ingredients: &[Ingredient], steps: &[String]) {
    let _ = writeln!(out, "\nIngredients");
    if ingredients.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, ingredient) in ingredients.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, ingredient_line(ingredient));
    }

    let _ = writeln!(out, "\nSteps");
    if steps.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_text;

    fn sample() -> Recipe {
        Recipe {
            id: "1700000000000".to_string(),
            title: "Pancakes".to_string(),
            ingredients: vec![
                Ingredient::new("a", "Flour", 2.0, "cups"),
                Ingredient::new("b", "Milk", 1.5, "cups"),
            ],
            steps: vec!["Mix".to_string(), "Fry".to_string()],
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_ingredient_line_formats_quantities() {
        let recipe = sample();
        assert_eq!(ingredient_line(&recipe.ingredients[0]), "Flour - 2 cups");
        assert_eq!(ingredient_line(&recipe.ingredients[1]), "Milk - 1.5 cups");
    }

    #[test]
    fn test_recipe_list_empty() {
        assert!(recipe_list(&[]).starts_with("No recipes yet"));
    }

    #[test]
    fn test_recipe_list_lines() {
        let out = recipe_list(&[sample()]);
        assert_eq!(
            out,
            "1700000000000  Pancakes  (2 ingredients, 2 steps)\n"
        );
    }

    #[test]
    fn test_recipe_detail() {
        let out = recipe_detail(&sample());
        assert!(out.starts_with("Pancakes\n========\n"));
        assert!(out.contains("Created: 2023-11-14"));
        assert!(out.contains("  1. Flour - 2 cups\n"));
        assert!(out.contains("  2. Fry\n"));
    }

    #[test]
    fn test_parsed_recipe_stub() {
        let out = parsed_recipe(&parse_text("anything"));
        assert!(out.starts_with("Imported Recipe\n"));
        assert_eq!(out.matches("(none)").count(), 2);
    }
}
