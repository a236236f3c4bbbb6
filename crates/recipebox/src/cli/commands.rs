//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::recipe::IngredientDraft;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Recipe id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Recipe title
    #[arg(short, long)]
    pub title: String,

    /// Ingredient as NAME:QTY:UNIT (repeatable)
    #[arg(short, long = "ingredient", value_name = "NAME:QTY:UNIT", value_parser = parse_ingredient)]
    pub ingredients: Vec<IngredientDraft>,

    /// Preparation step (repeatable, in order)
    #[arg(short, long = "step", value_name = "TEXT")]
    pub steps: Vec<String>,
}

/// Edit command arguments.
///
/// Only the given parts are replaced; ingredients and steps are replaced as
/// a whole when at least one is given.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Recipe id
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Replacement ingredient list entry as NAME:QTY:UNIT (repeatable)
    #[arg(short, long = "ingredient", value_name = "NAME:QTY:UNIT", value_parser = parse_ingredient)]
    pub ingredients: Vec<IngredientDraft>,

    /// Replacement step list entry (repeatable, in order)
    #[arg(short, long = "step", value_name = "TEXT")]
    pub steps: Vec<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Recipe id
    pub id: String,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// File to import (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Payload format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ImportFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Import payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImportFormat {
    /// JSON recipe object
    #[default]
    Json,
    /// Free recipe text
    Text,
}

/// Parse `NAME:QTY:UNIT`. The name may itself contain colons.
///
/// # Errors
///
/// Returns a message if a part is missing or the quantity is not a number.
pub fn parse_ingredient(input: &str) -> Result<IngredientDraft, String> {
    let mut parts = input.rsplitn(3, ':');
    let (Some(unit), Some(qty), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected NAME:QTY:UNIT, got '{input}'"));
    };

    let qty: f64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{qty}' in '{input}'"))?;
    if !qty.is_finite() {
        return Err(format!("invalid quantity '{qty}' in '{input}'"));
    }

    Ok(IngredientDraft::new(name.trim(), qty, unit.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let draft = parse_ingredient("Flour:2.5:cups").unwrap();
        assert_eq!(draft, IngredientDraft::new("Flour", 2.5, "cups"));
        assert!(draft.id.is_none());
    }

    #[test]
    fn test_parse_ingredient_trims_parts() {
        let draft = parse_ingredient(" Brown sugar : 1 : cup ").unwrap();
        assert_eq!(draft.name, "Brown sugar");
        assert_eq!(draft.unit, "cup");
    }

    #[test]
    fn test_parse_ingredient_name_with_colon() {
        let draft = parse_ingredient("Salt: flaky:1:pinch").unwrap();
        assert_eq!(draft.name, "Salt: flaky");
        assert_eq!(draft.qty, 1.0);
    }

    #[test]
    fn test_parse_ingredient_errors() {
        assert!(parse_ingredient("Flour").is_err());
        assert!(parse_ingredient("Flour:2").is_err());
        assert!(parse_ingredient("Flour:two:cups")
            .unwrap_err()
            .contains("invalid quantity"));
        assert!(parse_ingredient("Flour:inf:cups").is_err());
    }

    #[test]
    fn test_import_format_default() {
        assert_eq!(ImportFormat::default(), ImportFormat::Json);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
