//! Command-line interface for recipebox.
//!
//! This module provides the CLI structure and the text rendering used by the
//! `recipebox` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_ingredient, AddCommand, ConfigCommand, DeleteCommand, EditCommand, ImportCommand,
    ImportFormat, ListCommand, ShowCommand, StatusCommand,
};

use crate::logging::Verbosity;

/// recipebox - Keep your recipes on your own machine
///
/// Create, edit, import and browse recipes stored in a local database.
#[derive(Debug, Parser)]
#[command(name = "recipebox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recipes, newest first
    List(ListCommand),

    /// Show one recipe
    Show(ShowCommand),

    /// Add a new recipe
    Add(AddCommand),

    /// Edit an existing recipe
    Edit(EditCommand),

    /// Delete a recipe
    Delete(DeleteCommand),

    /// Import a recipe from JSON or text
    Import(ImportCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "recipebox");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["recipebox", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["recipebox", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["recipebox", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["recipebox", "list", "-vv"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["recipebox", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Status(StatusCommand { json: false })));
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "recipebox",
            "add",
            "--title",
            "Pancakes",
            "-i",
            "Flour:2:cups",
            "-i",
            "Milk:1.5:cups",
            "-s",
            "Mix",
            "-s",
            "Fry",
        ]);
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.title, "Pancakes");
        assert_eq!(add.ingredients.len(), 2);
        assert_eq!(add.ingredients[1].qty, 1.5);
        assert_eq!(add.steps, vec!["Mix", "Fry"]);
    }

    #[test]
    fn test_parse_add_rejects_bad_ingredient() {
        let result = Cli::try_parse_from(["recipebox", "add", "-t", "X", "-i", "Flour"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit_partial() {
        let cli = parse(&["recipebox", "edit", "1700000000000", "--title", "Crepes"]);
        let Command::Edit(edit) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(edit.id, "1700000000000");
        assert_eq!(edit.title.as_deref(), Some("Crepes"));
        assert!(edit.ingredients.is_empty());
        assert!(edit.steps.is_empty());
    }

    #[test]
    fn test_parse_import_defaults() {
        let cli = parse(&["recipebox", "import"]);
        let Command::Import(import) = cli.command else {
            panic!("expected import command");
        };
        assert!(import.file.is_none());
        assert_eq!(import.format, ImportFormat::Json);
    }

    #[test]
    fn test_parse_import_text_file() {
        let cli = parse(&["recipebox", "import", "--format", "text", "notes.txt"]);
        let Command::Import(import) = cli.command else {
            panic!("expected import command");
        };
        assert_eq!(import.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(import.format, ImportFormat::Text);
    }

    #[test]
    fn test_parse_show_and_delete() {
        assert!(matches!(
            parse(&["recipebox", "show", "42", "--json"]).command,
            Command::Show(ShowCommand { json: true, .. })
        ));
        assert!(matches!(
            parse(&["recipebox", "delete", "42"]).command,
            Command::Delete(_)
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["recipebox", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
