//! `recipebox` - CLI for the local recipe book
//!
//! This binary wires the command-line interface to the recipe store and the
//! importer.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;

use recipebox::cli::{
    render, AddCommand, Cli, Command, ConfigCommand, EditCommand, ImportCommand, ImportFormat,
};
use recipebox::{
    init_logging, import, Config, Recipe, RecipeDraft, RecipeStore, SqliteStore, ValidationError,
};

type Store = RecipeStore<SqliteStore>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::List(cmd) => handle_list(&open_store(&config)?, cmd.json),
        Command::Show(cmd) => handle_show(&open_store(&config)?, &cmd.id, cmd.json),
        Command::Add(cmd) => handle_add(&open_store(&config)?, cmd),
        Command::Edit(cmd) => handle_edit(&open_store(&config)?, cmd),
        Command::Delete(cmd) => handle_delete(&open_store(&config)?, &cmd.id),
        Command::Import(cmd) => handle_import(&open_store(&config)?, &cmd),
        Command::Status(cmd) => handle_status(&open_store(&config)?, cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let backend = SqliteStore::open(config.database_path())
        .with_context(|| format!("cannot open {}", config.database_path().display()))?;
    Ok(RecipeStore::with_key(backend, config.storage.key.clone()))
}

fn handle_list(store: &Store, json: bool) -> anyhow::Result<()> {
    let mut recipes = store.list_all().context("failed to load recipes")?;
    Recipe::sort_newest_first(&mut recipes);

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        print!("{}", render::recipe_list(&recipes));
    }
    Ok(())
}

fn handle_show(store: &Store, id: &str, json: bool) -> anyhow::Result<()> {
    let Some(recipe) = store.get_by_id(id).context("failed to get recipe")? else {
        bail!("recipe not found: {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        print!("{}", render::recipe_detail(&recipe));
    }
    Ok(())
}

fn handle_add(store: &Store, cmd: AddCommand) -> anyhow::Result<()> {
    let draft = RecipeDraft {
        title: cmd.title,
        ingredients: cmd.ingredients,
        steps: cmd.steps,
    };
    let recipe = draft.into_new_recipe(Utc::now())?;

    store.insert(&recipe).context("failed to save recipe")?;
    println!("Recipe saved successfully ({})", recipe.id);
    Ok(())
}

fn handle_edit(store: &Store, cmd: EditCommand) -> anyhow::Result<()> {
    let Some(existing) = store.get_by_id(&cmd.id).context("failed to get recipe")? else {
        bail!("recipe not found: {}", cmd.id);
    };

    let mut draft = RecipeDraft::from(&existing);
    if let Some(title) = cmd.title {
        draft.title = title;
    }
    if !cmd.ingredients.is_empty() {
        draft.ingredients = cmd.ingredients;
    }
    if !cmd.steps.is_empty() {
        draft.steps = cmd.steps;
    }
    let recipe = draft.into_updated_recipe(&existing, Utc::now())?;

    store.update(&recipe).context("failed to update recipe")?;
    println!("Recipe updated successfully");
    Ok(())
}

fn handle_delete(store: &Store, id: &str) -> anyhow::Result<()> {
    let removed = store.delete(id).context("failed to delete recipe")?;
    if removed == 0 {
        println!("No recipe with id {id}");
    } else {
        println!("Recipe deleted");
    }
    Ok(())
}

fn handle_import(store: &Store, cmd: &ImportCommand) -> anyhow::Result<()> {
    let text = match &cmd.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            text
        }
    };
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyImport.into());
    }

    match cmd.format {
        ImportFormat::Json => {
            let recipe = import::parse_json(&text).context("failed to import JSON recipe")?;
            store.insert(&recipe).context("failed to save recipe")?;
            println!("Recipe imported successfully ({})", recipe.id);
        }
        ImportFormat::Text => {
            let parsed = import::parse_text(&text);
            print!("{}", render::parsed_recipe(&parsed));
            println!();
            println!("Note: text parsing is not yet implemented; nothing was saved.");
        }
    }
    Ok(())
}

fn handle_status(store: &Store, json: bool) -> anyhow::Result<()> {
    let count = store.count().context("failed to load recipes")?;
    let last_saved = store.backend().last_updated(store.key())?;

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "storage_key": store.key(),
            "recipes": count,
            "last_saved": last_saved.map(|t| t.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("recipebox status");
        println!("----------------");
        println!("Database:    {}", store.backend().path().display());
        println!("Storage key: {}", store.key());
        println!("Recipes:     {count}");
        match last_saved {
            Some(t) => println!("Last saved:  {}", t.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("Last saved:  never"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Storage key:    {}", config.storage.key);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
