use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use quire_theme::{is_builtin, FileStorage, ThemeStore};

#[derive(Debug, Args)]
pub struct ThemesArgs {
    #[command(subcommand)]
    pub command: ThemesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ThemesCommand {
    /// List built-in and user themes
    List,

    /// Create a user theme from an existing one
    Create {
        /// Display name; made unique if already taken
        name: String,

        /// Theme to copy
        #[arg(long, default_value = quire_theme::PLAIN_ID)]
        from: String,
    },

    /// Select the theme documents resolve against
    Use {
        id: String,
    },

    /// Remove a user theme
    Remove {
        id: String,
    },
}

pub fn themes(args: ThemesArgs, cwd: &str) -> Result<()> {
    let mut config = Config::load(cwd)?;
    let mut store = config.open_themes(cwd)?;

    match args.command {
        ThemesCommand::List => list(&store),
        ThemesCommand::Create { name, from } => {
            let base = store
                .get(&from)
                .ok_or_else(|| anyhow!("Unknown theme: {}", from))?;
            let base_builtin = is_builtin(&from).then_some(from.as_str());
            let id = store.save_theme(&name, base, base_builtin)?;
            let created = store.get(&id).map(|t| t.name).unwrap_or_default();
            println!("  {} Created {} ({})", "✓".green(), created.bright_white(), id);
        }
        ThemesCommand::Use { id } => {
            store.set_active_theme(&id)?;
            config.active_theme = id.clone();
            config.save(cwd)?;
            println!("  {} Active theme: {}", "✓".green(), id.bright_white());
        }
        ThemesCommand::Remove { id } => {
            store.remove_theme(&id)?;
            if config.active_theme == id {
                config.active_theme = store.active_theme_id().to_string();
                config.save(cwd)?;
            }
            println!("  {} Removed {}", "✓".green(), id);
        }
    }

    // Only dirty in onExit mode
    if store.is_dirty() {
        store.flush()?;
    }
    Ok(())
}

fn list(store: &ThemeStore<FileStorage>) {
    for id in store.ids() {
        let name = store.get(&id).map(|t| t.name).unwrap_or_default();
        let marker = if id == store.active_theme_id() {
            "●".green()
        } else {
            " ".normal()
        };
        let kind = if is_builtin(&id) { "built-in" } else { "user" };
        println!("{} {:<20} {} {}", marker, id, name.bright_white(), kind.dimmed());
    }
}
