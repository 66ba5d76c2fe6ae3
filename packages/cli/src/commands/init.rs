use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Theme selected for new projects
    #[arg(short, long, default_value = quire_theme::PLAIN_ID)]
    pub theme: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Quire project...".bright_blue().bold());

    let config = Config {
        active_theme: args.theme,
        ..Config::default()
    };

    let themes_dir = config.get_themes_dir(cwd);
    if !themes_dir.exists() {
        fs::create_dir_all(&themes_dir)?;
        println!("  {} Created {}/", "✓".green(), config.themes_dir);
    }

    config.save(cwd)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: quire themes list");
    println!("  2. Run: quire resolve <document.json>");

    Ok(())
}
