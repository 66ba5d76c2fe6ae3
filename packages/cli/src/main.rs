mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, migrate, resolve, themes, InitArgs, MigrateArgs, ResolveArgs, ThemesArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Quire CLI - themed block layouts
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Quire project
    Init(InitArgs),

    /// Rewrite a document in the row/cell shape
    Migrate(MigrateArgs),

    /// Print effective properties of a document as JSON
    Resolve(ResolveArgs),

    /// Manage themes
    Themes(ThemesArgs),
}

fn init_logging(cwd: &str) {
    // A broken config is reported by the command itself
    let level = Config::load(cwd)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    init_logging(&cwd);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Migrate(args) => migrate(args, &cwd),
        Command::Resolve(args) => resolve(args, &cwd),
        Command::Themes(args) => themes(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
