use anyhow::Result;
use clap::Args;
use colored::Colorize;
use quire_editor::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Document to migrate
    pub input: PathBuf,

    /// Write the result here instead of rewriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Rewrite a document in the row/cell shape, lifting legacy sections
pub fn migrate(args: MigrateArgs, cwd: &str) -> Result<()> {
    let input = PathBuf::from(cwd).join(&args.input);
    let mut doc = Document::load(&input)?;

    let target = match &args.output {
        Some(output) => {
            let output = PathBuf::from(cwd).join(output);
            fs::write(&output, doc.to_json()?)?;
            output
        }
        None => {
            doc.save()?;
            input.clone()
        }
    };

    let rows = doc.tree().rows.len();
    println!(
        "  {} {} → {} ({} rows)",
        "✓".green(),
        args.input.display(),
        target.display(),
        rows
    );

    Ok(())
}
