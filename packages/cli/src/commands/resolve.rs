use crate::config::Config;
use anyhow::Result;
use clap::Args;
use quire_document::{DocumentTree, Row};
use quire_editor::Document;
use quire_resolver::{EffectiveProps, PropertyResolver};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Document to resolve
    pub input: PathBuf,

    /// Resolve against this theme instead of the configured one
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedDocument {
    theme_id: String,
    page: EffectiveProps,
    rows: Vec<ResolvedEntity>,
    cells: Vec<ResolvedEntity>,
}

#[derive(Debug, Serialize)]
struct ResolvedEntity {
    id: String,
    props: EffectiveProps,
}

/// Print the effective props of the page, every row and every cell as JSON
pub fn resolve(args: ResolveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut themes = config.open_themes(cwd)?;
    if let Some(theme_id) = &args.theme {
        themes.set_active_theme(theme_id)?;
    }

    let doc = Document::load(PathBuf::from(cwd).join(&args.input))?;
    let theme = themes.active_theme();
    let resolver = PropertyResolver::new(themes.active_theme_id(), &theme);

    let resolved = resolve_tree(doc.tree(), themes.active_theme_id(), &resolver);
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn resolve_tree(tree: &DocumentTree, theme_id: &str, resolver: &PropertyResolver) -> ResolvedDocument {
    let mut resolved = ResolvedDocument {
        theme_id: theme_id.to_string(),
        page: resolver.page(&tree.page),
        rows: Vec::new(),
        cells: Vec::new(),
    };
    for row in &tree.rows {
        resolve_row(row, resolver, &mut resolved);
    }
    resolved
}

fn resolve_row(row: &Row, resolver: &PropertyResolver, out: &mut ResolvedDocument) {
    out.rows.push(ResolvedEntity {
        id: row.id.clone(),
        props: resolver.row(row),
    });
    for cell in &row.cells {
        out.cells.push(ResolvedEntity {
            id: cell.id.clone(),
            props: resolver.cell(cell),
        });
        for resource in &cell.resources {
            if let Some(nested) = resource.block().nested_row() {
                resolve_row(nested, resolver, out);
            }
        }
    }
}
