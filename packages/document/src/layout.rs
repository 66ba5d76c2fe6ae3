//! Row / Cell / Resource layout tree

use crate::block::Block;
use quire_theme::ThemeSpecificProps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property layers stored on a page, row or cell.
///
/// `themes` holds the per-theme override bags. The legacy flat properties
/// written before per-theme bags existed are flattened next to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityProps {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub themes: BTreeMap<String, ThemeSpecificProps>,

    #[serde(flatten)]
    pub legacy: ThemeSpecificProps,
}

impl EntityProps {
    pub fn theme(&self, theme_id: &str) -> Option<&ThemeSpecificProps> {
        self.themes.get(theme_id)
    }

    /// Merge a partial bag into the bag for `theme_id`, creating it if needed
    pub fn merge_theme(&mut self, theme_id: &str, partial: &ThemeSpecificProps) {
        self.themes
            .entry(theme_id.to_string())
            .or_default()
            .merge(partial);
    }

    /// Replace the bag for `theme_id` wholesale
    pub fn replace_theme(&mut self, theme_id: &str, props: ThemeSpecificProps) {
        self.themes.insert(theme_id.to_string(), props);
    }
}

/// Typed wrapper around content placed in a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resource {
    Block { block: Block },
}

impl Resource {
    pub fn block(&self) -> &Block {
        match self {
            Resource::Block { block } => block,
        }
    }

    pub fn block_mut(&mut self) -> &mut Block {
        match self {
            Resource::Block { block } => block,
        }
    }

    pub fn into_block(self) -> Block {
        match self {
            Resource::Block { block } => block,
        }
    }

    pub fn id(&self) -> &str {
        self.block().id()
    }
}

impl From<Block> for Resource {
    fn from(block: Block) -> Self {
        Resource::Block { block }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub props: EntityProps,
}

impl Cell {
    pub fn new(id: impl Into<String>, resources: Vec<Resource>) -> Self {
        Self {
            id: id.into(),
            resources,
            props: EntityProps::default(),
        }
    }

    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn block_ids(&self) -> Vec<&str> {
        self.resources.iter().map(Resource::id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub props: EntityProps,
    /// Row embedded in a columns block; its cell count is its column count
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_columns_block: bool,
}

impl Row {
    pub fn new(id: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            id: id.into(),
            cells,
            props: EntityProps::default(),
            is_columns_block: false,
        }
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    /// Flag the rows of columns blocks inside this row, at any depth
    pub fn mark_nested_rows(&mut self) {
        for cell in &mut self.cells {
            for resource in &mut cell.resources {
                resource.block_mut().mark_nested_rows();
            }
        }
    }

    /// Number of resources across all cells (not counting nested rows)
    pub fn resource_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.resources.len()).sum()
    }
}
