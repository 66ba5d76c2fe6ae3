//! # Layout Mutations
//!
//! Semantic operations on a document tree.
//!
//! Every mutation is validated against the tree before it touches it, so a
//! failed mutation leaves the tree unchanged.
//!
//! ## Mutation Semantics
//!
//! ### MoveBlock
//! - Atomic relocation of a block into a target cell at index
//! - The index addresses the target list after the block is taken out
//! - Fails if the target cell lives inside the moved block
//!
//! ### DuplicateBlock / DuplicateRow
//! - Deep copy inserted right after the original
//! - The copy and everything nested in it get ids unused in the document
//!
//! ### SetColumnCount
//! - Grows with empty cells, shrinks by merging trailing cells into the
//!   last surviving one
//!
//! ### InsertBlock / InsertRow
//! - Fails if an id repeats inside the inserted subtree or is already taken
//! - Rows embedded in inserted columns blocks are flagged as columns rows
//!
//! ### UpdateText / UpdateBlock
//! - Atomic replacement of text or header content, or of a whole block
//! - Last write wins; no merge attempts
//!
//! ### Update*Theme / Replace*Theme
//! - Update merges a partial bag for one theme id
//! - Replace swaps the whole bag for one theme id

use crate::props_api::{merge_cell_theme, merge_row_theme, replace_cell_theme, replace_row_theme};
use crate::structure::{copy_block_with_fresh_ids, copy_row_with_fresh_ids, set_column_count};
use quire_document::{
    collect_block_ids, collect_row_ids, duplicate_block_id, duplicate_row_id, Block, DocumentTree,
    IdGenerator, Resource, Row, ThemeSpecificProps,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a block into a cell at index
    InsertBlock {
        cell_id: String,
        index: usize,
        block: Block,
    },

    /// Remove a block and everything nested in it
    RemoveBlock { block_id: String },

    /// Move a block to a cell at index
    MoveBlock {
        block_id: String,
        target_cell_id: String,
        index: usize,
    },

    DuplicateBlock { block_id: String },

    /// Replace the content of a text or header block
    UpdateText { block_id: String, content: String },

    /// Replace a block in place; the replacement keeps the original id
    UpdateBlock { block: Block },

    /// Insert a top-level row at index
    InsertRow { index: usize, row: Row },

    RemoveRow { row_id: String },

    DuplicateRow { row_id: String },

    /// Change the number of cells of any row, nested rows included
    SetColumnCount { row_id: String, columns: usize },

    UpdateRowTheme {
        row_id: String,
        theme_id: String,
        props: ThemeSpecificProps,
    },

    UpdateCellTheme {
        cell_id: String,
        theme_id: String,
        props: ThemeSpecificProps,
    },

    UpdatePageTheme {
        theme_id: String,
        props: ThemeSpecificProps,
    },

    ReplaceRowTheme {
        row_id: String,
        theme_id: String,
        props: ThemeSpecificProps,
    },

    ReplaceCellTheme {
        cell_id: String,
        theme_id: String,
        props: ThemeSpecificProps,
    },
}

/// Outcome of a mutation applied through a `Document`
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Id of the block or row the mutation created
    pub created_id: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Cell not found: {0}")]
    CellNotFound(String),

    #[error("Invalid column count: {0}")]
    InvalidColumnCount(usize),

    #[error("Identifier already in use: {0}")]
    DuplicateId(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Block is not text")]
    NotText,
}

impl Mutation {
    /// Apply mutation to the tree with validation.
    ///
    /// Returns the id of the entity the mutation created, if any.
    pub fn apply(
        &self,
        tree: &mut DocumentTree,
        ids: &mut IdGenerator,
    ) -> Result<Option<String>, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::InsertBlock { cell_id, index, block } => {
                Self::apply_insert_block(tree, cell_id, *index, block)
            }

            Mutation::RemoveBlock { block_id } => {
                Self::take_block(tree, block_id)?;
                Ok(None)
            }

            Mutation::MoveBlock { block_id, target_cell_id, index } => {
                Self::apply_move(tree, block_id, target_cell_id, *index)
            }

            Mutation::DuplicateBlock { block_id } => Self::apply_duplicate_block(tree, ids, block_id),

            Mutation::UpdateText { block_id, content } => {
                Self::apply_update_text(tree, block_id, content)
            }

            Mutation::UpdateBlock { block } => {
                let target = tree
                    .find_block_mut(block.id())
                    .ok_or_else(|| MutationError::BlockNotFound(block.id().to_string()))?;
                *target = block.clone();
                target.mark_nested_rows();
                Ok(None)
            }

            Mutation::InsertRow { index, row } => {
                let index = (*index).min(tree.rows.len());
                let mut row = row.clone();
                row.mark_nested_rows();
                let created = row.id.clone();
                tree.rows.insert(index, row);
                Ok(Some(created))
            }

            Mutation::RemoveRow { row_id } => {
                tree.rows.retain(|row| &row.id != row_id);
                Ok(None)
            }

            Mutation::DuplicateRow { row_id } => Self::apply_duplicate_row(tree, ids, row_id),

            Mutation::SetColumnCount { row_id, columns } => {
                let mut taken = tree.all_ids();
                let row = tree
                    .find_row_mut(row_id)
                    .ok_or_else(|| MutationError::RowNotFound(row_id.clone()))?;
                set_column_count(row, *columns, ids, &mut taken)?;
                Ok(None)
            }

            Mutation::UpdateRowTheme { row_id, theme_id, props } => {
                merge_row_theme(tree, row_id, theme_id, props)?;
                Ok(None)
            }

            Mutation::UpdateCellTheme { cell_id, theme_id, props } => {
                merge_cell_theme(tree, cell_id, theme_id, props)?;
                Ok(None)
            }

            Mutation::UpdatePageTheme { theme_id, props } => {
                tree.page.merge_theme(theme_id, props);
                Ok(None)
            }

            Mutation::ReplaceRowTheme { row_id, theme_id, props } => {
                replace_row_theme(tree, row_id, theme_id, props)?;
                Ok(None)
            }

            Mutation::ReplaceCellTheme { cell_id, theme_id, props } => {
                replace_cell_theme(tree, cell_id, theme_id, props)?;
                Ok(None)
            }
        }
    }

    /// Check the mutation against the tree without changing it
    pub fn validate(&self, tree: &DocumentTree) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { cell_id, block, .. } => {
                if tree.find_cell(cell_id).is_none() {
                    return Err(MutationError::CellNotFound(cell_id.clone()));
                }
                if let Some(id) = duplicate_block_id(block) {
                    return Err(MutationError::DuplicateId(id));
                }
                let mut incoming = HashSet::new();
                collect_block_ids(block, &mut incoming);
                Self::check_ids_free(tree, incoming)
            }

            Mutation::RemoveBlock { block_id } | Mutation::DuplicateBlock { block_id } => {
                Self::require_block(tree, block_id).map(|_| ())
            }

            Mutation::MoveBlock { block_id, target_cell_id, .. } => {
                let block = Self::require_block(tree, block_id)?;
                if tree.find_cell(target_cell_id).is_none() {
                    return Err(MutationError::CellNotFound(target_cell_id.clone()));
                }
                let mut moved = HashSet::new();
                collect_block_ids(block, &mut moved);
                if moved.contains(target_cell_id) {
                    return Err(MutationError::CycleDetected);
                }
                Ok(())
            }

            Mutation::UpdateText { block_id, .. } => match Self::require_block(tree, block_id)? {
                Block::Text(_) | Block::Header(_) => Ok(()),
                _ => Err(MutationError::NotText),
            },

            Mutation::UpdateBlock { block } => {
                let current = Self::require_block(tree, block.id())?;
                if let Some(id) = duplicate_block_id(block) {
                    return Err(MutationError::DuplicateId(id));
                }

                // Ids of the replaced subtree may be reused by the replacement
                let mut released = HashSet::new();
                collect_block_ids(current, &mut released);
                let mut incoming = HashSet::new();
                collect_block_ids(block, &mut incoming);

                let existing = tree.all_ids();
                match incoming
                    .into_iter()
                    .find(|id| existing.contains(id) && !released.contains(id))
                {
                    Some(id) => Err(MutationError::DuplicateId(id)),
                    None => Ok(()),
                }
            }

            Mutation::InsertRow { row, .. } => {
                if row.is_columns_block {
                    return Err(MutationError::InvalidStructure(
                        "columns rows belong inside a columns block".to_string(),
                    ));
                }
                if let Some(id) = duplicate_row_id(row) {
                    return Err(MutationError::DuplicateId(id));
                }
                let mut incoming = HashSet::new();
                collect_row_ids(row, &mut incoming);
                Self::check_ids_free(tree, incoming)
            }

            Mutation::RemoveRow { row_id } | Mutation::DuplicateRow { row_id } => {
                Self::require_top_level_row(tree, row_id)
            }

            Mutation::SetColumnCount { row_id, columns } => {
                if tree.find_row(row_id).is_none() {
                    return Err(MutationError::RowNotFound(row_id.clone()));
                }
                if *columns == 0 {
                    return Err(MutationError::InvalidColumnCount(*columns));
                }
                Ok(())
            }

            Mutation::UpdateRowTheme { row_id, .. } | Mutation::ReplaceRowTheme { row_id, .. } => {
                match tree.find_row(row_id) {
                    Some(_) => Ok(()),
                    None => Err(MutationError::RowNotFound(row_id.clone())),
                }
            }

            Mutation::UpdateCellTheme { cell_id, .. }
            | Mutation::ReplaceCellTheme { cell_id, .. } => match tree.find_cell(cell_id) {
                Some(_) => Ok(()),
                None => Err(MutationError::CellNotFound(cell_id.clone())),
            },

            Mutation::UpdatePageTheme { .. } => Ok(()),
        }
    }

    fn require_block<'a>(tree: &'a DocumentTree, block_id: &str) -> Result<&'a Block, MutationError> {
        tree.find_block(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))
    }

    fn require_top_level_row(tree: &DocumentTree, row_id: &str) -> Result<(), MutationError> {
        if tree.row_index(row_id).is_some() {
            return Ok(());
        }
        if tree.find_row(row_id).is_some() {
            return Err(MutationError::InvalidStructure(format!(
                "row {} is owned by a columns block",
                row_id
            )));
        }
        Err(MutationError::RowNotFound(row_id.to_string()))
    }

    fn check_ids_free(tree: &DocumentTree, incoming: HashSet<String>) -> Result<(), MutationError> {
        let existing = tree.all_ids();
        match incoming.into_iter().find(|id| existing.contains(id)) {
            Some(id) => Err(MutationError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    fn apply_insert_block(
        tree: &mut DocumentTree,
        cell_id: &str,
        index: usize,
        block: &Block,
    ) -> Result<Option<String>, MutationError> {
        let cell = tree
            .find_cell_mut(cell_id)
            .ok_or_else(|| MutationError::CellNotFound(cell_id.to_string()))?;
        let index = index.min(cell.resources.len());
        let mut block = block.clone();
        block.mark_nested_rows();
        let block_id = block.id().to_string();
        cell.resources.insert(index, Resource::from(block));
        Ok(Some(block_id))
    }

    /// Detach a block from its cell
    fn take_block(tree: &mut DocumentTree, block_id: &str) -> Result<Block, MutationError> {
        let location = tree
            .locate_block(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        let cell = tree
            .find_cell_mut(&location.cell_id)
            .ok_or_else(|| MutationError::CellNotFound(location.cell_id.clone()))?;
        Ok(cell.resources.remove(location.index).into_block())
    }

    fn apply_move(
        tree: &mut DocumentTree,
        block_id: &str,
        target_cell_id: &str,
        index: usize,
    ) -> Result<Option<String>, MutationError> {
        let block = Self::take_block(tree, block_id)?;

        // Validation guarantees the target survives the removal
        let target = tree
            .find_cell_mut(target_cell_id)
            .ok_or_else(|| MutationError::CellNotFound(target_cell_id.to_string()))?;
        let index = index.min(target.resources.len());
        target.resources.insert(index, Resource::from(block));

        debug!(block = %block_id, cell = %target_cell_id, index, "Moved block");
        Ok(None)
    }

    fn apply_duplicate_block(
        tree: &mut DocumentTree,
        ids: &mut IdGenerator,
        block_id: &str,
    ) -> Result<Option<String>, MutationError> {
        let location = tree
            .locate_block(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;

        let mut taken = tree.all_ids();
        let original = Self::require_block(tree, block_id)?;
        let copy = copy_block_with_fresh_ids(original, ids, &mut taken);
        let copy_id = copy.id().to_string();

        let cell = tree
            .find_cell_mut(&location.cell_id)
            .ok_or_else(|| MutationError::CellNotFound(location.cell_id.clone()))?;
        cell.resources.insert(location.index + 1, Resource::from(copy));

        debug!(original = %block_id, copy = %copy_id, "Duplicated block");
        Ok(Some(copy_id))
    }

    fn apply_duplicate_row(
        tree: &mut DocumentTree,
        ids: &mut IdGenerator,
        row_id: &str,
    ) -> Result<Option<String>, MutationError> {
        let index = tree
            .row_index(row_id)
            .ok_or_else(|| MutationError::RowNotFound(row_id.to_string()))?;

        let mut taken = tree.all_ids();
        let copy = copy_row_with_fresh_ids(&tree.rows[index], ids, &mut taken);
        let copy_id = copy.id.clone();
        tree.rows.insert(index + 1, copy);

        debug!(original = %row_id, copy = %copy_id, "Duplicated row");
        Ok(Some(copy_id))
    }

    fn apply_update_text(
        tree: &mut DocumentTree,
        block_id: &str,
        content: &str,
    ) -> Result<Option<String>, MutationError> {
        let block = tree
            .find_block_mut(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        match block {
            Block::Text(text) => text.content = content.to_string(),
            Block::Header(header) => header.text = content.to_string(),
            _ => return Err(MutationError::NotText),
        }
        Ok(None)
    }
}

/// Current text of a text or header block
pub fn block_text(block: &Block) -> Option<&str> {
    match block {
        Block::Text(text) => Some(&text.content),
        Block::Header(header) => Some(&header.text),
        _ => None,
    }
}
