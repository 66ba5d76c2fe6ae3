//! # Structural helpers
//!
//! Column count changes and identity-preserving deep copies.
//!
//! ## Column count
//!
//! ```text
//! 3 → 2:  [x] [y] [z]   →  [x] [y, z]
//! 2 → 4:  [x] [y]       →  [x] [y] [] []
//! ```
//!
//! Shrinking appends the resources of every removed trailing cell, in column
//! order, to the last surviving cell. Nothing is dropped.

use crate::mutations::MutationError;
use quire_document::{Block, Cell, IdGenerator, Row};
use std::collections::HashSet;

/// Take a fresh id and reserve it
pub(crate) fn reserve_id(ids: &mut IdGenerator, taken: &mut HashSet<String>) -> String {
    let id = ids.fresh(taken);
    taken.insert(id.clone());
    id
}

/// Grow or shrink `row` to `columns` cells without losing resources
pub fn set_column_count(
    row: &mut Row,
    columns: usize,
    ids: &mut IdGenerator,
    taken: &mut HashSet<String>,
) -> Result<(), MutationError> {
    if columns == 0 {
        return Err(MutationError::InvalidColumnCount(columns));
    }

    let current = row.cells.len();
    if columns > current {
        for _ in current..columns {
            row.cells.push(Cell::empty(reserve_id(ids, taken)));
        }
    } else if columns < current {
        let removed: Vec<Cell> = row.cells.drain(columns..).collect();
        let survivor = &mut row.cells[columns - 1];
        for cell in removed {
            survivor.resources.extend(cell.resources);
        }
    }

    Ok(())
}

/// Deep copy of a block with new ids for it and everything nested inside
pub fn copy_block_with_fresh_ids(
    block: &Block,
    ids: &mut IdGenerator,
    taken: &mut HashSet<String>,
) -> Block {
    let mut copy = block.clone();
    reassign_block(&mut copy, ids, taken);
    copy
}

/// Deep copy of a row with new ids for the row, its cells and all blocks
pub fn copy_row_with_fresh_ids(row: &Row, ids: &mut IdGenerator, taken: &mut HashSet<String>) -> Row {
    let mut copy = row.clone();
    reassign_row(&mut copy, ids, taken);
    copy
}

fn reassign_block(block: &mut Block, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    block.set_id(reserve_id(ids, taken));
    if let Some(row) = block.nested_row_mut() {
        reassign_row(row, ids, taken);
    }
}

fn reassign_row(row: &mut Row, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    row.id = reserve_id(ids, taken);
    for cell in &mut row.cells {
        cell.id = reserve_id(ids, taken);
        for resource in &mut cell.resources {
            reassign_block(resource.block_mut(), ids, taken);
        }
    }
}
