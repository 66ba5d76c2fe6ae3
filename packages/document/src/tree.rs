//! # Document Tree
//!
//! Root of the layout model: page-level props plus an ordered list of rows.
//! Lookups descend into the rows embedded in columns blocks, so every row,
//! cell and block is reachable by id from the root.

use crate::block::Block;
use crate::error::DocumentError;
use crate::ids::IdGenerator;
use crate::layout::{Cell, EntityProps, Row};
use crate::legacy::{migrate_sections, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default)]
    pub page: EntityProps,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Either interchange shape: `{ rows }` or legacy `{ sections }`
#[derive(Debug, Deserialize)]
struct Interchange {
    #[serde(default)]
    page: EntityProps,
    #[serde(default)]
    rows: Option<Vec<Row>>,
    #[serde(default)]
    sections: Option<Vec<Section>>,
}

/// Where a block lives: owning cell and position in its resource list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocation {
    pub cell_id: String,
    pub index: usize,
}

impl DocumentTree {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            page: EntityProps::default(),
            rows,
        }
    }

    /// Parse a document, migrating the legacy shape when there are no rows
    pub fn from_json(source: &str, ids: &mut IdGenerator) -> Result<Self, DocumentError> {
        let interchange: Interchange = serde_json::from_str(source)?;

        let rows = match (interchange.rows, interchange.sections) {
            (Some(rows), _) => rows,
            (None, Some(sections)) => vec![migrate_sections(sections, ids)],
            (None, None) => Vec::new(),
        };

        let tree = Self {
            page: interchange.page,
            rows,
        };
        tree.validate()?;
        debug!(rows = tree.rows.len(), "Loaded document tree");
        Ok(tree)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every row, cell and block id in the document
    pub fn all_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        for row in &self.rows {
            collect_row_ids(row, &mut ids);
        }
        ids
    }

    /// Fail on the first id used twice anywhere in the tree
    pub fn validate(&self) -> Result<(), DocumentError> {
        let duplicate = first_repeated_id(|visit| {
            for row in &self.rows {
                walk_row(row, visit);
            }
        });
        match duplicate {
            Some(id) => Err(DocumentError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    pub fn find_row(&self, id: &str) -> Option<&Row> {
        find_row_in(&self.rows, id)
    }

    pub fn find_row_mut(&mut self, id: &str) -> Option<&mut Row> {
        find_row_in_mut(&mut self.rows, id)
    }

    pub fn find_cell(&self, id: &str) -> Option<&Cell> {
        find_cell_in(&self.rows, id)
    }

    pub fn find_cell_mut(&mut self, id: &str) -> Option<&mut Cell> {
        find_cell_in_mut(&mut self.rows, id)
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        let location = self.locate_block(id)?;
        let cell = self.find_cell(&location.cell_id)?;
        Some(cell.resources[location.index].block())
    }

    pub fn find_block_mut(&mut self, id: &str) -> Option<&mut Block> {
        let location = self.locate_block(id)?;
        let cell = self.find_cell_mut(&location.cell_id)?;
        Some(cell.resources[location.index].block_mut())
    }

    /// Owning cell and index of a block
    pub fn locate_block(&self, id: &str) -> Option<BlockLocation> {
        locate_in(&self.rows, id)
    }

    /// Index of a top-level row
    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}

/// Add the ids of `block` and everything nested in it to `ids`
pub fn collect_block_ids(block: &Block, ids: &mut HashSet<String>) {
    walk_block(block, &mut |id| {
        ids.insert(id.to_string());
    });
}

pub fn collect_row_ids(row: &Row, ids: &mut HashSet<String>) {
    walk_row(row, &mut |id| {
        ids.insert(id.to_string());
    });
}

/// First id used twice inside `block` and everything nested in it
pub fn duplicate_block_id(block: &Block) -> Option<String> {
    first_repeated_id(|visit| walk_block(block, visit))
}

/// First id used twice inside `row`, counting the row and its cells
pub fn duplicate_row_id(row: &Row) -> Option<String> {
    first_repeated_id(|visit| walk_row(row, visit))
}

fn first_repeated_id(walk: impl FnOnce(&mut dyn FnMut(&str))) -> Option<String> {
    let mut seen = HashSet::new();
    let mut duplicate = None;
    walk(&mut |id| {
        if !seen.insert(id.to_string()) && duplicate.is_none() {
            duplicate = Some(id.to_string());
        }
    });
    duplicate
}

fn walk_row(row: &Row, visit: &mut dyn FnMut(&str)) {
    visit(&row.id);
    for cell in &row.cells {
        visit(&cell.id);
        for resource in &cell.resources {
            walk_block(resource.block(), visit);
        }
    }
}

fn walk_block(block: &Block, visit: &mut dyn FnMut(&str)) {
    visit(block.id());
    if let Some(row) = block.nested_row() {
        walk_row(row, visit);
    }
}

fn nested_rows(row: &Row) -> impl Iterator<Item = &Row> {
    row.cells
        .iter()
        .flat_map(|cell| cell.resources.iter())
        .filter_map(|resource| resource.block().nested_row())
}

fn find_row_in<'a>(rows: &'a [Row], id: &str) -> Option<&'a Row> {
    for row in rows {
        if row.id == id {
            return Some(row);
        }
        for nested in nested_rows(row) {
            if let Some(found) = find_row_in(std::slice::from_ref(nested), id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_row_in_mut<'a>(rows: &'a mut [Row], id: &str) -> Option<&'a mut Row> {
    for row in rows.iter_mut() {
        if row.id == id {
            return Some(row);
        }
        for cell in row.cells.iter_mut() {
            for resource in cell.resources.iter_mut() {
                if let Some(nested) = resource.block_mut().nested_row_mut() {
                    if let Some(found) = find_row_in_mut(std::slice::from_mut(nested), id) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

fn find_cell_in<'a>(rows: &'a [Row], id: &str) -> Option<&'a Cell> {
    for row in rows {
        if let Some(cell) = row.cells.iter().find(|cell| cell.id == id) {
            return Some(cell);
        }
        for nested in nested_rows(row) {
            if let Some(found) = find_cell_in(std::slice::from_ref(nested), id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_cell_in_mut<'a>(rows: &'a mut [Row], id: &str) -> Option<&'a mut Cell> {
    for row in rows.iter_mut() {
        for cell in row.cells.iter_mut() {
            if cell.id == id {
                return Some(cell);
            }
            for resource in cell.resources.iter_mut() {
                if let Some(nested) = resource.block_mut().nested_row_mut() {
                    if let Some(found) = find_cell_in_mut(std::slice::from_mut(nested), id) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

fn locate_in(rows: &[Row], id: &str) -> Option<BlockLocation> {
    for row in rows {
        for cell in &row.cells {
            if let Some(index) = cell.resources.iter().position(|r| r.id() == id) {
                return Some(BlockLocation {
                    cell_id: cell.id.clone(),
                    index,
                });
            }
        }
        for nested in nested_rows(row) {
            if let Some(found) = locate_in(std::slice::from_ref(nested), id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DocumentTree {
        let source = json!({
            "rows": [{
                "id": "r1",
                "cells": [{
                    "id": "c1",
                    "resources": [
                        { "type": "block", "block": { "type": "text", "id": "t1" } },
                        { "type": "block", "block": {
                            "type": "columns", "id": "cols",
                            "row": {
                                "id": "r2", "isColumnsBlock": true,
                                "cells": [
                                    { "id": "c2", "resources": [
                                        { "type": "block", "block": { "type": "text", "id": "t2" } }
                                    ] },
                                    { "id": "c3" }
                                ]
                            }
                        } }
                    ]
                }]
            }]
        });
        DocumentTree::from_json(&source.to_string(), &mut IdGenerator::from_seed("t")).unwrap()
    }

    #[test]
    fn test_lookup_reaches_nested_rows() {
        let tree = sample();
        assert!(tree.find_row("r2").unwrap().is_columns_block);
        assert_eq!(tree.find_cell("c3").unwrap().resources.len(), 0);
        assert_eq!(tree.find_block("t2").unwrap().kind(), "text");
        assert_eq!(
            tree.locate_block("t2"),
            Some(BlockLocation { cell_id: "c2".to_string(), index: 0 })
        );
        assert_eq!(
            tree.locate_block("cols"),
            Some(BlockLocation { cell_id: "c1".to_string(), index: 1 })
        );
        assert!(tree.locate_block("missing").is_none());
    }

    #[test]
    fn test_mutable_lookup() {
        let mut tree = sample();
        tree.find_cell_mut("c3").unwrap().resources.clear();
        tree.find_row_mut("r2").unwrap().id = "renamed".to_string();
        assert!(tree.find_row("renamed").is_some());
        assert!(tree.find_block_mut("t1").is_some());
    }

    #[test]
    fn test_all_ids() {
        let ids = sample().all_ids();
        for id in ["r1", "c1", "t1", "cols", "r2", "c2", "t2", "c3"] {
            assert!(ids.contains(id), "missing {}", id);
        }
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let source = json!({
            "rows": [
                { "id": "r1", "cells": [{ "id": "c1", "resources": [
                    { "type": "block", "block": { "type": "text", "id": "dup" } },
                    { "type": "block", "block": { "type": "text", "id": "dup" } }
                ] }] }
            ]
        });
        let result = DocumentTree::from_json(&source.to_string(), &mut IdGenerator::from_seed("t"));
        assert!(matches!(result, Err(DocumentError::DuplicateId(id)) if id == "dup"));
    }

    #[test]
    fn test_legacy_document_is_migrated() {
        let source = json!({
            "sections": [
                { "type": "simple", "slots": { "main": [
                    { "type": "text", "id": "blockA" },
                    { "type": "header", "id": "blockB", "text": "Intro" }
                ] } }
            ]
        });
        let tree =
            DocumentTree::from_json(&source.to_string(), &mut IdGenerator::from_seed("t")).unwrap();
        assert_eq!(tree.rows.len(), 1);
        assert_eq!(tree.rows[0].cells.len(), 1);
        assert_eq!(tree.rows[0].cells[0].block_ids(), vec!["blockA", "blockB"]);
    }

    #[test]
    fn test_rows_win_over_sections() {
        let source = json!({
            "rows": [],
            "sections": [{ "type": "simple", "slots": { "main": [{ "type": "text", "id": "x" }] } }]
        });
        let tree =
            DocumentTree::from_json(&source.to_string(), &mut IdGenerator::from_seed("t")).unwrap();
        assert!(tree.rows.is_empty());
    }

    #[test]
    fn test_repeated_ids_inside_a_subtree() {
        use crate::block::TextBlock;
        use crate::layout::{Cell, Resource};

        let text = |id: &str| {
            Resource::from(Block::Text(TextBlock {
                id: id.to_string(),
                title: String::new(),
                content: String::new(),
            }))
        };

        let row = Row::new("same", vec![Cell::empty("same")]);
        assert_eq!(duplicate_row_id(&row), Some("same".to_string()));

        let columns = Block::Columns(crate::block::ColumnsBlock::new(
            "cols",
            "",
            Row::new(
                "nested",
                vec![Cell::new("n1", vec![text("dup")]), Cell::new("n2", vec![text("dup")])],
            ),
        ));
        assert_eq!(duplicate_block_id(&columns), Some("dup".to_string()));

        let clean = Row::new("r", vec![Cell::new("c", vec![text("a"), text("b")])]);
        assert_eq!(duplicate_row_id(&clean), None);
    }
}
