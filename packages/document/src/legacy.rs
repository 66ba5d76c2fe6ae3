//! # Legacy Section tree
//!
//! Documents written before the Row/Cell model store a list of sections, each
//! with named slots of blocks:
//!
//! ```text
//! simple     → slots.main
//! twoColumn  → slots.left, slots.right
//! ```
//!
//! They are only ever read; [`migrate_sections`] lifts them into one row with
//! one cell holding every block in slot-then-block order.

use crate::block::Block;
use crate::ids::IdGenerator;
use crate::layout::{Cell, Resource, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Section {
    #[serde(rename = "simple")]
    Simple {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        slots: SimpleSlots,
    },

    #[serde(rename = "twoColumn", alias = "two-column", alias = "two_column")]
    TwoColumn {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        slots: TwoColumnSlots,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimpleSlots {
    #[serde(default)]
    pub main: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TwoColumnSlots {
    #[serde(default)]
    pub left: Vec<Block>,
    #[serde(default)]
    pub right: Vec<Block>,
}

impl Section {
    /// Slot names in display order
    pub fn slot_names(&self) -> &'static [&'static str] {
        match self {
            Section::Simple { .. } => &["main"],
            Section::TwoColumn { .. } => &["left", "right"],
        }
    }

    /// All blocks, slot by slot
    pub fn into_blocks(self) -> Vec<Block> {
        match self {
            Section::Simple { slots, .. } => slots.main,
            Section::TwoColumn { slots, .. } => {
                let mut blocks = slots.left;
                blocks.extend(slots.right);
                blocks
            }
        }
    }

    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Section::Simple { slots, .. } => slots.main.iter().collect(),
            Section::TwoColumn { slots, .. } => slots.left.iter().chain(slots.right.iter()).collect(),
        }
    }
}

/// Flatten legacy sections into a single row with a single cell
pub fn migrate_sections(sections: Vec<Section>, ids: &mut IdGenerator) -> Row {
    let mut taken = HashSet::new();
    for section in &sections {
        for block in section.blocks() {
            crate::tree::collect_block_ids(block, &mut taken);
        }
    }

    let section_count = sections.len();
    let resources: Vec<Resource> = sections
        .into_iter()
        .flat_map(Section::into_blocks)
        .map(Resource::from)
        .collect();

    info!(sections = section_count, blocks = resources.len(), "Migrated legacy sections");

    let cell_id = ids.fresh(&taken);
    taken.insert(cell_id.clone());
    let row_id = ids.fresh(&taken);

    Row::new(row_id, vec![Cell::new(cell_id, resources)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(id: &str) -> serde_json::Value {
        json!({ "type": "text", "id": id, "content": id })
    }

    #[test]
    fn test_migrate_preserves_slot_then_block_order() {
        let sections: Vec<Section> = serde_json::from_value(json!([
            { "type": "simple", "slots": { "main": [text("a"), text("b")] } },
            { "type": "twoColumn", "slots": { "left": [text("c")], "right": [text("d"), text("e")] } },
            { "type": "two-column", "slots": { "right": [text("f")] } }
        ]))
        .unwrap();

        let mut ids = IdGenerator::from_seed("legacy");
        let row = migrate_sections(sections, &mut ids);

        assert_eq!(row.cells.len(), 1);
        assert_eq!(row.cells[0].block_ids(), vec!["a", "b", "c", "d", "e", "f"]);
        assert!(!row.is_columns_block);
        assert_ne!(row.id, row.cells[0].id);
    }

    #[test]
    fn test_migrate_empty_sections() {
        let mut ids = IdGenerator::from_seed("legacy");
        let row = migrate_sections(vec![], &mut ids);
        assert_eq!(row.cells.len(), 1);
        assert!(row.cells[0].resources.is_empty());
    }

    #[test]
    fn test_generated_ids_avoid_block_ids() {
        let sections: Vec<Section> = serde_json::from_value(json!([
            { "type": "simple", "slots": { "main": [text("legacy-1")] } }
        ]))
        .unwrap();

        let mut ids = IdGenerator::from_seed("legacy");
        let row = migrate_sections(sections, &mut ids);
        assert_eq!(row.cells[0].id, "legacy-2");
        assert_eq!(row.id, "legacy-3");
    }

    #[test]
    fn test_slot_names() {
        let simple = Section::Simple { id: None, slots: SimpleSlots::default() };
        assert_eq!(simple.slot_names(), &["main"]);
    }
}
