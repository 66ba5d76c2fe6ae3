//! Content blocks. Each variant carries its own payload struct; the JSON form
//! is internally tagged by `type`.

use crate::layout::Row;
use quire_theme::ImageFit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Header(HeaderBlock),
    Image(ImageBlock),
    Quiz(QuizBlock),
    Columns(ColumnsBlock),
    Button(ButtonBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Rich text markup
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_header_level")]
    pub level: u8,
}

fn default_header_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub fit: ImageFit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fill: ImageFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizBlock {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index && index < self.options.len()
    }
}

/// A block holding its own multi-column row.
///
/// The embedded row is always flagged as a columns-block row, however the
/// block was built or decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColumnsBlock")]
pub struct ColumnsBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub row: Row,
}

#[derive(Deserialize)]
struct RawColumnsBlock {
    id: String,
    #[serde(default)]
    title: String,
    row: Row,
}

impl From<RawColumnsBlock> for ColumnsBlock {
    fn from(raw: RawColumnsBlock) -> Self {
        ColumnsBlock::new(raw.id, raw.title, raw.row)
    }
}

impl ColumnsBlock {
    pub fn new(id: impl Into<String>, title: impl Into<String>, mut row: Row) -> Self {
        row.is_columns_block = true;
        Self {
            id: id.into(),
            title: title.into(),
            row,
        }
    }

    pub fn columns(&self) -> usize {
        self.row.cells.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Text(b) => &b.id,
            Block::Header(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Quiz(b) => &b.id,
            Block::Columns(b) => &b.id,
            Block::Button(b) => &b.id,
        }
    }

    pub fn set_id(&mut self, id: String) {
        match self {
            Block::Text(b) => b.id = id,
            Block::Header(b) => b.id = id,
            Block::Image(b) => b.id = id,
            Block::Quiz(b) => b.id = id,
            Block::Columns(b) => b.id = id,
            Block::Button(b) => b.id = id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Block::Text(b) => &b.title,
            Block::Header(b) => &b.title,
            Block::Image(b) => &b.title,
            Block::Quiz(b) => &b.title,
            Block::Columns(b) => &b.title,
            Block::Button(b) => &b.title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Header(_) => "header",
            Block::Image(_) => "image",
            Block::Quiz(_) => "quiz",
            Block::Columns(_) => "columns",
            Block::Button(_) => "button",
        }
    }

    /// Embedded row of a columns block
    pub fn nested_row(&self) -> Option<&Row> {
        match self {
            Block::Columns(b) => Some(&b.row),
            _ => None,
        }
    }

    pub fn nested_row_mut(&mut self) -> Option<&mut Row> {
        match self {
            Block::Columns(b) => Some(&mut b.row),
            _ => None,
        }
    }

    /// Flag every row embedded in this block, at any depth, as a columns row
    pub fn mark_nested_rows(&mut self) {
        if let Some(row) = self.nested_row_mut() {
            row.is_columns_block = true;
            row.mark_nested_rows();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Cell, Resource};
    use serde_json::json;

    #[test]
    fn test_blocks_are_tagged_by_type() {
        let block: Block = serde_json::from_value(json!({
            "type": "quiz",
            "id": "q1",
            "title": "Check",
            "question": "2 + 2?",
            "options": ["3", "4"],
            "correctIndex": 1
        }))
        .unwrap();

        assert_eq!(block.id(), "q1");
        assert_eq!(block.kind(), "quiz");
        match &block {
            Block::Quiz(quiz) => {
                assert!(quiz.is_correct(1));
                assert!(!quiz.is_correct(0));
            }
            other => panic!("Expected quiz, got {:?}", other),
        }

        let out = serde_json::to_value(&block).unwrap();
        assert_eq!(out["type"], json!("quiz"));
        assert_eq!(out["correctIndex"], json!(1));
    }

    #[test]
    fn test_columns_block_marks_its_row() {
        let columns = ColumnsBlock::new("c1", "", Row::new("r1", vec![]));
        assert!(columns.row.is_columns_block);
        assert_eq!(columns.columns(), 0);
    }

    #[test]
    fn test_decoded_columns_block_marks_nested_rows() {
        let block: Block = serde_json::from_value(json!({
            "type": "columns",
            "id": "outer",
            "row": { "id": "r1", "cells": [ { "id": "c1", "resources": [
                { "type": "block", "block": { "type": "columns", "id": "inner",
                  "row": { "id": "r2", "isColumnsBlock": false, "cells": [] } } }
            ] } ] }
        }))
        .unwrap();

        let outer = block.nested_row().unwrap();
        assert!(outer.is_columns_block);
        let inner = outer.cells[0].resources[0].block().nested_row().unwrap();
        assert!(inner.is_columns_block);
    }

    #[test]
    fn test_mark_nested_rows_reaches_literal_blocks() {
        let inner = Block::Columns(ColumnsBlock {
            id: "inner".to_string(),
            title: String::new(),
            row: Row::new("r2", vec![]),
        });
        let mut outer = Block::Columns(ColumnsBlock {
            id: "outer".to_string(),
            title: String::new(),
            row: Row::new("r1", vec![Cell::new("c1", vec![Resource::from(inner)])]),
        });

        outer.mark_nested_rows();

        let row = outer.nested_row().unwrap();
        assert!(row.is_columns_block);
        assert!(row.cells[0].resources[0].block().nested_row().unwrap().is_columns_block);
    }

    #[test]
    fn test_set_id() {
        let mut block = Block::Button(ButtonBlock {
            id: "b1".to_string(),
            title: String::new(),
            label: "Go".to_string(),
            href: None,
        });
        block.set_id("b2".to_string());
        assert_eq!(block.id(), "b2");
        assert!(block.nested_row().is_none());
    }
}
