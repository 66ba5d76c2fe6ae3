//! # Quire Document
//!
//! Layout document model.
//!
//! ```text
//! DocumentTree
//!   └─ Row*            (props.themes[themeId], legacy flat props)
//!        └─ Cell*      (props.themes[themeId], legacy flat props)
//!             └─ Resource*  → Block
//!                              └─ Columns → Row (nested)
//! ```
//!
//! The legacy `Section` tree is readable for backward compatibility and is
//! migrated into a single row on load.

mod block;
mod error;
mod ids;
mod layout;
mod legacy;
mod tree;

pub use block::{
    Block, ButtonBlock, ColumnsBlock, HeaderBlock, ImageBlock, ImageFill, QuizBlock, TextBlock,
};
pub use error::DocumentError;
pub use ids::{get_document_id, IdGenerator};
pub use layout::{Cell, EntityProps, Resource, Row};
pub use legacy::{migrate_sections, Section, SimpleSlots, TwoColumnSlots};
pub use tree::{
    collect_block_ids, collect_row_ids, duplicate_block_id, duplicate_row_id, BlockLocation,
    DocumentTree,
};

// Re-export the property vocabulary stored on entities
pub use quire_theme::{Override, StyleSelection, ThemeSpecificProps};
