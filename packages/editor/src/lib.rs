//! # Quire Editor
//!
//! Document editing engine for Quire layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: JSON → DocumentTree (+ migration) │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Apply mutations with validation          │
//! │  - Style attach/detach/reset per theme      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ resolver: props + theme → EffectiveProps    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quire_editor::{Document, Mutation};
//!
//! let mut doc = Document::load("page.json")?;
//!
//! doc.apply(Mutation::SetColumnCount {
//!     row_id: "row-1".to_string(),
//!     columns: 2,
//! })?;
//!
//! doc.save()?;
//! ```

mod document;
mod errors;
mod mutations;
mod props_api;
mod session;
mod structure;

pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{block_text, Mutation, MutationError, MutationResult};
pub use props_api::{update_cell_theme, update_page_theme, update_row_theme};
pub use session::{EditSession, TextSelection};
pub use structure::{copy_block_with_fresh_ids, copy_row_with_fresh_ids, set_column_count};

// Re-export common types for convenience
pub use quire_document::DocumentTree;
