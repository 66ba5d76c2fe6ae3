//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] quire_document::DocumentError),

    #[error("Theme error: {0}")]
    Theme(#[from] quire_theme::ThemeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Document is not file-backed")]
    NotFileBacked,

    #[error("Selection in block {block_id} changed since it was recorded")]
    StaleSelection { block_id: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}
