//! # Edit Session
//!
//! One editing session: a document, the theme store and the active theme.
//!
//! ## Flow
//!
//! ```text
//! Client                 Session                    Document
//!   |-- style op -------->|                            |
//!   |                     |-- compose bag (resolver) ->|
//!   |                     |-- ReplaceRowTheme -------->|
//!   |<-- EffectiveProps --|<-- resolve on read --------|
//! ```
//!
//! Generated text replacements are asynchronous: the client records a
//! selection, sends it off, and applies the result later. The replacement is
//! refused when the selection was replaced or its text changed meanwhile.

use crate::mutations::block_text;
use crate::{Document, EditorError, Mutation, MutationResult};
use quire_document::{StyleSelection, ThemeSpecificProps};
use quire_resolver::{
    apply_style, detach_style, reset_to_default_style, EffectiveProps, PropertyResolver,
};
use quire_theme::{Theme, ThemeStorage, ThemeStore};
use std::ops::Range;
use tracing::{debug, info, warn};

/// Snapshot of selected text inside one block.
///
/// `range` is a byte range into the block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSelection {
    pub block_id: String,
    pub range: Range<usize>,
    pub text: String,
}

/// Editing session for a single document
pub struct EditSession<S: ThemeStorage> {
    /// Session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    themes: ThemeStore<S>,

    selection: Option<TextSelection>,
}

impl<S: ThemeStorage> EditSession<S> {
    pub fn new(id: impl Into<String>, document: Document, themes: ThemeStore<S>) -> Self {
        Self {
            id: id.into(),
            document,
            themes,
            selection: None,
        }
    }

    pub fn themes(&self) -> &ThemeStore<S> {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeStore<S> {
        &mut self.themes
    }

    pub fn active_theme_id(&self) -> &str {
        self.themes.active_theme_id()
    }

    /// Switch theme; every entity resolves against it from now on
    pub fn set_active_theme(&mut self, id: &str) -> Result<(), EditorError> {
        self.themes.set_active_theme(id)?;
        info!(session = %self.id, theme_id = %id, "Active theme changed");
        Ok(())
    }

    /// Apply a mutation to the document
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        self.document.apply(mutation)
    }

    pub fn resolve_page(&self) -> EffectiveProps {
        let theme = self.themes.active_theme();
        self.resolver(&theme).page(&self.document.tree().page)
    }

    pub fn resolve_row(&self, row_id: &str) -> Result<EffectiveProps, EditorError> {
        let row = self
            .document
            .tree()
            .find_row(row_id)
            .ok_or_else(|| crate::MutationError::RowNotFound(row_id.to_string()))?;
        let theme = self.themes.active_theme();
        Ok(self.resolver(&theme).row(row))
    }

    pub fn resolve_cell(&self, cell_id: &str) -> Result<EffectiveProps, EditorError> {
        let cell = self
            .document
            .tree()
            .find_cell(cell_id)
            .ok_or_else(|| crate::MutationError::CellNotFound(cell_id.to_string()))?;
        let theme = self.themes.active_theme();
        Ok(self.resolver(&theme).cell(cell))
    }

    fn resolver<'a>(&'a self, theme: &'a Theme) -> PropertyResolver<'a> {
        PropertyResolver::new(self.themes.active_theme_id(), theme)
    }

    /// Merge a partial bag into the row's bag for the active theme
    pub fn update_row_theme(
        &mut self,
        row_id: &str,
        props: ThemeSpecificProps,
    ) -> Result<MutationResult, EditorError> {
        let theme_id = self.active_theme_id().to_string();
        self.apply(Mutation::UpdateRowTheme {
            row_id: row_id.to_string(),
            theme_id,
            props,
        })
    }

    /// Merge a partial bag into the cell's bag for the active theme
    pub fn update_cell_theme(
        &mut self,
        cell_id: &str,
        props: ThemeSpecificProps,
    ) -> Result<MutationResult, EditorError> {
        let theme_id = self.active_theme_id().to_string();
        self.apply(Mutation::UpdateCellTheme {
            cell_id: cell_id.to_string(),
            theme_id,
            props,
        })
    }

    /// Attach a style to a row for the active theme
    pub fn apply_row_style(
        &mut self,
        row_id: &str,
        selection: StyleSelection,
    ) -> Result<MutationResult, EditorError> {
        let bag = self.row_bag(row_id)?;
        self.replace_row_bag(row_id, apply_style(&bag, selection))
    }

    /// Bake the row's style into plain overrides.
    ///
    /// A row with no bag for the active theme is styled by the theme default,
    /// which gets baked the same way.
    pub fn detach_row_style(&mut self, row_id: &str) -> Result<MutationResult, EditorError> {
        let bag = self.row_bag(row_id)?;
        let theme = self.themes.active_theme();
        self.replace_row_bag(row_id, detach_style(&bag, &theme))
    }

    /// Return the row to the active theme's default style
    pub fn reset_row_style(&mut self, row_id: &str) -> Result<MutationResult, EditorError> {
        let bag = self.row_bag(row_id)?;
        let theme = self.themes.active_theme();
        self.replace_row_bag(row_id, reset_to_default_style(&bag, &theme))
    }

    /// The row's bag for the active theme, or the implicit default-style bag
    fn row_bag(&self, row_id: &str) -> Result<ThemeSpecificProps, EditorError> {
        let row = self
            .document
            .tree()
            .find_row(row_id)
            .ok_or_else(|| crate::MutationError::RowNotFound(row_id.to_string()))?;
        Ok(match row.props.theme(self.active_theme_id()) {
            Some(bag) => bag.clone(),
            None => ThemeSpecificProps {
                style_id: StyleSelection::ThemeDefault,
                ..Default::default()
            },
        })
    }

    fn replace_row_bag(
        &mut self,
        row_id: &str,
        props: ThemeSpecificProps,
    ) -> Result<MutationResult, EditorError> {
        let theme_id = self.active_theme_id().to_string();
        debug!(row = %row_id, theme_id = %theme_id, style = ?props.style_id, "Replacing row bag");
        self.apply(Mutation::ReplaceRowTheme {
            row_id: row_id.to_string(),
            theme_id,
            props,
        })
    }

    /// Remember the selected text of a block, replacing any earlier selection
    pub fn record_selection(
        &mut self,
        block_id: &str,
        range: Range<usize>,
    ) -> Result<TextSelection, EditorError> {
        let block = self
            .document
            .tree()
            .find_block(block_id)
            .ok_or_else(|| crate::MutationError::BlockNotFound(block_id.to_string()))?;
        let content = block_text(block).ok_or(crate::MutationError::NotText)?;
        let text = content.get(range.clone()).ok_or_else(|| {
            EditorError::InvalidSelection(format!(
                "{:?} is outside the text of block {}",
                range, block_id
            ))
        })?;

        let selection = TextSelection {
            block_id: block_id.to_string(),
            range,
            text: text.to_string(),
        };
        self.selection = Some(selection.clone());
        Ok(selection)
    }

    pub fn selection(&self) -> Option<&TextSelection> {
        self.selection.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replace the text of `expected` with `replacement`.
    ///
    /// Fails with `StaleSelection` when `expected` is no longer the session's
    /// selection or the block's text under its range has changed. Nothing is
    /// written in that case. On success the selection is cleared.
    pub fn apply_generated_replacement(
        &mut self,
        expected: &TextSelection,
        replacement: &str,
    ) -> Result<MutationResult, EditorError> {
        let stale = || EditorError::StaleSelection {
            block_id: expected.block_id.clone(),
        };

        if self.selection.as_ref() != Some(expected) {
            warn!(block = %expected.block_id, "Selection was replaced before the generated text arrived");
            return Err(stale());
        }

        let current = self
            .document
            .tree()
            .find_block(&expected.block_id)
            .and_then(block_text)
            .ok_or_else(stale)?;
        if current.get(expected.range.clone()) != Some(expected.text.as_str()) {
            warn!(block = %expected.block_id, "Selected text changed before the generated text arrived");
            return Err(stale());
        }

        let mut content = String::with_capacity(current.len() + replacement.len());
        content.push_str(&current[..expected.range.start]);
        content.push_str(replacement);
        content.push_str(&current[expected.range.end..]);

        let result = self.apply(Mutation::UpdateText {
            block_id: expected.block_id.clone(),
            content,
        })?;
        self.selection = None;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_document::{Block, Cell, DocumentTree, Resource, Row, TextBlock};
    use quire_theme::{MemoryStorage, NEON_ID, PLAIN_ID};
    use std::path::PathBuf;

    fn session() -> EditSession<MemoryStorage> {
        let text = Block::Text(TextBlock {
            id: "t1".to_string(),
            title: String::new(),
            content: "hello brave world".to_string(),
        });
        let tree = DocumentTree::new(vec![Row::new(
            "r1",
            vec![Cell::new("c1", vec![Resource::from(text)])],
        )]);
        let document = Document::from_tree(PathBuf::from("doc.json"), tree);
        let themes = ThemeStore::load(MemoryStorage::new()).unwrap();
        EditSession::new("s1", document, themes)
    }

    #[test]
    fn test_generated_replacement() {
        let mut session = session();
        let selection = session.record_selection("t1", 6..11).unwrap();
        assert_eq!(selection.text, "brave");

        session.apply_generated_replacement(&selection, "bold").unwrap();

        let block = session.document.tree().find_block("t1").unwrap();
        assert_eq!(block_text(block), Some("hello bold world"));
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_replacement_refused_after_new_selection() {
        let mut session = session();
        let first = session.record_selection("t1", 6..11).unwrap();
        session.record_selection("t1", 0..5).unwrap();

        let result = session.apply_generated_replacement(&first, "bold");
        assert!(matches!(result, Err(EditorError::StaleSelection { .. })));
        assert_eq!(session.document.version, 0);
    }

    #[test]
    fn test_replacement_refused_after_text_edit() {
        let mut session = session();
        let selection = session.record_selection("t1", 6..11).unwrap();
        session
            .apply(Mutation::UpdateText {
                block_id: "t1".to_string(),
                content: "hello crazy world".to_string(),
            })
            .unwrap();

        let result = session.apply_generated_replacement(&selection, "bold");
        assert!(matches!(result, Err(EditorError::StaleSelection { .. })));
    }

    #[test]
    fn test_selection_out_of_range() {
        let mut session = session();
        let result = session.record_selection("t1", 6..100);
        assert!(matches!(result, Err(EditorError::InvalidSelection(_))));
    }

    #[test]
    fn test_theme_switch_changes_resolution() {
        let mut session = session();
        assert_eq!(session.resolve_row("r1").unwrap().applied_style, None);

        session.set_active_theme(NEON_ID).unwrap();
        assert_eq!(
            session.resolve_row("r1").unwrap().applied_style,
            Some("glass".to_string())
        );

        session.set_active_theme(PLAIN_ID).unwrap();
        assert_eq!(session.resolve_row("r1").unwrap().applied_style, None);
    }

    #[test]
    fn test_detach_bakes_implicit_default_style() {
        let mut session = session();
        session.set_active_theme(NEON_ID).unwrap();
        let styled = session.resolve_row("r1").unwrap();

        session.detach_row_style("r1").unwrap();
        let detached = session.resolve_row("r1").unwrap();

        assert_eq!(detached.applied_style, None);
        assert_eq!(detached.background_color, styled.background_color);
        assert_eq!(detached.background_blur, styled.background_blur);
    }
}
