//! Per-theme property updates.
//!
//! The public functions are pure: they take a tree and return the updated
//! copy. `Mutation` uses the in-place variants.

use crate::mutations::MutationError;
use quire_document::{DocumentTree, ThemeSpecificProps};

/// Merge `partial` into the row's bag for `theme_id`
pub fn update_row_theme(
    tree: &DocumentTree,
    row_id: &str,
    theme_id: &str,
    partial: &ThemeSpecificProps,
) -> Result<DocumentTree, MutationError> {
    let mut next = tree.clone();
    merge_row_theme(&mut next, row_id, theme_id, partial)?;
    Ok(next)
}

/// Merge `partial` into the cell's bag for `theme_id`
pub fn update_cell_theme(
    tree: &DocumentTree,
    cell_id: &str,
    theme_id: &str,
    partial: &ThemeSpecificProps,
) -> Result<DocumentTree, MutationError> {
    let mut next = tree.clone();
    merge_cell_theme(&mut next, cell_id, theme_id, partial)?;
    Ok(next)
}

/// Merge `partial` into the page's bag for `theme_id`
pub fn update_page_theme(
    tree: &DocumentTree,
    theme_id: &str,
    partial: &ThemeSpecificProps,
) -> DocumentTree {
    let mut next = tree.clone();
    next.page.merge_theme(theme_id, partial);
    next
}

pub(crate) fn merge_row_theme(
    tree: &mut DocumentTree,
    row_id: &str,
    theme_id: &str,
    partial: &ThemeSpecificProps,
) -> Result<(), MutationError> {
    let row = tree
        .find_row_mut(row_id)
        .ok_or_else(|| MutationError::RowNotFound(row_id.to_string()))?;
    row.props.merge_theme(theme_id, partial);
    Ok(())
}

pub(crate) fn merge_cell_theme(
    tree: &mut DocumentTree,
    cell_id: &str,
    theme_id: &str,
    partial: &ThemeSpecificProps,
) -> Result<(), MutationError> {
    let cell = tree
        .find_cell_mut(cell_id)
        .ok_or_else(|| MutationError::CellNotFound(cell_id.to_string()))?;
    cell.props.merge_theme(theme_id, partial);
    Ok(())
}

pub(crate) fn replace_row_theme(
    tree: &mut DocumentTree,
    row_id: &str,
    theme_id: &str,
    props: &ThemeSpecificProps,
) -> Result<(), MutationError> {
    let row = tree
        .find_row_mut(row_id)
        .ok_or_else(|| MutationError::RowNotFound(row_id.to_string()))?;
    row.props.replace_theme(theme_id, props.clone());
    Ok(())
}

pub(crate) fn replace_cell_theme(
    tree: &mut DocumentTree,
    cell_id: &str,
    theme_id: &str,
    props: &ThemeSpecificProps,
) -> Result<(), MutationError> {
    let cell = tree
        .find_cell_mut(cell_id)
        .ok_or_else(|| MutationError::CellNotFound(cell_id.to_string()))?;
    cell.props.replace_theme(theme_id, props.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_document::{Cell, Override, Row};
    use quire_theme::Padding;

    fn tree() -> DocumentTree {
        DocumentTree::new(vec![Row::new("r1", vec![Cell::empty("c1")])])
    }

    #[test]
    fn test_update_row_theme_leaves_input_untouched() {
        let original = tree();
        let partial = ThemeSpecificProps {
            padding: Some(Padding::Uniform(4.0)),
            ..Default::default()
        };

        let updated = update_row_theme(&original, "r1", "plain", &partial).unwrap();

        assert!(original.rows[0].props.theme("plain").is_none());
        assert_eq!(
            updated.rows[0].props.theme("plain").unwrap().padding,
            Some(Padding::Uniform(4.0))
        );
    }

    #[test]
    fn test_update_is_scoped_to_theme() {
        let partial = ThemeSpecificProps {
            background_color: Override::Set("#111".to_string()),
            ..Default::default()
        };
        let updated = update_cell_theme(&tree(), "c1", "neon", &partial).unwrap();
        let props = &updated.rows[0].cells[0].props;

        assert!(props.theme("plain").is_none());
        assert_eq!(props.theme("neon").unwrap().background_color, Override::Set("#111".to_string()));
    }

    #[test]
    fn test_partial_merges_with_existing_bag() {
        let first = ThemeSpecificProps {
            padding: Some(Padding::Uniform(4.0)),
            ..Default::default()
        };
        let second = ThemeSpecificProps {
            background_color: Override::Cleared,
            ..Default::default()
        };

        let tree = update_row_theme(&tree(), "r1", "plain", &first).unwrap();
        let tree = update_row_theme(&tree, "r1", "plain", &second).unwrap();
        let bag = tree.rows[0].props.theme("plain").unwrap();

        assert_eq!(bag.padding, Some(Padding::Uniform(4.0)));
        assert_eq!(bag.background_color, Override::Cleared);
    }

    #[test]
    fn test_page_update() {
        let partial = ThemeSpecificProps {
            background_color: Override::Set("#000".to_string()),
            ..Default::default()
        };
        let updated = update_page_theme(&tree(), "plain", &partial);
        assert_eq!(
            updated.page.theme("plain").unwrap().background_color,
            Override::Set("#000".to_string())
        );
    }

    #[test]
    fn test_missing_entity() {
        let result = update_row_theme(&tree(), "nope", "plain", &ThemeSpecificProps::default());
        assert_eq!(result.unwrap_err(), MutationError::RowNotFound("nope".to_string()));
    }
}
