//! Style composition: attach, detach and reset the style of an override bag.
//!
//! All functions are pure; they return the bag the caller should store.

use crate::styles::expand_style;
use quire_theme::{StyleSelection, Theme, ThemeSpecificProps};

/// Bag with `selection` attached; explicit overrides are kept
pub fn apply_style(bag: &ThemeSpecificProps, selection: StyleSelection) -> ThemeSpecificProps {
    ThemeSpecificProps {
        style_id: selection,
        ..bag.clone()
    }
}

/// Bake the current style into ordinary overrides and drop the style reference.
///
/// Unstyled bags are returned unchanged.
pub fn detach_style(bag: &ThemeSpecificProps, theme: &Theme) -> ThemeSpecificProps {
    let mut detached = match expand_style(&bag.style_id, theme) {
        Some(expanded) => expanded.overlaid_with(bag),
        None => bag.clone(),
    };
    detached.style_id = StyleSelection::Unstyled;
    detached
}

/// Return the bag to the theme's default style.
///
/// The expanded default values are copied into the bag next to
/// `styleId: null`; they do not follow later edits of the style table.
/// Vertical alignment is layout, not style, and survives the reset.
pub fn reset_to_default_style(bag: &ThemeSpecificProps, theme: &Theme) -> ThemeSpecificProps {
    let mut reset = expand_style(&StyleSelection::ThemeDefault, theme).unwrap_or_default();
    reset.vertical_align = bag.vertical_align;
    reset.style_id = StyleSelection::ThemeDefault;
    reset
}
