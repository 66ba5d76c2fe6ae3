//! # Property Resolution
//!
//! Computes the effective visual properties of a page, row or cell for one
//! theme by walking a fixed chain of layers, highest first:
//!
//! ```text
//! 1. style expansion (theme default / curated / custom) + explicit overrides
//!    or the raw per-theme override bag when no style applies
//! 2. legacy flat props
//! 3. theme default bundle for the entity kind
//! 4. built-in constants
//! ```
//!
//! Each field is looked up independently with [`Layers`]. Tri-state fields
//! stop at the first layer that either sets or clears them.

use crate::styles::{expand_style, selected_style_id};
use quire_document::{Cell, EntityProps, Row};
use quire_theme::{
    BackgroundDefaults, BorderDefaults, BorderStyle, BorderWidth, ImageFit, Override, Padding,
    Radius, Shadow, StyleSelection, Theme, ThemeSpecificProps, VerticalAlign,
};
use serde::Serialize;
use std::borrow::Cow;
use tracing::trace;

pub const DEFAULT_PADDING: f32 = 8.0;
pub const DEFAULT_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Page,
    Row,
    Cell,
}

/// Fully resolved properties; every field has a value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveProps {
    pub vertical_align: VerticalAlign,
    pub padding: Padding,
    /// `None` renders transparent
    pub background_color: Option<String>,
    pub background_opacity: f32,
    pub background_image: Option<String>,
    pub background_image_opacity: f32,
    pub background_image_type: ImageFit,
    pub border_color: Option<String>,
    pub border_width: BorderWidth,
    pub border_style: BorderStyle,
    pub border_radius: Radius,
    pub shadow: Option<Shadow>,
    pub background_blur: f32,
    /// Style that contributed to this result, if any
    pub applied_style: Option<String>,
}

/// Ordered property layers, highest precedence first
pub struct Layers<'a> {
    layers: Vec<Cow<'a, ThemeSpecificProps>>,
}

impl<'a> Layers<'a> {
    pub fn new(layers: Vec<Cow<'a, ThemeSpecificProps>>) -> Self {
        Self { layers }
    }

    /// First layer that has a value for the field
    pub fn first<T>(&self, field: impl Fn(&ThemeSpecificProps) -> Option<T>) -> Option<T> {
        self.layers.iter().find_map(|layer| field(layer))
    }

    /// First layer that sets or clears a tri-state field.
    ///
    /// `None` when no layer mentions it, `Some(None)` when cleared.
    pub fn first_override<T: Clone>(
        &self,
        field: impl Fn(&ThemeSpecificProps) -> &Override<T>,
    ) -> Option<Option<T>> {
        self.layers
            .iter()
            .find_map(|layer| field(layer).as_layer().map(|v| v.cloned()))
    }
}

/// Resolve one entity for `theme_id`
pub fn resolve(kind: EntityKind, props: &EntityProps, theme_id: &str, theme: &Theme) -> EffectiveProps {
    let (primary, applied_style) = primary_layer(kind, props, theme_id, theme);

    let layers = Layers::new(vec![
        primary,
        Cow::Borrowed(&props.legacy),
        Cow::Owned(theme_layer(kind, theme)),
    ]);

    EffectiveProps {
        vertical_align: layers.first(|l| l.vertical_align).unwrap_or_default(),
        padding: layers
            .first(|l| l.padding)
            .unwrap_or(Padding::Uniform(DEFAULT_PADDING)),
        background_color: layers.first_override(|l| &l.background_color).flatten(),
        background_opacity: layers.first(|l| l.background_opacity).unwrap_or(DEFAULT_OPACITY),
        background_image: layers.first_override(|l| &l.background_image).flatten(),
        background_image_opacity: layers
            .first(|l| l.background_image_opacity)
            .unwrap_or(DEFAULT_OPACITY),
        background_image_type: layers.first(|l| l.background_image_type).unwrap_or_default(),
        border_color: layers.first(|l| l.border_color.clone()),
        border_width: layers
            .first(|l| l.border_width)
            .unwrap_or(BorderWidth::Uniform(0.0)),
        border_style: layers.first(|l| l.border_style).unwrap_or_default(),
        border_radius: layers
            .first(|l| l.border_radius)
            .unwrap_or(Radius::Uniform(0.0)),
        shadow: layers.first_override(|l| &l.shadow).flatten(),
        background_blur: layers.first(|l| l.background_blur).unwrap_or(0.0),
        applied_style,
    }
}

/// Highest layer: style expansion with explicit overrides on top, or the raw bag
fn primary_layer<'a>(
    kind: EntityKind,
    props: &'a EntityProps,
    theme_id: &str,
    theme: &Theme,
) -> (Cow<'a, ThemeSpecificProps>, Option<String>) {
    let Some(bag) = props.theme(theme_id) else {
        // Rows without any bag for this theme pick up the theme's default style
        if kind == EntityKind::Row {
            if let Some(expanded) = expand_style(&StyleSelection::ThemeDefault, theme) {
                trace!(theme_id = %theme_id, "Applying theme default row style");
                return (Cow::Owned(expanded), theme.default_row_style.clone());
            }
        }
        return (Cow::Owned(ThemeSpecificProps::default()), None);
    };

    match expand_style(&bag.style_id, theme) {
        Some(expanded) => {
            let style_id = selected_style_id(&bag.style_id, theme).map(str::to_string);
            trace!(theme_id = %theme_id, style_id = ?style_id, "Expanding style");
            (Cow::Owned(expanded.overlaid_with(bag)), style_id)
        }
        None => (Cow::Borrowed(bag), None),
    }
}

/// Theme defaults for an entity kind expressed as a property layer
fn theme_layer(kind: EntityKind, theme: &Theme) -> ThemeSpecificProps {
    let (background, border, radius, padding) = match kind {
        EntityKind::Page => (theme.page_background.as_ref(), None, None, None),
        EntityKind::Row => (
            theme.row_background.as_ref(),
            theme.row_border.as_ref(),
            theme.row_border_radius,
            theme.row_padding,
        ),
        EntityKind::Cell => (
            theme.cell_background.as_ref(),
            theme.cell_border.as_ref(),
            theme.cell_border_radius,
            theme.cell_padding,
        ),
    };

    let mut layer = ThemeSpecificProps {
        padding,
        border_radius: radius,
        ..Default::default()
    };
    if let Some(bg) = background {
        apply_background_defaults(&mut layer, bg);
    }
    if let Some(border) = border {
        apply_border_defaults(&mut layer, border);
    }
    layer
}

fn apply_background_defaults(layer: &mut ThemeSpecificProps, bg: &BackgroundDefaults) {
    if let Some(color) = &bg.background_color {
        layer.background_color = Override::Set(color.clone());
    }
    if let Some(image) = &bg.background_image {
        layer.background_image = Override::Set(image.clone());
    }
    layer.background_opacity = bg.background_opacity;
    layer.background_image_opacity = bg.background_image_opacity;
    layer.background_image_type = bg.background_image_type;
}

fn apply_border_defaults(layer: &mut ThemeSpecificProps, border: &BorderDefaults) {
    layer.border_color = border.color.clone();
    layer.border_width = border.width;
    layer.border_style = border.style;
}

/// Resolver bound to one theme
pub struct PropertyResolver<'a> {
    theme_id: &'a str,
    theme: &'a Theme,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(theme_id: &'a str, theme: &'a Theme) -> Self {
        Self { theme_id, theme }
    }

    pub fn page(&self, page: &EntityProps) -> EffectiveProps {
        resolve(EntityKind::Page, page, self.theme_id, self.theme)
    }

    pub fn row(&self, row: &Row) -> EffectiveProps {
        resolve(EntityKind::Row, &row.props, self.theme_id, self.theme)
    }

    pub fn cell(&self, cell: &Cell) -> EffectiveProps {
        resolve(EntityKind::Cell, &cell.props, self.theme_id, self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_theme::{builtin_theme, NEON_ID, PLAIN_ID};
    use serde_json::json;

    fn props(value: serde_json::Value) -> EntityProps {
        serde_json::from_value(value).unwrap()
    }

    fn plain() -> Theme {
        builtin_theme(PLAIN_ID).unwrap()
    }

    #[test]
    fn test_explicit_background_beats_theme_default() {
        let cell = props(json!({ "themes": { "plain": { "backgroundColor": "#123456" } } }));
        let effective = resolve(EntityKind::Cell, &cell, PLAIN_ID, &plain());
        assert_eq!(effective.background_color.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_falls_back_to_theme_cell_background() {
        let theme = plain();
        let effective = resolve(EntityKind::Cell, &EntityProps::default(), PLAIN_ID, &theme);
        assert_eq!(
            effective.background_color,
            theme.cell_background.unwrap().background_color
        );
        assert_eq!(effective.padding, Padding::Uniform(8.0));
    }

    #[test]
    fn test_legacy_props_sit_between_overrides_and_theme() {
        let cell = props(json!({ "backgroundColor": "#legacy", "padding": 3 }));
        let effective = resolve(EntityKind::Cell, &cell, PLAIN_ID, &plain());
        assert_eq!(effective.background_color.as_deref(), Some("#legacy"));
        assert_eq!(effective.padding, Padding::Uniform(3.0));

        // A per-theme value still wins over legacy
        let cell = props(json!({
            "backgroundColor": "#legacy",
            "themes": { "plain": { "backgroundColor": "#theme" } }
        }));
        let effective = resolve(EntityKind::Cell, &cell, PLAIN_ID, &plain());
        assert_eq!(effective.background_color.as_deref(), Some("#theme"));
    }

    #[test]
    fn test_cleared_background_is_transparent_not_inherited() {
        let cell = props(json!({
            "backgroundColor": "#legacy",
            "themes": { "plain": { "backgroundColor": null } }
        }));
        let effective = resolve(EntityKind::Cell, &cell, PLAIN_ID, &plain());
        assert_eq!(effective.background_color, None);
    }

    #[test]
    fn test_overrides_for_other_theme_are_ignored() {
        let cell = props(json!({ "themes": { "neon": { "backgroundColor": "#f0f" } } }));
        let effective = resolve(EntityKind::Cell, &cell, PLAIN_ID, &plain());
        assert_eq!(effective.background_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_constants_when_theme_has_no_defaults() {
        let bare = Theme { name: "Bare".to_string(), ..Default::default() };
        let effective = resolve(EntityKind::Row, &EntityProps::default(), "bare", &bare);

        assert_eq!(effective.padding, Padding::Uniform(DEFAULT_PADDING));
        assert_eq!(effective.border_style, BorderStyle::Solid);
        assert_eq!(effective.vertical_align, VerticalAlign::Top);
        assert_eq!(effective.background_opacity, 1.0);
        assert_eq!(effective.background_image_opacity, 1.0);
        assert_eq!(effective.background_image_type, ImageFit::Fill);
        assert_eq!(effective.background_color, None);
        assert_eq!(effective.shadow, None);
        assert_eq!(effective.applied_style, None);
    }

    #[test]
    fn test_row_without_bag_gets_theme_default_style() {
        let neon = builtin_theme(NEON_ID).unwrap();
        let effective = resolve(EntityKind::Row, &EntityProps::default(), NEON_ID, &neon);
        assert_eq!(effective.applied_style.as_deref(), Some("glass"));
        assert_eq!(effective.background_blur, 12.0);
        assert_eq!(effective.background_opacity, 0.6);

        // Cells never pick up the default row style implicitly
        let cell = resolve(EntityKind::Cell, &EntityProps::default(), NEON_ID, &neon);
        assert_eq!(cell.applied_style, None);
    }

    #[test]
    fn test_raw_bag_disables_default_style() {
        let neon = builtin_theme(NEON_ID).unwrap();
        let row = props(json!({ "themes": { "neon": { "verticalAlign": "center" } } }));
        let effective = resolve(EntityKind::Row, &row, NEON_ID, &neon);
        assert_eq!(effective.applied_style, None);
        assert_eq!(effective.vertical_align, VerticalAlign::Center);
        assert_eq!(effective.background_blur, 0.0);
    }

    #[test]
    fn test_null_style_id_expands_default_with_overrides_on_top() {
        let neon = builtin_theme(NEON_ID).unwrap();
        let row = props(json!({
            "themes": { "neon": { "styleId": null, "verticalAlign": "bottom", "backgroundBlur": 2 } }
        }));
        let effective = resolve(EntityKind::Row, &row, NEON_ID, &neon);
        assert_eq!(effective.applied_style.as_deref(), Some("glass"));
        assert_eq!(effective.vertical_align, VerticalAlign::Bottom);
        assert_eq!(effective.background_blur, 2.0);
        assert_eq!(effective.background_opacity, 0.6);
    }

    #[test]
    fn test_named_curated_style_uses_theme_colors() {
        let theme = plain();
        let row = props(json!({ "themes": { "plain": { "styleId": "accent" } } }));
        let effective = resolve(EntityKind::Row, &row, PLAIN_ID, &theme);
        assert_eq!(effective.background_color.as_deref(), Some(theme.colors.accent.as_str()));
        assert_eq!(effective.background_opacity, 0.12);
        assert_eq!(effective.applied_style.as_deref(), Some("accent"));
    }

    #[test]
    fn test_unknown_style_falls_back_to_raw_bag() {
        let row = props(json!({ "themes": { "plain": { "styleId": "ghost", "padding": 30 } } }));
        let effective = resolve(EntityKind::Row, &row, PLAIN_ID, &plain());
        assert_eq!(effective.applied_style, None);
        assert_eq!(effective.padding, Padding::Uniform(30.0));
    }

    #[test]
    fn test_page_uses_page_background() {
        let neon = builtin_theme(NEON_ID).unwrap();
        let effective = PropertyResolver::new(NEON_ID, &neon).page(&EntityProps::default());
        assert_eq!(effective.background_color.as_deref(), Some("#0b0b14"));
        assert_eq!(effective.padding, Padding::Uniform(DEFAULT_PADDING));
    }
}
