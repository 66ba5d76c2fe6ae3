//! Curated row styles.
//!
//! A curated style is a function of three theme colors. Expanding one yields
//! an ordinary property bag, so it composes with explicit overrides the same
//! way any other layer does.

use quire_theme::{
    BorderStyle, BorderWidth, Override, Radius, Shadow, StyleSelection, Theme, ThemeSpecificProps,
};
use tracing::debug;

/// Theme colors a curated style is computed from
#[derive(Debug, Clone, PartialEq)]
pub struct StylePalette {
    pub accent: String,
    pub surface: String,
    pub border: String,
}

impl StylePalette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            accent: theme.colors.accent.clone(),
            surface: theme.colors.surface.clone(),
            border: theme.colors.border.clone(),
        }
    }
}

pub struct CuratedStyle {
    pub id: &'static str,
    pub name: &'static str,
    build: fn(&StylePalette) -> ThemeSpecificProps,
}

impl CuratedStyle {
    pub fn expand(&self, palette: &StylePalette) -> ThemeSpecificProps {
        (self.build)(palette)
    }
}

impl std::fmt::Debug for CuratedStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuratedStyle").field("id", &self.id).finish()
    }
}

pub const CURATED_STYLES: &[CuratedStyle] = &[
    CuratedStyle { id: "card", name: "Card", build: card },
    CuratedStyle { id: "outline", name: "Outline", build: outline },
    CuratedStyle { id: "accent", name: "Accent", build: accent },
    CuratedStyle { id: "glass", name: "Glass", build: glass },
    CuratedStyle { id: "elevated", name: "Elevated", build: elevated },
];

pub fn curated_style(id: &str) -> Option<&'static CuratedStyle> {
    CURATED_STYLES.iter().find(|style| style.id == id)
}

fn card(p: &StylePalette) -> ThemeSpecificProps {
    ThemeSpecificProps {
        background_color: Override::Set(p.surface.clone()),
        background_opacity: Some(1.0),
        border_color: Some(p.border.clone()),
        border_width: Some(BorderWidth::Uniform(1.0)),
        border_style: Some(BorderStyle::Solid),
        border_radius: Some(Radius::Uniform(12.0)),
        shadow: Override::Set(Shadow::new(0.0, 1.0, 3.0, 0.0, "rgba(0, 0, 0, 0.12)")),
        ..Default::default()
    }
}

fn outline(p: &StylePalette) -> ThemeSpecificProps {
    ThemeSpecificProps {
        background_color: Override::Cleared,
        border_color: Some(p.accent.clone()),
        border_width: Some(BorderWidth::Uniform(2.0)),
        border_style: Some(BorderStyle::Solid),
        border_radius: Some(Radius::Uniform(8.0)),
        shadow: Override::Cleared,
        ..Default::default()
    }
}

fn accent(p: &StylePalette) -> ThemeSpecificProps {
    ThemeSpecificProps {
        background_color: Override::Set(p.accent.clone()),
        background_opacity: Some(0.12),
        border_color: Some(p.accent.clone()),
        border_width: Some(BorderWidth::Sides { top: 0.0, right: 0.0, bottom: 0.0, left: 4.0 }),
        border_style: Some(BorderStyle::Solid),
        border_radius: Some(Radius::Uniform(0.0)),
        shadow: Override::Cleared,
        ..Default::default()
    }
}

fn glass(p: &StylePalette) -> ThemeSpecificProps {
    ThemeSpecificProps {
        background_color: Override::Set(p.surface.clone()),
        background_opacity: Some(0.6),
        background_blur: Some(12.0),
        border_color: Some(p.border.clone()),
        border_width: Some(BorderWidth::Uniform(1.0)),
        border_style: Some(BorderStyle::Solid),
        border_radius: Some(Radius::Uniform(16.0)),
        shadow: Override::Set(Shadow::new(0.0, 8.0, 32.0, 0.0, "rgba(0, 0, 0, 0.18)")),
        ..Default::default()
    }
}

fn elevated(p: &StylePalette) -> ThemeSpecificProps {
    ThemeSpecificProps {
        background_color: Override::Set(p.surface.clone()),
        background_opacity: Some(1.0),
        border_width: Some(BorderWidth::Uniform(0.0)),
        border_radius: Some(Radius::Uniform(12.0)),
        shadow: Override::Set(Shadow::new(0.0, 12.0, 24.0, -4.0, "rgba(0, 0, 0, 0.25)")),
        ..Default::default()
    }
}

/// Style id a selection refers to under `theme`
pub fn selected_style_id<'a>(selection: &'a StyleSelection, theme: &'a Theme) -> Option<&'a str> {
    match selection {
        StyleSelection::Unstyled => None,
        StyleSelection::ThemeDefault => theme.default_row_style.as_deref(),
        StyleSelection::Named(id) => Some(id.as_str()),
    }
}

/// Expand a selection into concrete properties.
///
/// Curated styles are looked up first, then the theme's custom styles.
pub fn expand_style(selection: &StyleSelection, theme: &Theme) -> Option<ThemeSpecificProps> {
    let id = selected_style_id(selection, theme)?;

    if let Some(style) = curated_style(id) {
        return Some(style.expand(&StylePalette::from_theme(theme)));
    }
    if let Some(custom) = theme.custom_styles.get(id) {
        let mut props = custom.clone();
        props.style_id = StyleSelection::Unstyled;
        return Some(props);
    }

    debug!(style_id = %id, theme = %theme.name, "Unknown style id - ignoring");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_theme::{builtin_theme, Padding, NEON_ID, PLAIN_ID};

    #[test]
    fn test_curated_ids_are_unique() {
        let mut ids: Vec<_> = CURATED_STYLES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CURATED_STYLES.len());
    }

    #[test]
    fn test_styles_follow_theme_colors() {
        let plain = builtin_theme(PLAIN_ID).unwrap();
        let neon = builtin_theme(NEON_ID).unwrap();
        let selection = StyleSelection::Named("outline".to_string());

        let on_plain = expand_style(&selection, &plain).unwrap();
        let on_neon = expand_style(&selection, &neon).unwrap();

        assert_eq!(on_plain.border_color.as_deref(), Some(plain.colors.accent.as_str()));
        assert_eq!(on_neon.border_color.as_deref(), Some(neon.colors.accent.as_str()));
        assert_eq!(on_plain.background_color, Override::Cleared);
    }

    #[test]
    fn test_theme_default_uses_configured_style() {
        let plain = builtin_theme(PLAIN_ID).unwrap();
        assert!(expand_style(&StyleSelection::ThemeDefault, &plain).is_none());

        let neon = builtin_theme(NEON_ID).unwrap();
        let expanded = expand_style(&StyleSelection::ThemeDefault, &neon).unwrap();
        assert_eq!(expanded.background_blur, Some(12.0));
    }

    #[test]
    fn test_custom_styles_are_found_after_curated() {
        let mut theme = builtin_theme(PLAIN_ID).unwrap();
        theme.custom_styles.insert(
            "roomy".to_string(),
            ThemeSpecificProps { padding: Some(Padding::Uniform(40.0)), ..Default::default() },
        );

        let expanded = expand_style(&StyleSelection::Named("roomy".to_string()), &theme).unwrap();
        assert_eq!(expanded.padding, Some(Padding::Uniform(40.0)));
        assert!(expand_style(&StyleSelection::Named("nope".to_string()), &theme).is_none());
        assert!(expand_style(&StyleSelection::Unstyled, &theme).is_none());
    }
}
