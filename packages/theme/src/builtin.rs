//! Built-in themes. These are constructed in code and never persisted; a user
//! theme stored under the same id shadows them.

use crate::theme::{
    BackgroundDefaults, BorderDefaults, ColorTokens, RadiusTokens, ShadowTokens, SpacingTokens,
    Theme, TypographyTokens,
};
use crate::values::{BorderStyle, BorderWidth, ImageFit, Padding, Radius};

pub const PLAIN_ID: &str = "plain";
pub const NEON_ID: &str = "neon";

/// Ids of all built-in themes, in display order
pub const BUILTIN_IDS: [&str; 2] = [PLAIN_ID, NEON_ID];

pub fn builtin_theme(id: &str) -> Option<Theme> {
    match id {
        PLAIN_ID => Some(plain()),
        NEON_ID => Some(neon()),
        _ => None,
    }
}

pub fn is_builtin(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

fn background(color: &str) -> BackgroundDefaults {
    BackgroundDefaults {
        background_color: Some(color.to_string()),
        background_opacity: Some(1.0),
        background_image: None,
        background_image_opacity: None,
        background_image_type: Some(ImageFit::Fill),
    }
}

pub fn plain() -> Theme {
    Theme {
        name: "Plain".to_string(),
        colors: ColorTokens {
            bg: "#ffffff".to_string(),
            surface: "#f7f7f8".to_string(),
            text: "#1f2328".to_string(),
            muted_text: "#656d76".to_string(),
            border: "#d0d7de".to_string(),
            focus_ring: "#0969da".to_string(),
            accent: "#0969da".to_string(),
        },
        typography: TypographyTokens {
            font_family: "Inter, system-ui, sans-serif".to_string(),
            heading_font_family: None,
            base_size: 16.0,
            line_height: 1.5,
            scale: 1.25,
        },
        spacing: SpacingTokens { xs: 4.0, sm: 8.0, md: 16.0, lg: 24.0, xl: 40.0 },
        radius: RadiusTokens { sm: 4.0, md: 8.0, lg: 16.0 },
        shadow: ShadowTokens {
            subtle: "0 1px 2px rgba(31, 35, 40, 0.08)".to_string(),
        },
        page_background: Some(background("#ffffff")),
        row_padding: Some(Padding::Uniform(16.0)),
        row_background: Some(background("#ffffff")),
        row_border: Some(BorderDefaults {
            color: Some("#d0d7de".to_string()),
            width: Some(BorderWidth::Uniform(0.0)),
            style: Some(BorderStyle::Solid),
        }),
        row_border_radius: Some(Radius::Uniform(0.0)),
        cell_padding: Some(Padding::Uniform(8.0)),
        cell_background: Some(background("#ffffff")),
        cell_border: Some(BorderDefaults {
            color: Some("#d0d7de".to_string()),
            width: Some(BorderWidth::Uniform(0.0)),
            style: Some(BorderStyle::Solid),
        }),
        cell_border_radius: Some(Radius::Uniform(4.0)),
        resource_background: None,
        default_row_style: None,
        ..Default::default()
    }
}

pub fn neon() -> Theme {
    Theme {
        name: "Neon".to_string(),
        colors: ColorTokens {
            bg: "#0b0b14".to_string(),
            surface: "#15152a".to_string(),
            text: "#f2f2ff".to_string(),
            muted_text: "#9a9ac4".to_string(),
            border: "#3b3b7a".to_string(),
            focus_ring: "#ff2bd6".to_string(),
            accent: "#39ff14".to_string(),
        },
        typography: TypographyTokens {
            font_family: "Space Grotesk, system-ui, sans-serif".to_string(),
            heading_font_family: Some("Orbitron, sans-serif".to_string()),
            base_size: 16.0,
            line_height: 1.6,
            scale: 1.333,
        },
        spacing: SpacingTokens { xs: 4.0, sm: 8.0, md: 16.0, lg: 28.0, xl: 48.0 },
        radius: RadiusTokens { sm: 6.0, md: 12.0, lg: 20.0 },
        shadow: ShadowTokens {
            subtle: "0 0 12px rgba(57, 255, 20, 0.35)".to_string(),
        },
        page_background: Some(background("#0b0b14")),
        row_padding: Some(Padding::Uniform(20.0)),
        row_background: Some(background("#0b0b14")),
        row_border: Some(BorderDefaults {
            color: Some("#3b3b7a".to_string()),
            width: Some(BorderWidth::Uniform(1.0)),
            style: Some(BorderStyle::Solid),
        }),
        row_border_radius: Some(Radius::Uniform(12.0)),
        cell_padding: Some(Padding::Uniform(12.0)),
        cell_background: Some(background("#15152a")),
        cell_border: Some(BorderDefaults {
            color: Some("#3b3b7a".to_string()),
            width: Some(BorderWidth::Uniform(1.0)),
            style: Some(BorderStyle::Solid),
        }),
        cell_border_radius: Some(Radius::Uniform(8.0)),
        resource_background: Some(background("#15152a")),
        default_row_style: Some("glass".to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_theme(PLAIN_ID).map(|t| t.name), Some("Plain".to_string()));
        assert_eq!(builtin_theme(NEON_ID).map(|t| t.name), Some("Neon".to_string()));
        assert!(builtin_theme("sepia").is_none());
        assert!(is_builtin("neon"));
        assert!(!is_builtin("Neon"));
    }

    #[test]
    fn test_builtins_are_already_migrated() {
        for id in BUILTIN_IDS {
            let value = builtin_theme(id).unwrap().to_value().unwrap();
            let migrated = crate::migrate::migrate_theme(value.clone(), id).unwrap();
            assert_eq!(migrated, value);
        }
    }
}
