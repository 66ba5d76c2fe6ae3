//! Theme record: design tokens plus default visual bundles per entity type.

use crate::props::ThemeSpecificProps;
use crate::values::{BorderStyle, BorderWidth, ImageFit, Padding, Radius};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_THEME_NAME: &str = "Untitled Theme";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorTokens {
    pub bg: String,
    pub surface: String,
    pub text: String,
    pub muted_text: String,
    pub border: String,
    pub focus_ring: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyTokens {
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font_family: Option<String>,
    pub base_size: f32,
    pub line_height: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingTokens {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusTokens {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowTokens {
    /// CSS shadow used for subtle elevation
    pub subtle: String,
}

/// Default background for one entity type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_type: Option<ImageFit>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<BorderWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
}

/// A complete theme bundle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub name: String,
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
    pub spacing: SpacingTokens,
    pub radius: RadiusTokens,
    pub shadow: ShadowTokens,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_background: Option<BackgroundDefaults>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_background: Option<BackgroundDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_border: Option<BorderDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_border_radius: Option<Radius>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_background: Option<BackgroundDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_border: Option<BorderDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_border_radius: Option<Radius>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_background: Option<BackgroundDefaults>,

    /// Style applied to rows that carry no override bag for this theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_row_style: Option<String>,

    /// User-authored styles addressable by `styleId`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_styles: BTreeMap<String, ThemeSpecificProps>,

    /// Fields this version does not know about, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Theme {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Copy of this theme under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
