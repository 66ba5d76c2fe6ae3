//! Value vocabulary shared by themes, override bags and resolved output.

use serde::{Deserialize, Serialize};

/// Padding in pixels, uniform or per side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f32),
    Sides {
        top: f32,
        right: f32,
        bottom: f32,
        left: f32,
    },
}

impl Padding {
    /// Expand to `[top, right, bottom, left]`
    pub fn sides(&self) -> [f32; 4] {
        match *self {
            Padding::Uniform(v) => [v; 4],
            Padding::Sides { top, right, bottom, left } => [top, right, bottom, left],
        }
    }
}

/// Border width in pixels, uniform or per side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BorderWidth {
    Uniform(f32),
    Sides {
        top: f32,
        right: f32,
        bottom: f32,
        left: f32,
    },
}

impl BorderWidth {
    pub fn sides(&self) -> [f32; 4] {
        match *self {
            BorderWidth::Uniform(v) => [v; 4],
            BorderWidth::Sides { top, right, bottom, left } => [top, right, bottom, left],
        }
    }

    pub fn is_zero(&self) -> bool {
        self.sides().iter().all(|w| *w == 0.0)
    }
}

/// Corner radius in pixels, uniform or per corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radius {
    Uniform(f32),
    #[serde(rename_all = "camelCase")]
    Corners {
        top_left: f32,
        top_right: f32,
        bottom_right: f32,
        bottom_left: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

/// How a background image is laid out inside its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Fill,
    Fit,
    Stretch,
    Tile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Structured box shadow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    #[serde(default)]
    pub spread: f32,
    pub color: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inset: bool,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: impl Into<String>) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color: color.into(),
            inset: false,
        }
    }
}
