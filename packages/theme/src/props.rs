//! # Per-theme property bags
//!
//! A `ThemeSpecificProps` bag holds the explicit customizations a user made to
//! one entity (page, row or cell) for one theme. Every field may be absent, in
//! which case resolution continues with the next layer.
//!
//! Background color, background image and shadow distinguish three states:
//!
//! ```text
//! absent       → Override::Inherit   (use the next layer)
//! null / ""    → Override::Cleared   (transparent / none, stops the chain)
//! value        → Override::Set(v)
//! ```

use crate::values::{BorderStyle, BorderWidth, ImageFit, Padding, Radius, Shadow, VerticalAlign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state field: inherit, explicitly cleared, or explicitly set
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Override<T> {
    #[default]
    Inherit,
    Cleared,
    Set(T),
}

impl<T> Override<T> {
    pub fn is_inherit(&self) -> bool {
        matches!(self, Override::Inherit)
    }

    /// `None` when inheriting, `Some(None)` when cleared, `Some(Some(v))` when set
    pub fn as_layer(&self) -> Option<Option<&T>> {
        match self {
            Override::Inherit => None,
            Override::Cleared => Some(None),
            Override::Set(v) => Some(Some(v)),
        }
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Override::Set(v),
            None => Override::Cleared,
        }
    }
}

impl<T: Serialize> Serialize for Override<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Override::Set(v) => v.serialize(serializer),
            Override::Inherit | Override::Cleared => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Override<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Override::from_option)
    }
}

/// Color/image fields also treat the legacy empty string as cleared
fn deserialize_paint<'de, D>(deserializer: D) -> Result<Override<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value {
        Some(s) if s.trim().is_empty() => Override::Cleared,
        other => Override::from_option(other),
    })
}

/// Which style, if any, an entity uses for a theme
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StyleSelection {
    /// No `styleId` key: raw overrides only
    #[default]
    Unstyled,
    /// `styleId: null`: the theme's configured default style
    ThemeDefault,
    /// `styleId: "<id>"`: a curated or custom style
    Named(String),
}

impl StyleSelection {
    pub fn is_unstyled(&self) -> bool {
        matches!(self, StyleSelection::Unstyled)
    }
}

impl Serialize for StyleSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleSelection::Named(id) => serializer.serialize_str(id),
            StyleSelection::Unstyled | StyleSelection::ThemeDefault => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for StyleSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(id) => StyleSelection::Named(id),
            None => StyleSelection::ThemeDefault,
        })
    }
}

/// Explicit property overrides for one entity under one theme
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSpecificProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(
        deserialize_with = "deserialize_paint",
        skip_serializing_if = "Override::is_inherit"
    )]
    pub background_color: Override<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f32>,

    #[serde(
        deserialize_with = "deserialize_paint",
        skip_serializing_if = "Override::is_inherit"
    )]
    pub background_image: Override<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_opacity: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_type: Option<ImageFit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<BorderWidth>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Radius>,

    #[serde(skip_serializing_if = "Override::is_inherit")]
    pub shadow: Override<Shadow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_blur: Option<f32>,

    #[serde(skip_serializing_if = "StyleSelection::is_unstyled")]
    pub style_id: StyleSelection,
}

impl ThemeSpecificProps {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge `partial` into `self`; every field present in `partial` wins
    pub fn merge(&mut self, partial: &ThemeSpecificProps) {
        fn take<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }
        fn take_override<T: Clone>(dst: &mut Override<T>, src: &Override<T>) {
            if !src.is_inherit() {
                dst.clone_from(src);
            }
        }

        take(&mut self.vertical_align, &partial.vertical_align);
        take(&mut self.padding, &partial.padding);
        take_override(&mut self.background_color, &partial.background_color);
        take(&mut self.background_opacity, &partial.background_opacity);
        take_override(&mut self.background_image, &partial.background_image);
        take(&mut self.background_image_opacity, &partial.background_image_opacity);
        take(&mut self.background_image_type, &partial.background_image_type);
        take(&mut self.border_color, &partial.border_color);
        take(&mut self.border_width, &partial.border_width);
        take(&mut self.border_style, &partial.border_style);
        take(&mut self.border_radius, &partial.border_radius);
        take_override(&mut self.shadow, &partial.shadow);
        take(&mut self.background_blur, &partial.background_blur);
        if !partial.style_id.is_unstyled() {
            self.style_id = partial.style_id.clone();
        }
    }

    /// A copy of `self` with `top` merged over it
    pub fn overlaid_with(&self, top: &ThemeSpecificProps) -> ThemeSpecificProps {
        let mut merged = self.clone();
        merged.merge(top);
        merged
    }
}
