//! # Quire Resolver
//!
//! Turns stored property layers into effective properties for one theme, and
//! expands curated styles into concrete values.
//!
//! Resolution is a pure function of the entity's props, the theme id, the
//! theme and the curated style table. Nothing is cached; callers resolve on
//! read after every change.

mod compose;
mod resolve;
mod styles;

pub use compose::{apply_style, detach_style, reset_to_default_style};
pub use resolve::{
    resolve, EffectiveProps, EntityKind, Layers, PropertyResolver, DEFAULT_OPACITY,
    DEFAULT_PADDING,
};
pub use styles::{
    curated_style, expand_style, selected_style_id, CuratedStyle, StylePalette, CURATED_STYLES,
};
