//! # Quire Theme
//!
//! Theme tokens, per-entity default bundles and the persisted theme store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ storage: key → JSON payload                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ migrate: repair records to current schema   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: built-ins + user themes, active id,  │
//! │        change notifications                 │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The property vocabulary (`ThemeSpecificProps`, `Override`, value types)
//! lives here as well, since themes carry custom styles expressed in it.

pub mod builtin;
mod error;
pub mod migrate;
pub mod naming;
mod props;
pub mod storage;
mod store;
mod theme;
pub mod values;

pub use builtin::{builtin_theme, is_builtin, NEON_ID, PLAIN_ID};
pub use error::{MigrationError, StorageError, ThemeError};
pub use migrate::{load_collection, migrate_collection, migrate_theme};
pub use naming::{slugify, unique_theme_id, unique_theme_name};
pub use props::{Override, StyleSelection, ThemeSpecificProps};
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};
pub use store::{ListenerId, PersistMode, ThemeEvent, ThemeStore, COLLECTION_KEY};
pub use theme::{
    BackgroundDefaults, BorderDefaults, ColorTokens, RadiusTokens, ShadowTokens, SpacingTokens,
    Theme, TypographyTokens, DEFAULT_THEME_NAME,
};
pub use values::{BorderStyle, BorderWidth, ImageFit, Padding, Radius, Shadow, VerticalAlign};
