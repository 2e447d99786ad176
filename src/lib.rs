//! fonticons: icon fonts as typed symbols
//!
//! This crate turns icon fonts into strongly typed symbol sets and renders
//! them as pixmaps. A font is declared once with [`icon_font!`]; each of its
//! symbols becomes an enum variant that converts into a [`Symbol`], and
//! symbols combine with colors and transforms into [`Icon`] values.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fonticons::{
//!     icon_font, Color, Config, FontSource, IconMode, IconRenderer, IconState, SizePx,
//!     Transform,
//! };
//!
//! icon_font! {
//!     pub enum Segoe {
//!         tag: 92,
//!         name: "Segoe Fluent Icons",
//!         family: "Segoe Fluent Icons",
//!         source: FontSource::System,
//!         license: None,
//!         symbols { Add = 0xE710, Remove = 0xE738 }
//!     }
//! }
//!
//! let icon = Segoe::Add | Color::new(0, 120, 215, 255) | Transform::Rotate90;
//! let renderer = Arc::new(IconRenderer::new(Config::default()));
//!
//! // Fonts that are not installed render as transparent pixmaps.
//! let pixmap = renderer.pixmap(&icon.into(), SizePx::square(32), IconMode::Normal, IconState::Off);
//! assert_eq!(pixmap.dimensions(), SizePx::square(32));
//! ```
//!
//! # Identities
//!
//! Fonts and symbols have compact integer tags ([`FontTag`], [`SymbolTag`])
//! that survive serialization. [`FontInfo::from_tag`] and
//! [`Symbol::from_tag`] rebuild them through the process-wide
//! [`FontRegistry`].
//!
//! # Rendering
//!
//! [`IconRenderer`] draws through a [`GlyphEngine`] (the ttf-parser based
//! [`OutlineEngine`] by default) and caches pixmaps under content keys built
//! by [`CacheKey`].

mod cache;
mod cache_key;
mod config;
mod error;
pub mod engine;
pub mod font;
mod icon;
pub mod metadata;
mod options;
mod palette;
mod pixmap;
pub mod render;
mod symbol;
mod tag;
mod transform;

#[cfg(test)]
mod testing;

pub use cache::{CacheStats, LruPixmapCache, PixmapCache};
pub use cache_key::{CacheKey, KeyField};
pub use config::Config;
pub use engine::{GlyphEngine, GlyphFormat, GlyphRun, OutlineEngine, Script};
pub use error::{Error, Result};
pub use font::{
    FaceBlob, FontCatalog, FontDescriptor, FontHandle, FontInfo, FontRegistry, FontSource,
    FontType, SymbolEnum,
};
pub use icon::{Color, Icon, IconChange, ModalIcon};
pub use options::{DrawOptions, FontSize, IconMode, IconState};
pub use self::palette::{ColorGroup, ColorResolver, ColorRole, Palette, fade_towards, resolve_for_mode};
pub use pixmap::{IconPixmap, RectF, SizePx};
pub use render::{FontIconEngine, IconEngine, IconRenderer};
pub use symbol::Symbol;
pub use tag::{FONT_FIELD, FontTag, SYMBOL_FIELD, SymbolTag, TagField};
pub use transform::{Axis, IconTransform, Matrix3, MatrixKind, Transform, centered};
