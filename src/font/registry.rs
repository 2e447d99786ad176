//! Tag to font registry.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};

use super::FontInfo;
use crate::tag::FontTag;

/// Lookup of fonts by tag.
pub trait FontCatalog: Send + Sync {
    /// Adds `font` under its tag.
    ///
    /// Returns `false` and logs a warning if the tag is already taken,
    /// whether by the same font or by a different one. The existing entry
    /// is kept either way.
    fn register_font(&self, font: FontInfo) -> bool;

    /// The font registered under `tag`, or the null font.
    fn from_tag(&self, tag: FontTag) -> FontInfo;

    /// All registered fonts ordered by font name, then by tag value.
    fn known_fonts(&self) -> Vec<FontInfo>;
}

/// Thread-safe [`FontCatalog`].
///
/// Fonts declared with [`icon_font!`](crate::icon_font) register themselves
/// in [`FontRegistry::global`] on first use.
#[derive(Default)]
pub struct FontRegistry {
    fonts: RwLock<HashMap<FontTag, FontInfo>>,
    sorted: Mutex<Vec<FontInfo>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static FontRegistry {
        static GLOBAL: OnceLock<FontRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FontRegistry::new)
    }

    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }
}

impl FontCatalog for FontRegistry {
    fn register_font(&self, font: FontInfo) -> bool {
        if !font.is_valid() {
            warn!(target: "fonticons", "Refusing to register invalid font {font:?}");
            return false;
        }

        let tag = font.tag();
        let mut fonts = self.fonts.write();

        match fonts.get(&tag) {
            None => {
                fonts.insert(tag, font);
                debug!(target: "fonticons", "Registered {} for index {}", font.type_name(), tag.index());
                true
            }
            Some(existing) if *existing == font => {
                warn!(target: "fonticons", "Font {} is already registered", font.type_name());
                false
            }
            Some(existing) => {
                warn!(
                    target: "fonticons",
                    "Other font already registered for index {}: {} blocks {}",
                    tag.index(),
                    existing.type_name(),
                    font.type_name()
                );
                false
            }
        }
    }

    fn from_tag(&self, tag: FontTag) -> FontInfo {
        self.fonts.read().get(&tag).copied().unwrap_or_default()
    }

    fn known_fonts(&self) -> Vec<FontInfo> {
        let fonts = self.fonts.read();
        let mut sorted = self.sorted.lock();

        if sorted.len() != fonts.len() {
            sorted.clear();
            sorted.extend(fonts.values().copied());
            sorted.sort_by(|lhs, rhs| {
                lhs.font_name()
                    .cmp(rhs.font_name())
                    .then_with(|| lhs.tag().cmp(&rhs.tag()))
            });
        }

        sorted.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
