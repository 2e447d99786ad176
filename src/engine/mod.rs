//! Glyph drawing backends.
//!
//! The renderer never rasterizes glyphs itself. It asks a [`GlyphEngine`]
//! which kind of glyphs a font has and then lets it draw one glyph into a
//! tiny-skia surface. [`OutlineEngine`] is the default backend built on
//! ttf-parser.

mod outline;

pub use outline::OutlineEngine;

use resvg::tiny_skia::PixmapMut;

use crate::font::FontHandle;
use crate::icon::Color;
use crate::pixmap::RectF;
use crate::transform::Matrix3;

/// Writing system of a piece of text, as far as glyph selection cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Script {
    Common,
    Latin,
    Greek,
    Cyrillic,
    Symbols,
    Emoji,
    /// Private use area and unassigned codepoints, where icon fonts live.
    #[default]
    Unknown,
}

impl Script {
    pub fn of(ch: char) -> Self {
        match ch as u32 {
            0x0000..=0x0040 | 0x005B..=0x0060 | 0x007B..=0x00BF => Self::Common,
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F | 0x1E00..=0x1EFF => Self::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Self::Greek,
            0x0400..=0x052F => Self::Cyrillic,
            0x2000..=0x2BFF => Self::Symbols,
            0x1F300..=0x1FAFF => Self::Emoji,
            _ => Self::Unknown,
        }
    }
}

/// How a font stores its glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GlyphFormat {
    #[default]
    None,
    /// Scalable outlines, drawn in any color.
    Outline,
    /// Color bitmaps or layered color glyphs, drawn in their own colors.
    ColorBitmap,
}

/// One glyph to draw.
#[derive(Debug, Clone)]
pub struct GlyphRun<'a> {
    pub font: &'a FontHandle,
    pub ch: char,
    /// Em size in pixels before `transform`.
    pub pixel_size: f32,
    /// Box the glyph is centred in, before `transform`.
    pub rect: RectF,
    /// Maps the box into the target surface.
    pub transform: Matrix3,
    /// Fill color for outline glyphs. `None` draws black outlines and leaves
    /// color glyphs in their native colors.
    pub color: Option<Color>,
}

/// Font introspection and glyph drawing.
pub trait GlyphEngine: Send + Sync {
    /// Script of the first character of `text`.
    fn script_of(&self, text: &str) -> Script {
        text.chars().next().map_or(Script::Unknown, Script::of)
    }

    /// Glyph format `font` uses for `script`.
    fn glyph_format(&self, font: &FontHandle, script: Script) -> GlyphFormat;

    /// Draws `run` into `target`. Returns `false` if nothing was drawn.
    fn draw_glyph(&self, target: &mut PixmapMut<'_>, run: &GlyphRun<'_>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEngine;

    #[test]
    fn scripts() {
        assert_eq!(Script::of('A'), Script::Latin);
        assert_eq!(Script::of('7'), Script::Common);
        assert_eq!(Script::of('Ж'), Script::Cyrillic);
        assert_eq!(Script::of('\u{2764}'), Script::Symbols);
        assert_eq!(Script::of('\u{1F600}'), Script::Emoji);
        assert_eq!(Script::of('\u{E710}'), Script::Unknown);
        assert_eq!(Script::of('\u{F0152}'), Script::Unknown);
    }

    #[test]
    fn script_of_uses_first_character() {
        let engine = RecordingEngine::new();
        assert_eq!(engine.script_of("A\u{E710}"), Script::Latin);
        assert_eq!(engine.script_of(""), Script::Unknown);
    }
}
