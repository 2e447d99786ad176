//! Test fonts and a recording glyph engine.

use parking_lot::Mutex;
use resvg::tiny_skia::{Paint, PixmapMut, Rect};

use crate::engine::{GlyphEngine, GlyphFormat, GlyphRun, Script};
use crate::font::{FaceBlob, FontHandle, FontSource, loader};
use crate::icon::Color;
use crate::transform::Matrix3;
use crate::{RectF, icon_font};

pub const TEST_FAMILY: &str = "Test Icons";
pub const COLOR_FAMILY: &str = "Color Icons";

/// Native color of glyphs in the color test font.
pub const NATIVE_RED: Color = Color::new(255, 0, 0, 255);

fn test_font() -> Option<FontHandle> {
    Some(FontHandle::new(TEST_FAMILY, Vec::new()))
}

fn other_font() -> Option<FontHandle> {
    Some(FontHandle::new("Other Icons", Vec::new()))
}

fn color_font() -> Option<FontHandle> {
    Some(FontHandle::new(COLOR_FAMILY, Vec::new()))
}

icon_font! {
    pub enum TestIcons {
        tag: 120,
        name: "Test Icons",
        family: "Test Icons",
        source: FontSource::Loader(test_font),
        license: None,
        symbols {
            Add = 0xE710,
            Remove = 0xE738,
            SolidStar = 0xE735,
            AddFriend = 0xE8FA,
        }
        aliases {
            Plus = Add,
        }
    }
}

icon_font! {
    pub enum OtherIcons {
        tag: 121,
        name: "Other Icons",
        family: "Other Icons",
        source: FontSource::Loader(other_font),
        license: None,
        symbols {
            Add = 0xE710,
            Bell = 0xEA8F,
        }
    }
}

icon_font! {
    pub enum ColorIcons {
        tag: 122,
        name: "Color Icons",
        family: "Color Icons",
        source: FontSource::Loader(color_font),
        license: None,
        symbols {
            Heart = 0x2764,
            Smile = 0x1F600,
        }
    }
}

icon_font! {
    pub enum MissingIcons {
        tag: 123,
        name: "Missing Icons",
        family: "Missing Icons",
        source: FontSource::File("does/not/exist.ttf"),
        license: Some("does/not/exist-LICENSE.txt"),
        symbols {
            Ghost = 0xE000,
        }
    }
}

icon_font! {
    /// Shares its tag with [`TestIcons`]. Only used with local registries.
    pub enum ClashingIcons {
        tag: 120,
        name: "Clashing Icons",
        family: "Clashing Icons",
        source: FontSource::System,
        license: None,
        symbols {
            Clash = 0xE001,
        }
    }
}

/// The first installed face accepted by `accept`, as a single-face font.
pub fn system_face(accept: impl Fn(&ttf_parser::Face<'_>) -> bool) -> Option<FontHandle> {
    let db = loader::system_fonts();
    db.faces().find_map(|info| {
        let blob = db
            .with_face_data(info.id, |data, index| {
                let face = ttf_parser::Face::parse(data, index).ok()?;
                accept(&face).then(|| FaceBlob::new(data, index))
            })
            .flatten()?;
        let family = info.families.first().map_or("", |(name, _)| name.as_str());
        Some(FontHandle::new(family, vec![blob]))
    })
}

/// One recorded [`GlyphEngine::draw_glyph`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRun {
    pub family: String,
    pub ch: char,
    pub pixel_size: f32,
    pub rect: RectF,
    pub transform: Matrix3,
    pub color: Option<Color>,
}

/// Engine that records every draw and fills a centred square instead of a
/// real glyph.
///
/// Fonts with family [`COLOR_FAMILY`] report [`GlyphFormat::ColorBitmap`] and
/// always draw in [`NATIVE_RED`]; all others are outline fonts drawing in
/// the requested color, black when none is given.
#[derive(Default)]
pub struct RecordingEngine {
    runs: Mutex<Vec<RecordedRun>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.runs.lock().len()
    }
}

impl GlyphEngine for RecordingEngine {
    fn glyph_format(&self, font: &FontHandle, _script: Script) -> GlyphFormat {
        if font.family() == COLOR_FAMILY {
            GlyphFormat::ColorBitmap
        } else {
            GlyphFormat::Outline
        }
    }

    fn draw_glyph(&self, target: &mut PixmapMut<'_>, run: &GlyphRun<'_>) -> bool {
        self.runs.lock().push(RecordedRun {
            family: run.font.family().to_owned(),
            ch: run.ch,
            pixel_size: run.pixel_size,
            rect: run.rect,
            transform: run.transform,
            color: run.color,
        });

        let color = if run.font.family() == COLOR_FAMILY {
            NATIVE_RED
        } else {
            run.color.unwrap_or(Color::new(0, 0, 0, 255))
        };

        let (cx, cy) = run.rect.center();
        let half = run.pixel_size / 4.0;
        let Some(square) = Rect::from_xywh(cx - half, cy - half, half * 2.0, half * 2.0) else {
            return false;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
        paint.anti_alias = false;
        target.fill_rect(square, &paint, run.transform.to_skia(), None);
        true
    }
}
