//! ttf-parser backed glyph engine.

use log::debug;
use resvg::tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, PixmapMut, PixmapPaint, Transform,
};
use ttf_parser::{Face, GlyphId, OutlineBuilder, RasterImageFormat, Tag};

use super::{GlyphEngine, GlyphFormat, GlyphRun, Script};
use crate::font::FontHandle;
use crate::render::composite::image_to_pixmap;

const COLOR_TABLES: [&[u8; 4]; 4] = [b"CBDT", b"sbix", b"COLR", b"SVG "];
const OUTLINE_TABLES: [&[u8; 4]; 3] = [b"glyf", b"CFF ", b"CFF2"];

/// Draws glyphs from the first face of a font.
///
/// Outline glyphs are filled as paths. Glyphs that only exist as embedded
/// PNG bitmaps are decoded and drawn as images.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineEngine;

impl OutlineEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphEngine for OutlineEngine {
    /// Inspects the first face only, so fonts mixing color and outline
    /// faces are classified by that face.
    fn glyph_format(&self, font: &FontHandle, _script: Script) -> GlyphFormat {
        let Some(face) = font.primary().and_then(|blob| blob.parse()) else {
            return GlyphFormat::None;
        };

        let has_table = |tag: &[u8; 4]| face.raw_face().table(Tag::from_bytes(tag)).is_some();

        if COLOR_TABLES.into_iter().any(has_table) {
            GlyphFormat::ColorBitmap
        } else if OUTLINE_TABLES.into_iter().any(has_table) {
            GlyphFormat::Outline
        } else {
            GlyphFormat::None
        }
    }

    fn draw_glyph(&self, target: &mut PixmapMut<'_>, run: &GlyphRun<'_>) -> bool {
        let Some(face) = run.font.primary().and_then(|blob| blob.parse()) else {
            return false;
        };
        let Some(glyph) = face.glyph_index(run.ch) else {
            debug!(target: "fonticons", "{} has no glyph for {:#x}", run.font.family(), run.ch as u32);
            return false;
        };

        let placement = Placement::new(&face, glyph, run);
        let transform = run.transform.to_skia();

        if let Some(path) = outline_path(&face, glyph, placement.scale) {
            let mut paint = Paint::default();
            let color = run.color.unwrap_or(crate::icon::Color::new(0, 0, 0, u8::MAX));
            paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
            paint.anti_alias = true;

            let transform = transform.pre_translate(placement.x, placement.baseline);
            target.fill_path(&path, &paint, FillRule::Winding, transform, None);
            return true;
        }

        draw_raster(&face, glyph, run, &placement, transform, target)
    }
}

/// Position of a glyph centred in its box, in box coordinates.
struct Placement {
    scale: f32,
    x: f32,
    baseline: f32,
}

impl Placement {
    fn new(face: &Face<'_>, glyph: GlyphId, run: &GlyphRun<'_>) -> Self {
        let scale = run.pixel_size / f32::from(face.units_per_em().max(1));
        let advance = face.glyph_hor_advance(glyph).map_or(0.0, f32::from) * scale;
        let ascender = f32::from(face.ascender()) * scale;
        let descender = f32::from(face.descender()) * scale;

        Self {
            scale,
            x: run.rect.x + (run.rect.width - advance) / 2.0,
            baseline: run.rect.y + (run.rect.height - (ascender - descender)) / 2.0 + ascender,
        }
    }
}

/// Converts glyph outlines to a tiny-skia path, flipping y to point down.
struct SkiaOutlineBuilder {
    builder: PathBuilder,
    scale: f32,
}

impl OutlineBuilder for SkiaOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x * self.scale, -y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x * self.scale, -y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(x1 * self.scale, -y1 * self.scale, x * self.scale, -y * self.scale);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            x1 * self.scale,
            -y1 * self.scale,
            x2 * self.scale,
            -y2 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn outline_path(
    face: &Face<'_>,
    glyph: GlyphId,
    scale: f32,
) -> Option<resvg::tiny_skia::Path> {
    let mut builder = SkiaOutlineBuilder {
        builder: PathBuilder::new(),
        scale,
    };
    face.outline_glyph(glyph, &mut builder)?;
    builder.builder.finish()
}

fn draw_raster(
    face: &Face<'_>,
    glyph: GlyphId,
    run: &GlyphRun<'_>,
    placement: &Placement,
    transform: Transform,
    target: &mut PixmapMut<'_>,
) -> bool {
    let strike = run.pixel_size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
    let Some(raster) = face.glyph_raster_image(glyph, strike) else {
        return false;
    };
    if raster.format != RasterImageFormat::PNG {
        debug!(target: "fonticons", "Unsupported raster glyph format {:?}", raster.format);
        return false;
    }

    let image = match image::load_from_memory_with_format(raster.data, image::ImageFormat::Png) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            debug!(target: "fonticons", "Cannot decode raster glyph: {err}");
            return false;
        }
    };
    let Some(bitmap) = image_to_pixmap(&image) else {
        return false;
    };

    let scale = run.pixel_size / f32::from(raster.pixels_per_em.max(1));
    let left = placement.x + f32::from(raster.x) * scale;
    let top = placement.baseline - (f32::from(raster.y) + f32::from(raster.height)) * scale;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let transform = transform.pre_concat(Transform::from_row(scale, 0.0, 0.0, scale, left, top));
    target.draw_pixmap(0, 0, bitmap.as_ref(), &paint, transform, None);
    true
}

// ============================================================================
// Tests
// ============================================================================
