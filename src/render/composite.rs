//! Conversions between tiny-skia surfaces and `image` buffers, and the
//! blend operations the renderer needs.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{BlendMode, ColorU8, Paint, Pixmap, PixmapMut, Transform};

use crate::icon::Color;
use crate::pixmap::RectF;

/// Converts a tiny-skia pixmap to a straight-alpha image.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (target, pixel) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny-skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *target = Rgba([r, g, b, a]);
    }

    img
}

/// Converts a straight-alpha image to a tiny-skia pixmap.
///
/// Returns `None` for images without pixels.
pub fn image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;

    for (target, pixel) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = pixel.0;
        *target = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Some(pixmap)
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

/// Replaces the color of every pixel while keeping its coverage.
pub fn fill_source_in(pixmap: &mut Pixmap, color: Color) {
    let Some(rect) = RectF::from_size(pixmap.width() as f32, pixmap.height() as f32).to_skia()
    else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
    paint.blend_mode = BlendMode::SourceIn;
    paint.anti_alias = false;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

/// Clears `rect` to transparent.
pub fn erase(target: &mut PixmapMut<'_>, rect: RectF) {
    let Some(rect) = rect.to_skia() else {
        return;
    };

    let mut paint = Paint::default();
    paint.blend_mode = BlendMode::Clear;
    paint.anti_alias = false;
    target.fill_rect(rect, &paint, Transform::identity(), None);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia;

    #[test]
    fn unpremultiplies_pixels() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 128));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 128]);
    }

    #[test]
    fn transparent_pixels_are_zeroed() {
        assert_eq!(unpremultiply(10, 20, 30, 0), (0, 0, 0, 0));
    }

    #[test]
    fn image_to_pixmap_premultiplies() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 0]));
        let pixmap = image_to_pixmap(&img).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (3, 2));
        assert!(pixmap.pixels().iter().all(|p| p.red() == 0 && p.alpha() == 0));

        assert!(image_to_pixmap(&RgbaImage::new(0, 4)).is_none());
    }

    #[test]
    fn source_in_keeps_coverage() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);
        paint.anti_alias = false;
        let square = tiny_skia::Rect::from_xywh(0.0, 0.0, 2.0, 2.0).unwrap();
        pixmap.fill_rect(square, &paint, Transform::identity(), None);

        fill_source_in(&mut pixmap, Color::new(0, 0, 255, 255));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn erase_clears_only_the_rect() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::BLACK);

        erase(&mut pixmap.as_mut(), RectF::new(0.0, 0.0, 2.0, 4.0));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(1, 1).0[3], 0);
        assert_eq!(img.get_pixel(2, 1).0[3], 255);
    }

    #[test]
    fn erase_ignores_empty_rects() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::BLACK);

        erase(&mut pixmap.as_mut(), RectF::new(1.0, 1.0, 0.0, 2.0));

        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    }
}
