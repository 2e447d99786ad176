//! Geometry and rendered image types.

use image::RgbaImage;
use resvg::tiny_skia;

/// A rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The smaller of width and height.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// True if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// The tiny-skia rect, or `None` for empty rects.
    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// A 2D size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns a square size.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// The smaller of width and height. Pixmaps are cached by this value.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rendered icon image.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPixmap {
    /// The image data in straight-alpha RGBA format.
    pub data: RgbaImage,

    /// The display scale factor.
    ///
    /// The "logical" size of the pixmap is `dimensions / scale`.
    pub scale: f32,
}

impl IconPixmap {
    pub fn new(data: RgbaImage, scale: f32) -> Self {
        Self { data, scale }
    }

    /// A fully transparent pixmap.
    pub fn blank(size: SizePx, scale: f32) -> Self {
        Self::new(RgbaImage::new(size.width, size.height), scale)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the logical size of the pixmap (dimensions / scale).
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }

    /// True if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.pixels().all(|pixel| pixel.0[3] == 0)
    }

    /// Size of the pixel data in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.as_raw().len()
    }
}
