//! The icon rendering pipeline.
//!
//! [`IconRenderer`] turns icons into pixels. Drawing resolves the glyph size
//! and color from [`DrawOptions`] and the palette, asks the [`GlyphEngine`]
//! how the font stores its glyphs, and then either draws the glyph directly
//! or, for color glyph fonts that ignore a fill color, renders it offscreen
//! and recolors it with a source-in blend. [`IconRenderer::pixmap`] adds a
//! content-keyed [`PixmapCache`] on top.

pub mod composite;
mod engine;

pub use engine::{FontIconEngine, IconEngine};

use std::sync::Arc;

use log::{debug, trace};
use resvg::tiny_skia::{FilterQuality, Pixmap, PixmapMut, PixmapPaint, Transform};

use crate::cache::{LruPixmapCache, PixmapCache};
use crate::cache_key::CacheKey;
use crate::config::Config;
use crate::engine::{GlyphEngine, GlyphFormat, GlyphRun, OutlineEngine};
use crate::icon::{Color, Icon, ModalIcon};
use crate::options::{DrawOptions, IconMode, IconState};
use crate::palette::{ColorResolver, Palette};
use crate::pixmap::{IconPixmap, RectF, SizePx};
use crate::transform::{Matrix3, centered};
use composite::{erase, fill_source_in, pixmap_to_rgba_image};

// ============================================================================
// IconRenderer
// ============================================================================

/// Draws icons through a glyph engine and caches the resulting pixmaps.
///
/// A renderer is cheap to share behind an [`Arc`]. Drawing only touches the
/// target surface passed in, so one renderer can serve several threads as
/// long as each thread draws into its own surface.
pub struct IconRenderer {
    engine: Arc<dyn GlyphEngine>,
    cache: Arc<dyn PixmapCache>,
    palette: Arc<dyn ColorResolver>,
    config: Config,
}

impl IconRenderer {
    /// Creates a renderer with the outline engine, an LRU cache sized by
    /// `config` and the light palette.
    pub fn new(config: Config) -> Self {
        Self {
            engine: Arc::new(OutlineEngine::new()),
            cache: Arc::new(LruPixmapCache::new(config.cache_capacity)),
            palette: Arc::new(Palette::light()),
            config,
        }
    }

    pub fn with_engine(mut self, engine: Arc<dyn GlyphEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn PixmapCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the palette used by [`IconRenderer::pixmap`] and
    /// [`IconRenderer::paint`].
    pub fn with_palette(mut self, palette: Arc<dyn ColorResolver>) -> Self {
        self.palette = palette;
        self
    }

    pub fn engine(&self) -> &Arc<dyn GlyphEngine> {
        &self.engine
    }

    pub fn cache(&self) -> &Arc<dyn PixmapCache> {
        &self.cache
    }

    pub fn palette(&self) -> &Arc<dyn ColorResolver> {
        &self.palette
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Draws `icon` centred in `rect`.
    ///
    /// Returns `false` when nothing was drawn: the icon has no symbol, the
    /// rectangle is empty, or the font is unavailable.
    pub fn draw(
        &self,
        icon: &Icon,
        target: &mut PixmapMut<'_>,
        rect: RectF,
        palette: &dyn ColorResolver,
        options: &DrawOptions,
        fallback_mode: IconMode,
    ) -> bool {
        let symbol = icon.symbol();
        if symbol.is_null() || rect.is_empty() {
            return false;
        }
        let Some(font) = symbol.font() else {
            return false;
        };
        let Some(ch) = symbol.to_char() else {
            debug!(target: "fonticons", "{:?} is not a valid character", symbol);
            return false;
        };

        let pixel_size = options.pixel_size_for(&rect, &self.config);
        let color = options.effective_color(icon.color(), palette, fallback_mode);

        let script = self.engine.script_of(&symbol.text());
        let format = self.engine.glyph_format(&font, script);

        let run = GlyphRun {
            font: &font,
            ch,
            pixel_size,
            rect,
            transform: centered(icon.matrix(), &rect),
            color,
        };

        match (color, format) {
            (None, _) => self.engine.draw_glyph(target, &run),
            (Some(color), GlyphFormat::ColorBitmap) => {
                self.draw_recolored(target, &run, icon.matrix(), color)
            }
            _ => self.engine.draw_glyph(target, &run),
        }
    }

    /// Draws a color glyph offscreen at device pixel ratio and replaces its
    /// color, keeping only its coverage.
    fn draw_recolored(
        &self,
        target: &mut PixmapMut<'_>,
        run: &GlyphRun<'_>,
        matrix: &Matrix3,
        color: Color,
    ) -> bool {
        let ratio = self.config.device_pixel_ratio.max(f32::EPSILON);
        let width = (run.rect.width * ratio).ceil() as u32;
        let height = (run.rect.height * ratio).ceil() as u32;
        let Some(mut offscreen) = Pixmap::new(width, height) else {
            return false;
        };

        let local = RectF::from_size(run.rect.width, run.rect.height);
        let ratio64 = f64::from(ratio);
        let offscreen_run = GlyphRun {
            font: run.font,
            ch: run.ch,
            pixel_size: run.pixel_size,
            rect: local,
            transform: centered(matrix, &local) * Matrix3::from_scale(ratio64, ratio64),
            color: None,
        };

        if !self.engine.draw_glyph(&mut offscreen.as_mut(), &offscreen_run) {
            return false;
        }
        fill_source_in(&mut offscreen, color);

        let paint = PixmapPaint {
            quality: if ratio == 1.0 {
                FilterQuality::Nearest
            } else {
                FilterQuality::Bilinear
            },
            ..PixmapPaint::default()
        };
        let placement = Transform::from_row(
            1.0 / ratio,
            0.0,
            0.0,
            1.0 / ratio,
            run.rect.x,
            run.rect.y,
        );
        target.draw_pixmap(0, 0, offscreen.as_ref(), &paint, placement, None);
        true
    }

    /// Draws the icon `icon` shows in `state`.
    pub fn draw_modal(
        &self,
        icon: &ModalIcon,
        target: &mut PixmapMut<'_>,
        rect: RectF,
        palette: &dyn ColorResolver,
        options: &DrawOptions,
        fallback_mode: IconMode,
        state: IconState,
    ) -> bool {
        self.draw(icon.select(state), target, rect, palette, options, fallback_mode)
    }

    /// Clears `rect` and draws `icon` filling it, with the renderer's palette.
    pub fn paint(
        &self,
        icon: &ModalIcon,
        target: &mut PixmapMut<'_>,
        rect: RectF,
        mode: IconMode,
        state: IconState,
    ) {
        erase(target, rect);
        let options = DrawOptions::new().fill_box().mode(mode);
        self.draw_modal(icon, target, rect, self.palette.as_ref(), &options, mode, state);
    }

    // ------------------------------------------------------------------------
    // Pixmaps
    // ------------------------------------------------------------------------

    /// Renders `icon` into a pixmap of `size`, going through the cache.
    ///
    /// Null icons and unavailable fonts give a transparent pixmap. Null icons
    /// are never cached.
    pub fn pixmap(
        &self,
        icon: &ModalIcon,
        size: SizePx,
        mode: IconMode,
        state: IconState,
    ) -> Arc<IconPixmap> {
        let key = CacheKey::for_pixmap(icon, mode, state, size.min_side());

        if !key.is_empty() {
            if let Some(found) = self.cache.find(&key) {
                trace!(target: "fonticons", "Pixmap cache hit for {}", key);
                return found;
            }
        }

        let pixmap = Arc::new(self.render(icon, size, mode, state));
        if !key.is_empty() {
            self.cache.insert(key, pixmap.clone());
        }
        pixmap
    }

    fn render(&self, icon: &ModalIcon, size: SizePx, mode: IconMode, state: IconState) -> IconPixmap {
        let Some(mut surface) = Pixmap::new(size.width, size.height) else {
            return IconPixmap::blank(size, 1.0);
        };

        let rect = RectF::from_size(size.width as f32, size.height as f32);
        self.paint(icon, &mut surface.as_mut(), rect, mode, state);
        IconPixmap::new(pixmap_to_rgba_image(&surface), 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
