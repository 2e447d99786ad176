//! Adapter exposing icons to a host icon abstraction.

use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia::PixmapMut;

use super::IconRenderer;
use crate::cache_key::CacheKey;
use crate::icon::ModalIcon;
use crate::options::{IconMode, IconState};
use crate::pixmap::{IconPixmap, RectF, SizePx};

/// What a host toolkit needs from an icon.
pub trait IconEngine {
    /// Paints into `rect` of `target`, replacing what was there.
    fn paint(&self, target: &mut PixmapMut<'_>, rect: RectF, mode: IconMode, state: IconState);

    fn pixmap(&self, size: SizePx, mode: IconMode, state: IconState) -> Arc<IconPixmap>;

    /// Identifies the icon independently of mode, state and size.
    fn key(&self) -> CacheKey;

    fn is_null(&self) -> bool;

    fn icon_name(&self) -> String;
}

/// [`IconEngine`] drawing a [`ModalIcon`] with an [`IconRenderer`].
#[derive(Clone)]
pub struct FontIconEngine {
    icon: ModalIcon,
    renderer: Arc<IconRenderer>,
}

impl FontIconEngine {
    pub fn new(icon: ModalIcon, renderer: Arc<IconRenderer>) -> Self {
        Self { icon, renderer }
    }

    pub fn icon(&self) -> &ModalIcon {
        &self.icon
    }

    pub fn renderer(&self) -> &Arc<IconRenderer> {
        &self.renderer
    }
}

impl IconEngine for FontIconEngine {
    fn paint(&self, target: &mut PixmapMut<'_>, rect: RectF, mode: IconMode, state: IconState) {
        self.renderer.paint(&self.icon, target, rect, mode, state);
    }

    fn pixmap(&self, size: SizePx, mode: IconMode, state: IconState) -> Arc<IconPixmap> {
        self.renderer.pixmap(&self.icon, size, mode, state)
    }

    fn key(&self) -> CacheKey {
        CacheKey::for_icon(&self.icon)
    }

    fn is_null(&self) -> bool {
        self.icon.is_null()
    }

    fn icon_name(&self) -> String {
        self.icon.name()
    }
}

impl fmt::Debug for FontIconEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontIconEngine")
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}
