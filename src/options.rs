//! Per-draw options and display states.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::icon::Color;
use crate::palette::{ColorResolver, ColorRole, resolve_for_mode};
use crate::pixmap::RectF;

/// Interaction state an icon is drawn for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum IconMode {
    #[default]
    Normal,
    Disabled,
    Active,
    Selected,
}

/// Toggle state selecting between the two icons of a
/// [`ModalIcon`](crate::ModalIcon).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum IconState {
    On,
    #[default]
    Off,
}

impl From<bool> for IconState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// How the glyph size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum FontSize {
    /// Size the glyph to the smaller side of the target rectangle.
    FillBox,
    Pixels(u32),
    Points(f64),
}

// ============================================================================
// DrawOptions
// ============================================================================

/// Options for [`IconRenderer::draw`](crate::IconRenderer::draw).
///
/// # JSON Format
///
/// ```json
/// {
///   "size": { "pixels": 24 },
///   "applyColor": true,
///   "mode": "Selected",
///   "role": "Link"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct DrawOptions {
    /// Glyph size. `None` uses [`Config::default_pixel_size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,

    /// Whether the icon's own color wins over the palette.
    pub apply_color: bool,

    /// Overrides the mode passed to the draw call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<IconMode>,

    /// Palette role used when no explicit color applies. Defaults to
    /// [`ColorRole::Text`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ColorRole>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            size: None,
            apply_color: true,
            mode: None,
            role: None,
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_box(mut self) -> Self {
        self.size = Some(FontSize::FillBox);
        self
    }

    pub fn pixel_size(mut self, pixels: u32) -> Self {
        self.size = Some(FontSize::Pixels(pixels));
        self
    }

    pub fn point_size(mut self, points: f64) -> Self {
        self.size = Some(FontSize::Points(points));
        self
    }

    pub fn apply_color(mut self, apply: bool) -> Self {
        self.apply_color = apply;
        self
    }

    pub fn mode(mut self, mode: IconMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn role(mut self, role: ColorRole) -> Self {
        self.role = Some(role);
        self
    }

    /// The mode override, or `fallback`.
    pub fn effective_mode(&self, fallback: IconMode) -> IconMode {
        self.mode.unwrap_or(fallback)
    }

    /// Glyph size in pixels for drawing into `rect`.
    pub fn pixel_size_for(&self, rect: &RectF, config: &Config) -> f32 {
        match self.size {
            Some(FontSize::FillBox) => rect.min_side(),
            Some(FontSize::Pixels(pixels)) => pixels as f32,
            Some(FontSize::Points(points)) => config.points_to_pixels(points),
            None => config.default_pixel_size,
        }
    }

    /// The color an icon with explicit color `explicit` is drawn in.
    ///
    /// The explicit color wins unless color is disabled by
    /// [`DrawOptions::apply_color`] or the mode is [`IconMode::Disabled`];
    /// otherwise the palette decides. `None` means the palette has no color
    /// either and the glyph keeps its native colors.
    pub fn effective_color(
        &self,
        explicit: Option<Color>,
        palette: &dyn ColorResolver,
        fallback_mode: IconMode,
    ) -> Option<Color> {
        let mode = self.effective_mode(fallback_mode);

        match explicit {
            Some(color) if mode != IconMode::Disabled && self.apply_color => Some(color),
            _ => resolve_for_mode(palette, mode, self.role.unwrap_or_default()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorGroup, Palette};

    const RED: Color = Color::new(255, 0, 0, 255);
    const ACTIVE_TEXT: Color = Color::new(1, 1, 1, 255);
    const INACTIVE_TEXT: Color = Color::new(2, 2, 2, 255);
    const DISABLED_TEXT: Color = Color::new(3, 3, 3, 255);
    const ACTIVE_HIGHLIGHT: Color = Color::new(4, 4, 4, 255);
    const INACTIVE_LINK: Color = Color::new(5, 5, 5, 255);

    fn palette() -> Palette {
        Palette::new()
            .with(ColorGroup::Active, ColorRole::Text, ACTIVE_TEXT)
            .with(ColorGroup::Inactive, ColorRole::Text, INACTIVE_TEXT)
            .with(ColorGroup::Disabled, ColorRole::Text, DISABLED_TEXT)
            .with(ColorGroup::Active, ColorRole::HighlightedText, ACTIVE_HIGHLIGHT)
            .with(ColorGroup::Inactive, ColorRole::Link, INACTIVE_LINK)
    }

    #[test]
    fn default_applies_color() {
        let options = DrawOptions::default();
        assert!(options.apply_color);
        assert_eq!(options.size, None);
        assert_eq!(options.effective_mode(IconMode::Active), IconMode::Active);
    }

    #[test]
    fn options_compare_by_value() {
        assert_eq!(DrawOptions::new(), DrawOptions::new());
        assert_ne!(DrawOptions::new(), DrawOptions::new().fill_box());
        assert_ne!(DrawOptions::new().pixel_size(16), DrawOptions::new().pixel_size(24));
        assert_ne!(DrawOptions::new(), DrawOptions::new().apply_color(false));
        assert_ne!(DrawOptions::new(), DrawOptions::new().mode(IconMode::Disabled));
        assert_ne!(DrawOptions::new(), DrawOptions::new().role(ColorRole::Link));
    }

    #[test]
    fn explicit_color_wins_outside_disabled() {
        let palette = palette();
        let options = DrawOptions::new();

        assert_eq!(options.effective_color(Some(RED), &palette, IconMode::Normal), Some(RED));
        assert_eq!(options.effective_color(Some(RED), &palette, IconMode::Active), Some(RED));
        assert_eq!(options.effective_color(Some(RED), &palette, IconMode::Selected), Some(RED));
    }

    #[test]
    fn palette_resolution_table() {
        let palette = palette();
        let options = DrawOptions::new();

        assert_eq!(
            options.effective_color(None, &palette, IconMode::Normal),
            Some(INACTIVE_TEXT)
        );
        assert_eq!(
            options.effective_color(None, &palette, IconMode::Active),
            Some(ACTIVE_TEXT)
        );
        assert_eq!(
            options.effective_color(Some(RED), &palette, IconMode::Disabled),
            Some(DISABLED_TEXT)
        );
        assert_eq!(
            options.role(ColorRole::Link).effective_color(None, &palette, IconMode::Selected),
            Some(ACTIVE_HIGHLIGHT)
        );
        assert_eq!(
            options.role(ColorRole::Link).effective_color(None, &palette, IconMode::Normal),
            Some(INACTIVE_LINK)
        );
    }

    #[test]
    fn apply_color_false_uses_palette() {
        let options = DrawOptions::new().apply_color(false);
        assert_eq!(
            options.effective_color(Some(RED), &palette(), IconMode::Normal),
            Some(INACTIVE_TEXT)
        );
    }

    #[test]
    fn mode_override_beats_fallback() {
        let options = DrawOptions::new().mode(IconMode::Disabled);
        assert_eq!(
            options.effective_color(Some(RED), &palette(), IconMode::Normal),
            Some(DISABLED_TEXT)
        );
    }

    #[test]
    fn missing_palette_color_is_none() {
        let options = DrawOptions::new().role(ColorRole::BrightText);
        assert_eq!(options.effective_color(None, &palette(), IconMode::Normal), None);
    }

    #[test]
    fn pixel_size_resolution() {
        let config = Config::default();
        let rect = RectF::from_size(40.0, 24.0);

        assert_eq!(DrawOptions::new().fill_box().pixel_size_for(&rect, &config), 24.0);
        assert_eq!(DrawOptions::new().pixel_size(20).pixel_size_for(&rect, &config), 20.0);
        assert_eq!(DrawOptions::new().point_size(12.0).pixel_size_for(&rect, &config), 16.0);
        assert_eq!(DrawOptions::new().pixel_size_for(&rect, &config), 16.0);
    }

    #[test]
    fn json_roundtrip() {
        let options = DrawOptions::new()
            .pixel_size(24)
            .mode(IconMode::Selected)
            .role(ColorRole::Link);

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"applyColor\":true"));
        assert!(json.contains("\"pixels\":24"));

        let restored: DrawOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, options);

        let defaults: DrawOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, DrawOptions::default());
    }
}
