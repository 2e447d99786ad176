//! Palette colors used when an icon has no explicit color.

use std::collections::HashMap;

use ::palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::icon::Color;
use crate::options::IconMode;

/// Color group of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ColorGroup {
    Active,
    Inactive,
    Disabled,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 3] = [Self::Active, Self::Inactive, Self::Disabled];
}

/// Semantic color role of a palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ColorRole {
    WindowText,
    Window,
    Base,
    #[default]
    Text,
    ButtonText,
    BrightText,
    Highlight,
    HighlightedText,
    Link,
    PlaceholderText,
}

/// Source of palette colors, supplied by the caller's UI context.
pub trait ColorResolver: Send + Sync {
    fn resolve(&self, group: ColorGroup, role: ColorRole) -> Option<Color>;
}

impl<F> ColorResolver for F
where
    F: Fn(ColorGroup, ColorRole) -> Option<Color> + Send + Sync,
{
    fn resolve(&self, group: ColorGroup, role: ColorRole) -> Option<Color> {
        self(group, role)
    }
}

/// Resolves `role` for an icon drawn in `mode`.
///
/// Normal icons use the inactive group. Selected icons always use the
/// active highlighted text color, whatever `role` asks for.
pub fn resolve_for_mode(
    resolver: &dyn ColorResolver,
    mode: IconMode,
    role: ColorRole,
) -> Option<Color> {
    match mode {
        IconMode::Normal => resolver.resolve(ColorGroup::Inactive, role),
        IconMode::Disabled => resolver.resolve(ColorGroup::Disabled, role),
        IconMode::Active => resolver.resolve(ColorGroup::Active, role),
        IconMode::Selected => resolver.resolve(ColorGroup::Active, ColorRole::HighlightedText),
    }
}

// ============================================================================
// Palette
// ============================================================================

/// A table of colors by group and role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: HashMap<(ColorGroup, ColorRole), Color>,
}

impl Palette {
    /// An empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// A light desktop palette. Disabled text is faded towards the window
    /// background.
    pub fn light() -> Self {
        let window = Color::new(0xEF, 0xEF, 0xEF, 0xFF);
        let black = Color::new(0, 0, 0, 0xFF);
        let white = Color::new(0xFF, 0xFF, 0xFF, 0xFF);

        let mut palette = Self::new();
        for group in ColorGroup::ALL {
            palette.set(group, ColorRole::Window, window);
            palette.set(group, ColorRole::Base, white);
            palette.set(group, ColorRole::BrightText, white);
            palette.set(group, ColorRole::Highlight, Color::new(0x30, 0x8C, 0xC6, 0xFF));
            palette.set(group, ColorRole::HighlightedText, white);
            palette.set(group, ColorRole::Link, Color::new(0, 0, 0xFF, 0xFF));
        }

        let disabled_text = fade_towards(black, window, 0.75);
        for role in [ColorRole::WindowText, ColorRole::Text, ColorRole::ButtonText] {
            palette.set(ColorGroup::Active, role, black);
            palette.set(ColorGroup::Inactive, role, black);
            palette.set(ColorGroup::Disabled, role, disabled_text);
        }

        let placeholder = Color::new(0, 0, 0, 0x80);
        palette.set(ColorGroup::Active, ColorRole::PlaceholderText, placeholder);
        palette.set(ColorGroup::Inactive, ColorRole::PlaceholderText, placeholder);
        palette.set(
            ColorGroup::Disabled,
            ColorRole::PlaceholderText,
            Color::new(disabled_text.red, disabled_text.green, disabled_text.blue, 0x80),
        );

        palette.set(
            ColorGroup::Disabled,
            ColorRole::Highlight,
            fade_towards(Color::new(0x30, 0x8C, 0xC6, 0xFF), window, 0.5),
        );

        palette
    }

    pub fn set(&mut self, group: ColorGroup, role: ColorRole, color: Color) {
        self.colors.insert((group, role), color);
    }

    /// Builder form of [`Palette::set`].
    pub fn with(mut self, group: ColorGroup, role: ColorRole, color: Color) -> Self {
        self.set(group, role, color);
        self
    }

    pub fn color(&self, group: ColorGroup, role: ColorRole) -> Option<Color> {
        self.colors.get(&(group, role)).copied()
    }
}

impl ColorResolver for Palette {
    fn resolve(&self, group: ColorGroup, role: ColorRole) -> Option<Color> {
        self.color(group, role)
    }
}

/// Moves the lightness of `color` towards that of `background` by `amount`
/// (0.0-1.0). Alpha is kept.
pub fn fade_towards(color: Color, background: Color, amount: f32) -> Color {
    let lightness = |c: Color| -> Hsl {
        let rgb = Srgb::new(
            c.red as f32 / 255.0,
            c.green as f32 / 255.0,
            c.blue as f32 / 255.0,
        );
        rgb.into_color()
    };

    let mut hsl = lightness(color);
    let target = lightness(background).lightness;
    hsl.lightness += (target - hsl.lightness) * amount.clamp(0.0, 1.0);

    let faded: Srgb = hsl.into_color();
    Color::new(
        (faded.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (faded.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (faded.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        color.alpha,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_palette_covers_text_roles() {
        let palette = Palette::light();
        for group in ColorGroup::ALL {
            for role in [ColorRole::Text, ColorRole::WindowText, ColorRole::HighlightedText] {
                assert!(palette.color(group, role).is_some(), "{group:?} {role:?}");
            }
        }
    }

    #[test]
    fn disabled_text_is_lighter() {
        let palette = Palette::light();
        let normal = palette.color(ColorGroup::Inactive, ColorRole::Text).unwrap();
        let disabled = palette.color(ColorGroup::Disabled, ColorRole::Text).unwrap();

        assert_eq!(normal, Color::new(0, 0, 0, 255));
        assert!(disabled.red > 128 && disabled.red < 0xEF);
        assert_eq!(disabled.red, disabled.green);
        assert_eq!(disabled.alpha, 255);
    }

    #[test]
    fn fade_keeps_alpha_and_bounds() {
        let black = Color::new(0, 0, 0, 40);
        let white = Color::new(255, 255, 255, 255);

        assert_eq!(fade_towards(black, white, 0.0), black);
        assert_eq!(fade_towards(black, white, 1.0), Color::new(255, 255, 255, 40));
    }

    #[test]
    fn selected_ignores_requested_role() {
        let resolver = |group: ColorGroup, role: ColorRole| -> Option<Color> {
            match (group, role) {
                (ColorGroup::Active, ColorRole::HighlightedText) => Some(Color::new(9, 9, 9, 255)),
                _ => None,
            }
        };

        assert_eq!(
            resolve_for_mode(&resolver, IconMode::Selected, ColorRole::Link),
            Some(Color::new(9, 9, 9, 255))
        );
        assert_eq!(resolve_for_mode(&resolver, IconMode::Active, ColorRole::Link), None);
    }

    #[test]
    fn mode_to_group_mapping() {
        let resolver = |group: ColorGroup, _role: ColorRole| -> Option<Color> {
            let shade = match group {
                ColorGroup::Active => 1,
                ColorGroup::Inactive => 2,
                ColorGroup::Disabled => 3,
            };
            Some(Color::new(shade, shade, shade, 255))
        };

        let shade = |mode| resolve_for_mode(&resolver, mode, ColorRole::Text).map(|c| c.red);
        assert_eq!(shade(IconMode::Normal), Some(2));
        assert_eq!(shade(IconMode::Disabled), Some(3));
        assert_eq!(shade(IconMode::Active), Some(1));
        assert_eq!(shade(IconMode::Selected), Some(1));
    }
}
